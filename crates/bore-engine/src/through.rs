//! Depth needed for a through bore.
//!
//! The host has no cheap "distance to opposite face along a ray" query, so
//! the engine marches sample points down the bore axis, waits for one to
//! land inside the body, and takes the first strictly-outside sample after
//! that as the far-face crossing, padded so the cut clears it. Marching
//! until the body is entered matters: the sketch plane may sit a little
//! proud of the material, and the first samples then miss it.

use insert_types::geometry::{add, scale};
use kernel_adapter::{BodyHandle, Containment, ExtentDirection, HostQueries};
use tracing::debug;

/// Sample spacing along the axis, cm.
const STEP: f64 = 0.1;
/// Give up after this many samples (100 cm of material).
const MAX_STEPS: usize = 1000;
/// Added past the crossing so the cut fully clears the far face.
const CLEARANCE: f64 = 0.2;
/// Depth used when the march never detects an inside-to-outside crossing.
const FALLBACK_DEPTH: f64 = 10.0;

/// Distance (cm) a cut from `anchor` must travel along `direction` to pass
/// through `body`, including clearance beyond the far face.
pub fn through_distance(
    queries: &dyn HostQueries,
    body: &BodyHandle,
    anchor: [f64; 3],
    normal: [f64; 3],
    direction: ExtentDirection,
) -> f64 {
    let axis = scale(normal, direction.sign());

    let mut entered = false;
    for step in 1..=MAX_STEPS {
        let distance = step as f64 * STEP;
        let sample = add(anchor, scale(axis, distance));
        match queries.point_containment(body, sample) {
            Containment::Inside => entered = true,
            // Grazing the far face is not a crossing yet.
            Containment::OnSurface => {}
            Containment::Outside if entered => {
                debug!(distance, "axis march left the body");
                return distance + CLEARANCE;
            }
            Containment::Outside => {}
        }
    }

    debug!(
        max = MAX_STEPS as f64 * STEP,
        entered, "axis march found no exit, using fallback depth"
    );
    FALLBACK_DEPTH
}
