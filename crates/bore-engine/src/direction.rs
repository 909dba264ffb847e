//! Infer which side of the sketch plane holds material.
//!
//! The host cannot say directly which way a cut should go, so the engine
//! probes point containment at increasing offsets along the plane normal.
//! Each side "enters the body" when any ladder probe touches it; surface
//! contact counts, since an anchor on the rim of a face may never see a
//! strictly interior sample. Only when both sides enter does a tiny
//! secondary probe break the tie.

use insert_types::geometry::{add, scale};
use kernel_adapter::{BodyHandle, Containment, ExtentDirection, HostQueries};
use tracing::debug;

/// Probe offsets along the normal, in cm. Small offsets see thin material;
/// the larger ones reach past shallow cavities.
const PROBE_LADDER: [f64; 4] = [0.01, 0.05, 0.1, 0.2];
/// Secondary probe for the both-sides-enter case.
const TIE_BREAK_PROBE: f64 = 0.001;

/// Decide the cut direction for an anchor at `anchor` (world, cm) on a
/// plane with unit `normal`.
///
/// Returns None when no probe on either side ever touches the body, which
/// means the anchor does not sit on a face of `body`.
pub fn infer_direction(
    queries: &dyn HostQueries,
    body: &BodyHandle,
    anchor: [f64; 3],
    normal: [f64; 3],
) -> Option<ExtentDirection> {
    let classify = |offset: f64| {
        let point = add(anchor, scale(normal, offset));
        queries.point_containment(body, point)
    };
    let enters = |sign: f64| {
        PROBE_LADDER
            .iter()
            .any(|probe| classify(sign * probe) != Containment::Outside)
    };

    match (enters(1.0), enters(-1.0)) {
        (true, false) => {
            debug!("body on positive side only");
            Some(ExtentDirection::Positive)
        }
        (false, true) => {
            debug!("body on negative side only");
            Some(ExtentDirection::Negative)
        }
        (false, false) => {
            debug!("no probe on either side touched the body");
            None
        }
        // The plane runs through the body. Probe right at the plane: a
        // strictly outside side means a cavity there, so cut the other
        // way; otherwise default positive.
        (true, true) => {
            let positive_clear = classify(TIE_BREAK_PROBE) == Containment::Outside;
            let negative_clear = classify(-TIE_BREAK_PROBE) == Containment::Outside;
            let direction = match (positive_clear, negative_clear) {
                (true, false) => ExtentDirection::Negative,
                (false, true) => ExtentDirection::Positive,
                _ => ExtentDirection::Positive,
            };
            debug!(?direction, "both sides enter the body, tie broken");
            Some(direction)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel_adapter::{HostKernel, MockKernel};

    #[test]
    fn plate_below_plane_cuts_negative() {
        let (kernel, body, _sketch) = MockKernel::with_plate(5.0, 5.0, 1.0);
        let dir = infer_direction(&kernel, &body, [2.5, 2.5, 0.0], [0.0, 0.0, 1.0]);
        assert_eq!(dir, Some(ExtentDirection::Negative));
    }

    #[test]
    fn plate_above_plane_cuts_positive() {
        let (kernel, body, _sketch) =
            MockKernel::with_plate_box([0.0, 0.0, 0.0], [5.0, 5.0, 1.0]);
        let dir = infer_direction(&kernel, &body, [2.5, 2.5, 0.0], [0.0, 0.0, 1.0]);
        assert_eq!(dir, Some(ExtentDirection::Positive));
    }

    #[test]
    fn rim_anchor_counts_surface_contact_as_material() {
        // On the plate's side face every downward probe lands exactly on
        // the surface, never strictly inside.
        let (kernel, body, _sketch) = MockKernel::with_plate(5.0, 5.0, 1.0);
        let dir = infer_direction(&kernel, &body, [0.0, 2.5, 0.0], [0.0, 0.0, 1.0]);
        assert_eq!(dir, Some(ExtentDirection::Negative));
    }

    #[test]
    fn foil_thinner_than_the_ladder_is_undetermined() {
        // 0.05mm of material: every ladder probe overshoots both ways.
        let (kernel, body, _sketch) =
            MockKernel::with_plate_box([0.0, 0.0, -0.005], [5.0, 5.0, 0.0]);
        let dir = infer_direction(&kernel, &body, [2.5, 2.5, 0.0], [0.0, 0.0, 1.0]);
        assert_eq!(dir, None);
    }

    #[test]
    fn anchor_off_the_body_is_undetermined() {
        let (kernel, body, _sketch) =
            MockKernel::with_plate_box([0.0, 0.0, 2.0], [5.0, 5.0, 3.0]);
        let dir = infer_direction(&kernel, &body, [2.5, 2.5, 0.0], [0.0, 0.0, 1.0]);
        assert_eq!(dir, None);
    }

    #[test]
    fn plane_through_body_defaults_positive() {
        let (kernel, body, _sketch) =
            MockKernel::with_plate_box([0.0, 0.0, -1.0], [5.0, 5.0, 1.0]);
        let dir = infer_direction(&kernel, &body, [2.5, 2.5, 0.0], [0.0, 0.0, 1.0]);
        assert_eq!(dir, Some(ExtentDirection::Positive));
    }

    #[test]
    fn shallow_counterbore_breaks_the_tie() {
        // Plane through the body, but a shallow cavity sits right above
        // the anchor: larger probes clear it, the tiny one does not, so
        // the cut must go down.
        let (mut kernel, body, sketch) =
            MockKernel::with_plate_box([0.0, 0.0, -1.0], [5.0, 5.0, 1.0]);
        kernel.construct_circle(sketch, [2.5, 2.5], 0.22).unwrap();
        let regions = kernel.regions_on_plane(sketch);
        kernel
            .cut_regions(&body, &regions, ExtentDirection::Positive, 0.005)
            .unwrap();

        let dir = infer_direction(&kernel, &body, [2.5, 2.5, 0.0], [0.0, 0.0, 1.0]);
        assert_eq!(dir, Some(ExtentDirection::Negative));
    }
}
