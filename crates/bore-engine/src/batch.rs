//! Batch placement of insert bores at selected anchor points.
//!
//! One request covers a set of anchors on sketches of the same body, all
//! using the same insert. Per-point geometric failures (no enclosed
//! profile, no material direction) retract that point's construction
//! circle and are reported; kernel failures abort the batch.

use insert_types::{mm_to_cm, InsertSpec, InsertSpecError};
use kernel_adapter::{BodyHandle, FeatureId, HostBundle, KernelError, SketchId};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::direction::infer_direction;
use crate::edges::{find_bore_edge, EdgeSearchMode};
use crate::profile::{resolve_cut_region, CircleSpec};
use crate::through::through_distance;

/// A selected sketch point to place an insert hole at.
#[derive(Debug, Clone)]
pub struct AnchorPoint {
    pub sketch: SketchId,
    /// Position in sketch coordinates, cm.
    pub position: [f64; 2],
}

/// Whether holes stop at the insert depth or pass through the part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoleKind {
    Blind,
    Through,
}

/// Everything needed to place one batch of insert holes.
#[derive(Debug, Clone)]
pub struct BoreRequest {
    pub body: BodyHandle,
    pub points: Vec<AnchorPoint>,
    pub insert: InsertSpec,
    pub hole: HoleKind,
    /// Lead-in chamfer distance in mm; None or zero disables it.
    pub chamfer_mm: Option<f64>,
    /// Bottom fillet radius in mm. Only applies to blind holes.
    pub bottom_fillet_mm: Option<f64>,
    /// Extra blind depth below the insert, mm.
    pub extra_depth_mm: f64,
}

/// Why a single anchor point produced no hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PointFailure {
    #[error("no closed profile encloses the anchor point")]
    NoProfile,
    #[error("could not determine which side of the sketch holds material")]
    NoDirection,
}

/// Result for one anchor point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointOutcome {
    Placed { feature: FeatureId },
    Skipped { failure: PointFailure },
}

/// Outcome of a whole batch.
#[derive(Debug, Clone)]
pub struct BatchReport {
    insert_name: String,
    pub outcomes: Vec<PointOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, PointOutcome::Placed { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Human-readable summary. Always present when points were skipped;
    /// all-success batches report only when `show_success` is set.
    pub fn summary_message(&self, show_success: bool) -> Option<String> {
        if self.failed() == 0 {
            if !show_success {
                return None;
            }
            return Some(format!(
                "Placed {} insert hole(s) ({}).",
                self.succeeded(),
                self.insert_name
            ));
        }

        let mut message = format!(
            "Placed {} of {} insert hole(s) ({}).",
            self.succeeded(),
            self.outcomes.len(),
            self.insert_name
        );
        for (index, outcome) in self.outcomes.iter().enumerate() {
            if let PointOutcome::Skipped { failure } = outcome {
                message.push_str(&format!("\nPoint {}: {}.", index + 1, failure));
            }
        }
        Some(message)
    }
}

/// Errors that abort a batch.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Kernel(#[from] KernelError),

    #[error("invalid insert: {0}")]
    InvalidInsert(#[from] InsertSpecError),

    #[error("sketch {0} has no plane")]
    MissingSketchPlane(u64),
}

/// Place insert holes at every anchor point in `request`.
///
/// Each point gets a construction circle (constrained concentric so the
/// hole follows later sketch edits), a resolved cut region, an inferred
/// direction, a bore cut, and best-effort chamfer and fillet dressing.
/// Finished features are wrapped in one timeline group when the host
/// supports grouping.
pub fn execute_bores(
    kernel: &mut dyn HostBundle,
    request: &BoreRequest,
) -> Result<BatchReport, EngineError> {
    request.insert.validate()?;
    let radius = request.insert.bore_radius_cm();
    let batch_start = kernel.as_queries().timeline_marker();

    info!(
        insert = %request.insert.name,
        points = request.points.len(),
        radius,
        "placing insert bores"
    );

    let mut outcomes = Vec::with_capacity(request.points.len());
    for (index, point) in request.points.iter().enumerate() {
        let outcome = place_point(kernel, request, point, radius)?;
        if let PointOutcome::Skipped { failure } = &outcome {
            warn!(point = index + 1, %failure, "skipped anchor point");
        }
        outcomes.push(outcome);
    }

    let report = BatchReport {
        insert_name: request.insert.name.clone(),
        outcomes,
    };

    if report.succeeded() > 0 {
        let batch_end = kernel.as_queries().timeline_marker();
        let label = format!("({}x {})", report.succeeded(), request.insert.name);
        // Grouping is cosmetic; direct-modeling hosts reject it.
        if let Err(error) = kernel.group_timeline(batch_start, batch_end, &label) {
            warn!(%error, "could not group created features");
        }
    }

    Ok(report)
}

fn place_point(
    kernel: &mut dyn HostBundle,
    request: &BoreRequest,
    point: &AnchorPoint,
    radius: f64,
) -> Result<PointOutcome, EngineError> {
    let circle_id = kernel.construct_circle(point.sketch, point.position, radius)?;
    kernel.constrain_concentric(circle_id)?;

    let circle = CircleSpec {
        center: point.position,
        radius,
    };
    let Some(resolved) = resolve_cut_region(kernel.as_queries(), point.sketch, &circle) else {
        kernel.delete_circle(circle_id)?;
        return Ok(PointOutcome::Skipped {
            failure: PointFailure::NoProfile,
        });
    };

    let plane = kernel
        .as_queries()
        .sketch_plane(point.sketch)
        .ok_or(EngineError::MissingSketchPlane(point.sketch.0))?;
    let anchor = plane.to_world(point.position);

    let Some(direction) =
        infer_direction(kernel.as_queries(), &request.body, anchor, plane.normal)
    else {
        kernel.delete_circle(circle_id)?;
        return Ok(PointOutcome::Skipped {
            failure: PointFailure::NoDirection,
        });
    };

    let depth = match request.hole {
        HoleKind::Blind => mm_to_cm(request.insert.length_mm + request.extra_depth_mm),
        HoleKind::Through => through_distance(
            kernel.as_queries(),
            &request.body,
            anchor,
            plane.normal,
            direction,
        ),
    };
    debug!(?direction, depth, "cutting bore");

    let feature = kernel.cut_regions(&request.body, &resolved.region_ids(), direction, depth)?;

    dress_bore(kernel, request, anchor, plane.normal, radius);

    Ok(PointOutcome::Placed { feature })
}

/// Apply the lead-in chamfer and the bottom fillet. Both are best-effort:
/// a missing edge or a kernel rejection leaves a plain bore, never a
/// failed point.
fn dress_bore(
    kernel: &mut dyn HostBundle,
    request: &BoreRequest,
    axis_origin: [f64; 3],
    axis_normal: [f64; 3],
    radius: f64,
) {
    if let Some(chamfer_mm) = request.chamfer_mm.filter(|d| *d > 0.0) {
        match find_bore_edge(
            kernel.as_queries(),
            &request.body,
            axis_origin,
            axis_normal,
            radius,
            EdgeSearchMode::Entry,
        ) {
            Some(edge) => {
                if let Err(error) = kernel.chamfer_edge(edge, mm_to_cm(chamfer_mm)) {
                    warn!(%error, "chamfer rejected, leaving plain bore mouth");
                }
            }
            None => warn!("entry edge not found, skipping chamfer"),
        }
    }

    let fillet_mm = match request.hole {
        HoleKind::Blind => request.bottom_fillet_mm.filter(|r| *r > 0.0),
        // Through holes have no bottom to round.
        HoleKind::Through => None,
    };
    if let Some(fillet_mm) = fillet_mm {
        match find_bore_edge(
            kernel.as_queries(),
            &request.body,
            axis_origin,
            axis_normal,
            radius,
            EdgeSearchMode::Bottom,
        ) {
            Some(edge) => {
                if let Err(error) = kernel.fillet_edge(edge, mm_to_cm(fillet_mm), true) {
                    warn!(%error, "fillet rejected, leaving sharp bore bottom");
                }
            }
            None => warn!("bottom edge not found, skipping fillet"),
        }
    }
}
