//! Geometric resolution and batch placement of heat-set insert bores.
//!
//! The engine turns anchor points on a sketch into finished insert holes:
//! it resolves which planar regions to cut under each anchor, infers which
//! side of the sketch plane holds material, computes through-bore depth by
//! marching the axis, cuts the bore, and dresses the result with a lead-in
//! chamfer and an optional bottom fillet. Everything runs against the
//! [`kernel_adapter`] traits, so the same code drives the production host
//! and the mock kernel in tests.
//!
//! All internal lengths are centimeters. Catalog values arrive in
//! millimeters and are converted at the [`batch`] boundary.

pub mod batch;
pub mod direction;
pub mod edges;
pub mod profile;
pub mod through;

pub use batch::{
    execute_bores, AnchorPoint, BatchReport, BoreRequest, EngineError, HoleKind, PointFailure,
    PointOutcome,
};
pub use direction::infer_direction;
pub use edges::{find_bore_edge, EdgeSearchMode};
pub use profile::{resolve_cut_region, CircleSpec, ResolvedCutRegion};
pub use through::through_distance;
