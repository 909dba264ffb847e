use insert_types::BoundingBox2;
use serde::{Deserialize, Serialize};

/// Opaque handle to a solid body in the host kernel.
/// Valid only for the current command execution, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub(crate) u64);

impl BodyHandle {
    pub(crate) fn id(&self) -> u64 {
        self.0
    }
}

/// Identifier of a bounded planar region ("profile") on a sketch plane.
/// Stable only between the query that produced it and the cut that
/// consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(pub u64);

/// Identifier of a body edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(pub u64);

/// Identifier of a constructed sketch circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CircleId(pub u64);

/// Identifier of a sketch (and its plane).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SketchId(pub u64);

/// Identifier of a created feature (cut, chamfer, fillet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeatureId(pub u64);

/// Position in the modeling timeline, for grouping created operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimelineMarker(pub usize);

/// Which of the two plane-normal-aligned directions an extrusion takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtentDirection {
    Positive,
    Negative,
}

impl ExtentDirection {
    /// Sign to multiply the plane normal by.
    pub fn sign(self) -> f64 {
        match self {
            ExtentDirection::Positive => 1.0,
            ExtentDirection::Negative => -1.0,
        }
    }
}

/// Classification of a point against a solid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    Inside,
    OnSurface,
    Outside,
}

/// Derived properties of a planar region, as reported by the kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionProps {
    /// Enclosed area.
    pub area: f64,
    /// Area centroid, in sketch coordinates.
    pub centroid: [f64; 2],
    /// Axis-aligned bounds, in sketch coordinates.
    pub bbox: BoundingBox2,
}

/// Curve classification of a body edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveGeometry {
    /// A full circular edge with its defining circle.
    Circle {
        center: [f64; 3],
        radius: f64,
        normal: [f64; 3],
    },
    /// A straight edge.
    Line,
    /// Anything else (splines, ellipses, ...). Never selected by the engine.
    Other,
}

/// Errors from kernel operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KernelError {
    #[error("cut failed: {reason}")]
    CutFailed { reason: String },

    #[error("chamfer failed: {reason}")]
    ChamferFailed { reason: String },

    #[error("fillet failed: {reason}")]
    FilletFailed { reason: String },

    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    #[error("entity not found: {id}")]
    EntityNotFound { id: u64 },

    #[error("operation not supported: {operation}")]
    NotSupported { operation: String },

    #[error("kernel error: {message}")]
    Other { message: String },
}
