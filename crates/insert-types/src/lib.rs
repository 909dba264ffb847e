//! Shared value types for the insert-hole workspace.
//!
//! Geometry here is deliberately thin: plain `[f64; 3]` arrays and a few
//! helpers, matching what the host kernel hands back. Lengths are in
//! centimeters (the kernel's internal unit); catalog and settings values
//! are millimeters and cross the boundary through the `mm_to_cm` helpers.

pub mod geometry;
pub mod insert;

pub use geometry::{circle_area, BoundingBox2, SketchPlane};
pub use insert::{InsertSpec, InsertSpecError};

/// Convert a millimeter value to centimeters.
pub fn mm_to_cm(mm: f64) -> f64 {
    mm / 10.0
}

/// Convert a centimeter value to millimeters.
pub fn cm_to_mm(cm: f64) -> f64 {
    cm * 10.0
}
