use serde::{Deserialize, Serialize};

/// Dimensional specification for one heat-set insert size.
///
/// All lengths are millimeters. `min_wall_mm` is informational only: the
/// engine never enforces it, it is surfaced to the user alongside the
/// selected insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertSpec {
    /// Catalog name, e.g. "M3 x 5.7mm (standard)".
    pub name: String,
    /// Bore diameter the insert melts into.
    pub hole_diameter_mm: f64,
    /// Length of the insert body.
    pub length_mm: f64,
    /// Recommended minimum surrounding wall thickness.
    pub min_wall_mm: f64,
}

/// Validation errors for an insert specification.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InsertSpecError {
    #[error("insert \"{name}\": hole diameter {value}mm must be positive")]
    NonPositiveDiameter { name: String, value: f64 },

    #[error("insert \"{name}\": length {value}mm must be positive")]
    NonPositiveLength { name: String, value: f64 },
}

impl InsertSpec {
    pub fn new(name: impl Into<String>, hole_diameter_mm: f64, length_mm: f64, min_wall_mm: f64) -> Self {
        Self {
            name: name.into(),
            hole_diameter_mm,
            length_mm,
            min_wall_mm,
        }
    }

    /// Check the global invariant: strictly positive diameter and length.
    pub fn validate(&self) -> Result<(), InsertSpecError> {
        if self.hole_diameter_mm <= 0.0 {
            return Err(InsertSpecError::NonPositiveDiameter {
                name: self.name.clone(),
                value: self.hole_diameter_mm,
            });
        }
        if self.length_mm <= 0.0 {
            return Err(InsertSpecError::NonPositiveLength {
                name: self.name.clone(),
                value: self.length_mm,
            });
        }
        Ok(())
    }

    /// Bore radius in centimeters (kernel units).
    pub fn bore_radius_cm(&self) -> f64 {
        crate::mm_to_cm(self.hole_diameter_mm) / 2.0
    }
}
