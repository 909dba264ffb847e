//! User-tunable settings for the hole command.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Millimeter ranges a setting may take before it falls back to default.
const CHAMFER_RANGE_MM: (f64, f64) = (0.0, 5.0);
const BOTTOM_RADIUS_RANGE_MM: (f64, f64) = (0.0, 5.0);
const EXTRA_DEPTH_RANGE_MM: (f64, f64) = (0.0, 10.0);

/// Dialog defaults and persisted last-used state. All sizes in mm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Start the dialog in through-hole mode.
    pub default_to_through_hole: bool,
    pub add_chamfer: bool,
    pub chamfer_mm: f64,
    pub add_bottom_radius: bool,
    pub bottom_radius_mm: f64,
    /// Blind-hole depth added below the insert length.
    pub extra_depth_mm: f64,
    pub show_success_message: bool,
    /// Catalog name of the last insert the user placed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_insert: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_to_through_hole: false,
            add_chamfer: true,
            chamfer_mm: 0.3,
            add_bottom_radius: false,
            bottom_radius_mm: 1.0,
            extra_depth_mm: 1.0,
            show_success_message: true,
            last_insert: None,
        }
    }
}

impl Settings {
    /// Clamp loaded values to their ranges, resetting out-of-range or
    /// non-finite values to the defaults. The engine only ever sees
    /// sanitized settings.
    pub fn sanitize(&mut self) {
        let defaults = Settings::default();
        sanitize_field(
            "chamfer_mm",
            &mut self.chamfer_mm,
            CHAMFER_RANGE_MM,
            defaults.chamfer_mm,
        );
        sanitize_field(
            "bottom_radius_mm",
            &mut self.bottom_radius_mm,
            BOTTOM_RADIUS_RANGE_MM,
            defaults.bottom_radius_mm,
        );
        sanitize_field(
            "extra_depth_mm",
            &mut self.extra_depth_mm,
            EXTRA_DEPTH_RANGE_MM,
            defaults.extra_depth_mm,
        );
    }
}

fn sanitize_field(name: &str, value: &mut f64, range: (f64, f64), default: f64) {
    if !value.is_finite() || *value < range.0 || *value > range.1 {
        warn!(
            setting = name,
            value = *value,
            min = range.0,
            max = range.1,
            default,
            "setting out of range, using default"
        );
        *value = default;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_in_range() {
        let mut settings = Settings::default();
        let before = settings.clone();
        settings.sanitize();
        assert_eq!(settings, before);
    }

    #[test]
    fn out_of_range_values_reset_to_defaults() {
        let mut settings = Settings {
            chamfer_mm: 7.5,
            extra_depth_mm: -1.0,
            bottom_radius_mm: f64::NAN,
            ..Settings::default()
        };
        settings.sanitize();
        assert_eq!(settings.chamfer_mm, 0.3);
        assert_eq!(settings.extra_depth_mm, 1.0);
        assert_eq!(settings.bottom_radius_mm, 1.0);
    }
}
