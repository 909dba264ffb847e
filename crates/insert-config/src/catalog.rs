//! The insert catalog: named sizes the user picks from.

use insert_types::InsertSpec;
use tracing::warn;

/// Sanity ceilings for catalog entries, mm. Entries outside these are
/// almost certainly typos and are skipped on load.
const MAX_HOLE_DIAMETER_MM: f64 = 50.0;
const MAX_LENGTH_MM: f64 = 100.0;
const MAX_MIN_WALL_MM: f64 = 20.0;

/// An ordered collection of insert specifications, unique by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    inserts: Vec<InsertSpec>,
}

impl Catalog {
    /// The built-in catalog, dimensioned for the widely used CNC Kitchen
    /// style inserts. Used whenever the config file supplies no valid
    /// entries of its own.
    pub fn builtin() -> Self {
        let inserts = vec![
            InsertSpec::new("M2 x 3mm", 3.2, 3.0, 1.5),
            InsertSpec::new("M2 x 4mm", 3.2, 4.0, 1.5),
            InsertSpec::new("M2.5 x 4mm", 3.6, 4.0, 1.6),
            InsertSpec::new("M3 x 4mm (short)", 4.4, 4.0, 1.6),
            InsertSpec::new("M3 x 5.7mm (standard)", 4.4, 5.7, 1.6),
            InsertSpec::new("M4 x 4mm (short)", 5.6, 4.0, 2.0),
            InsertSpec::new("M4 x 8.1mm (standard)", 5.6, 8.1, 2.0),
            InsertSpec::new("M5 x 5.8mm (short)", 6.4, 5.8, 2.5),
            InsertSpec::new("M5 x 9.5mm (standard)", 6.4, 9.5, 2.5),
            InsertSpec::new("M6 x 12.7mm", 8.0, 12.7, 3.0),
            InsertSpec::new("M8 x 12.7mm", 10.0, 12.7, 4.0),
            InsertSpec::new("M10 x 12.7mm", 12.0, 12.7, 5.0),
            InsertSpec::new("1/4\"-20 x 12.7mm", 8.0, 12.7, 3.0),
        ];
        Self { inserts }
    }

    /// Build a catalog from loaded entries, skipping every entry that
    /// fails validation. Duplicate names keep the first occurrence.
    pub fn from_entries(entries: Vec<InsertSpec>) -> Self {
        let mut inserts: Vec<InsertSpec> = Vec::with_capacity(entries.len());
        for entry in entries {
            if let Err(error) = validate_entry(&entry) {
                warn!(insert = %entry.name, %error, "skipping catalog entry");
                continue;
            }
            if inserts.iter().any(|existing| existing.name == entry.name) {
                warn!(insert = %entry.name, "skipping duplicate catalog entry");
                continue;
            }
            inserts.push(entry);
        }
        Self { inserts }
    }

    pub fn get(&self, name: &str) -> Option<&InsertSpec> {
        self.inserts.iter().find(|insert| insert.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inserts.iter().map(|insert| insert.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &InsertSpec> {
        self.inserts.iter()
    }

    pub fn len(&self) -> usize {
        self.inserts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inserts.is_empty()
    }
}

fn validate_entry(entry: &InsertSpec) -> Result<(), String> {
    entry.validate().map_err(|e| e.to_string())?;
    if entry.name.trim().is_empty() {
        return Err("name is empty".to_string());
    }
    if !entry.hole_diameter_mm.is_finite() || entry.hole_diameter_mm > MAX_HOLE_DIAMETER_MM {
        return Err(format!(
            "hole diameter {}mm exceeds {}mm",
            entry.hole_diameter_mm, MAX_HOLE_DIAMETER_MM
        ));
    }
    if !entry.length_mm.is_finite() || entry.length_mm > MAX_LENGTH_MM {
        return Err(format!(
            "length {}mm exceeds {}mm",
            entry.length_mm, MAX_LENGTH_MM
        ));
    }
    if !entry.min_wall_mm.is_finite()
        || entry.min_wall_mm < 0.0
        || entry.min_wall_mm > MAX_MIN_WALL_MM
    {
        return Err(format!(
            "min wall {}mm outside 0..{}mm",
            entry.min_wall_mm, MAX_MIN_WALL_MM
        ));
    }
    Ok(())
}
