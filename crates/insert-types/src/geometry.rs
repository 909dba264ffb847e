use serde::{Deserialize, Serialize};

/// Area of a circle of the given radius.
///
/// Both the engine and any test double must compute target areas through
/// this function so that an unfragmented disc region matches its circle
/// with zero area difference.
pub fn circle_area(radius: f64) -> f64 {
    std::f64::consts::PI * radius * radius
}

/// Dot product of two 3-vectors.
pub fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Component-wise subtraction: a - b.
pub fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Component-wise addition: a + b.
pub fn add(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

/// Scale a vector by a scalar.
pub fn scale(v: [f64; 3], s: f64) -> [f64; 3] {
    [v[0] * s, v[1] * s, v[2] * s]
}

/// Euclidean length of a vector.
pub fn length(v: [f64; 3]) -> f64 {
    dot(v, v).sqrt()
}

/// A 2D axis-aligned bounding box in sketch coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox2 {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl BoundingBox2 {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Self { min, max }
    }

    /// Bounding box of a circle, optionally grown by a margin on all sides.
    pub fn of_circle(center: [f64; 2], radius: f64, margin: f64) -> Self {
        let r = radius + margin;
        Self {
            min: [center[0] - r, center[1] - r],
            max: [center[0] + r, center[1] + r],
        }
    }

    /// Whether `other` lies entirely inside this box.
    pub fn contains(&self, other: &BoundingBox2) -> bool {
        other.min[0] >= self.min[0]
            && other.max[0] <= self.max[0]
            && other.min[1] >= self.min[1]
            && other.max[1] <= self.max[1]
    }
}

/// A sketch plane: origin and orthonormal axes in world coordinates.
///
/// The host kernel supplies this per sketch; the engine only uses it to
/// lift 2D sketch coordinates into world space and to read the plane
/// normal for direction and axis reasoning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SketchPlane {
    pub origin: [f64; 3],
    pub x_axis: [f64; 3],
    pub y_axis: [f64; 3],
    pub normal: [f64; 3],
}

impl SketchPlane {
    /// A plane coincident with the world XY plane, normal +Z.
    pub fn world_xy() -> Self {
        Self {
            origin: [0.0, 0.0, 0.0],
            x_axis: [1.0, 0.0, 0.0],
            y_axis: [0.0, 1.0, 0.0],
            normal: [0.0, 0.0, 1.0],
        }
    }

    /// Lift a 2D sketch-space point into world coordinates.
    pub fn to_world(&self, p: [f64; 2]) -> [f64; 3] {
        add(
            self.origin,
            add(scale(self.x_axis, p[0]), scale(self.y_axis, p[1])),
        )
    }
}
