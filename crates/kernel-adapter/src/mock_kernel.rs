//! Deterministic test double implementing HostKernel + HostQueries.
//!
//! Models a single rectangular plate body with a sketch on the world XY
//! plane. Regions are derived analytically from the live constructed
//! circles: an isolated circle yields one disc region; two overlapping
//! circles yield two crescents and a lens with exact areas, so the profile
//! resolver sees the same fragmentation a decorated host sketch produces.
//! Cuts are recorded as cylindrical bores that immediately affect point
//! containment and the body's edge set.

use std::collections::HashMap;

use insert_types::geometry::{add, circle_area, dot, scale, sub, BoundingBox2, SketchPlane};

use crate::traits::{HostKernel, HostQueries};
use crate::types::*;

const EPS: f64 = 1e-9;

#[derive(Debug, Clone)]
struct MockCircle {
    id: CircleId,
    sketch: SketchId,
    center: [f64; 2],
    radius: f64,
    constrained: bool,
}

/// A committed cylindrical cut, visible to containment and edge queries.
#[derive(Debug, Clone)]
pub struct MockBore {
    /// World point where the bore axis crosses the sketch plane.
    pub axis_origin: [f64; 3],
    pub direction: ExtentDirection,
    pub radius: f64,
    pub depth: f64,
    /// Whether the cut exits the far side of the plate.
    pub through: bool,
    /// Circular edge at the bore mouth.
    pub entry_edge: EdgeId,
    /// Circular edge at the bottom (blind) or exit face (through).
    pub far_edge: EdgeId,
    axis_dir: [f64; 3],
}

#[derive(Debug, Clone)]
struct CircularEdge {
    center: [f64; 3],
    radius: f64,
    normal: [f64; 3],
}

/// Deterministic test double for the host modeling kernel.
pub struct MockKernel {
    next_id: u64,
    plate_min: [f64; 3],
    plate_max: [f64; 3],
    body: BodyHandle,
    sketches: HashMap<u64, SketchPlane>,
    circles: Vec<MockCircle>,
    /// Regions derived from the live circles; rebuilt on every sketch edit.
    derived: Vec<(RegionId, SketchId, RegionProps)>,
    /// Regions injected directly by tests, bypassing circle derivation.
    synthetic: Vec<(RegionId, SketchId, RegionProps)>,
    derive_regions: bool,
    parametric: bool,
    bores: Vec<MockBore>,
    line_edges: Vec<EdgeId>,
    circular_edges: Vec<(EdgeId, CircularEdge)>,
    chamfers: Vec<(EdgeId, f64)>,
    fillets: Vec<(EdgeId, f64, bool)>,
    timeline_len: usize,
    groups: Vec<(TimelineMarker, TimelineMarker, String)>,
}

impl MockKernel {
    /// A plate of the given extents sitting directly below the world XY
    /// plane (z in [-thickness, 0]), with the sketch on its top face.
    /// Returns the kernel, the plate body, and the sketch.
    pub fn with_plate(width: f64, height: f64, thickness: f64) -> (Self, BodyHandle, SketchId) {
        Self::with_plate_box([0.0, 0.0, -thickness], [width, height, 0.0])
    }

    /// A plate with arbitrary extents; the sketch stays on the world XY
    /// plane, which may cut through or miss the plate entirely.
    pub fn with_plate_box(min: [f64; 3], max: [f64; 3]) -> (Self, BodyHandle, SketchId) {
        let body = BodyHandle(1);
        let sketch = SketchId(1);
        let mut sketches = HashMap::new();
        sketches.insert(sketch.0, SketchPlane::world_xy());

        let mut kernel = Self {
            next_id: 100,
            plate_min: min,
            plate_max: max,
            body: body.clone(),
            sketches,
            circles: Vec::new(),
            derived: Vec::new(),
            synthetic: Vec::new(),
            derive_regions: true,
            parametric: true,
            bores: Vec::new(),
            line_edges: Vec::new(),
            circular_edges: Vec::new(),
            chamfers: Vec::new(),
            fillets: Vec::new(),
            timeline_len: 0,
            groups: Vec::new(),
        };
        // 12 straight box edges, so edge searches always have non-circular
        // entries to skip over.
        for _ in 0..12 {
            let id = EdgeId(kernel.alloc_id());
            kernel.line_edges.push(id);
        }
        (kernel, body, sketch)
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Simulate a direct-modeling host: timeline grouping is unsupported.
    pub fn set_parametric(&mut self, parametric: bool) {
        self.parametric = parametric;
    }

    /// Disable circle-derived regions. Tests use this with `push_region`
    /// to drive the resolver with arbitrary region sets, including sketches
    /// so decorated that no fragment combination matches the circle.
    pub fn set_region_derivation(&mut self, enabled: bool) {
        self.derive_regions = enabled;
        self.recompute_regions();
    }

    /// Inject a synthetic region with fixed properties.
    pub fn push_region(&mut self, sketch: SketchId, props: RegionProps) -> RegionId {
        let id = RegionId(self.alloc_id());
        self.synthetic.push((id, sketch, props));
        id
    }

    pub fn bores(&self) -> &[MockBore] {
        &self.bores
    }

    pub fn chamfers(&self) -> &[(EdgeId, f64)] {
        &self.chamfers
    }

    pub fn fillets(&self) -> &[(EdgeId, f64, bool)] {
        &self.fillets
    }

    pub fn live_circle_count(&self) -> usize {
        self.circles.len()
    }

    /// How many live circles carry the concentric constraint.
    pub fn constrained_circle_count(&self) -> usize {
        self.circles.iter().filter(|c| c.constrained).count()
    }

    pub fn group_labels(&self) -> Vec<&str> {
        self.groups.iter().map(|(_, _, label)| label.as_str()).collect()
    }

    fn find_region(&self, region: RegionId) -> Option<(SketchId, RegionProps)> {
        self.derived
            .iter()
            .chain(self.synthetic.iter())
            .find(|(id, _, _)| *id == region)
            .map(|(_, sketch, props)| (*sketch, *props))
    }

    /// Rebuild the derived region set from the live circles.
    ///
    /// Isolated circles become discs. A pair of overlapping circles becomes
    /// two crescents and a lens. Components of three or more overlapping
    /// circles are not modeled and fall back to per-circle discs.
    fn recompute_regions(&mut self) {
        self.derived.clear();
        if !self.derive_regions {
            return;
        }

        let circles = self.circles.clone();
        let n = circles.len();

        // Connected components under pairwise overlap, per sketch.
        let mut component: Vec<usize> = (0..n).collect();
        for i in 0..n {
            for j in (i + 1)..n {
                if circles[i].sketch == circles[j].sketch
                    && circles_overlap(&circles[i], &circles[j])
                {
                    let (ci, cj) = (component[i], component[j]);
                    let target = ci.min(cj);
                    for c in component.iter_mut() {
                        if *c == ci || *c == cj {
                            *c = target;
                        }
                    }
                }
            }
        }

        let mut roots: Vec<usize> = component.clone();
        roots.sort_unstable();
        roots.dedup();

        for root in roots {
            let members: Vec<&MockCircle> = (0..n)
                .filter(|&i| component[i] == root)
                .map(|i| &circles[i])
                .collect();

            let fragments: Vec<(SketchId, RegionProps)> = if members.len() == 2 {
                let sketch = members[0].sketch;
                two_circle_fragments(members[0], members[1])
                    .into_iter()
                    .map(|props| (sketch, props))
                    .collect()
            } else {
                members.iter().map(|c| (c.sketch, disc_region(c))).collect()
            };

            for (sketch, props) in fragments {
                let id = RegionId(self.alloc_id());
                self.derived.push((id, sketch, props));
            }
        }
    }

    /// Whether a world point lies inside one of the committed bore cavities.
    fn in_bore_cavity(&self, p: [f64; 3]) -> bool {
        for bore in &self.bores {
            let rel = sub(p, bore.axis_origin);
            let s = dot(rel, bore.axis_dir);
            if s <= EPS || s >= bore.depth - EPS {
                continue;
            }
            let radial_vec = sub(rel, scale(bore.axis_dir, s));
            if dot(radial_vec, radial_vec).sqrt() < bore.radius - EPS {
                return true;
            }
        }
        false
    }

    /// Distance along a unit direction from `origin` to where the ray
    /// leaves the plate box. None if the ray never passes through the box.
    fn ray_exit_distance(&self, origin: [f64; 3], dir: [f64; 3]) -> Option<f64> {
        let mut t_exit = f64::INFINITY;
        for axis in 0..3 {
            if dir[axis].abs() < EPS {
                if origin[axis] < self.plate_min[axis] - EPS
                    || origin[axis] > self.plate_max[axis] + EPS
                {
                    return None;
                }
                continue;
            }
            let far = if dir[axis] > 0.0 {
                self.plate_max[axis]
            } else {
                self.plate_min[axis]
            };
            t_exit = t_exit.min((far - origin[axis]) / dir[axis]);
        }
        if t_exit.is_finite() && t_exit > 0.0 {
            Some(t_exit)
        } else {
            None
        }
    }
}

fn circles_overlap(a: &MockCircle, b: &MockCircle) -> bool {
    let dx = b.center[0] - a.center[0];
    let dy = b.center[1] - a.center[1];
    let d = (dx * dx + dy * dy).sqrt();
    d < a.radius + b.radius - EPS && d > (a.radius - b.radius).abs() + EPS
}

fn disc_region(c: &MockCircle) -> RegionProps {
    RegionProps {
        area: circle_area(c.radius),
        centroid: c.center,
        bbox: BoundingBox2::of_circle(c.center, c.radius, 0.0),
    }
}

fn bbox_intersection(a: &BoundingBox2, b: &BoundingBox2) -> BoundingBox2 {
    BoundingBox2::new(
        [a.min[0].max(b.min[0]), a.min[1].max(b.min[1])],
        [a.max[0].min(b.max[0]), a.max[1].min(b.max[1])],
    )
}

/// Fragment two overlapping circles into [crescent A, crescent B, lens].
///
/// Areas come from the exact circular-segment formula. The lens centroid is
/// placed on the center line at the chord position, which is exact for
/// equal radii (the only case batches produce: one insert size per batch);
/// crescent centroids follow by moment subtraction.
fn two_circle_fragments(a: &MockCircle, b: &MockCircle) -> Vec<RegionProps> {
    let (ra, rb) = (a.radius, b.radius);
    let delta = [b.center[0] - a.center[0], b.center[1] - a.center[1]];
    let d = (delta[0] * delta[0] + delta[1] * delta[1]).sqrt();
    let u = [delta[0] / d, delta[1] / d];

    // Chord offset from circle A's center along the center line.
    let x = (d * d + ra * ra - rb * rb) / (2.0 * d);
    let xb = d - x;

    let seg = |r: f64, h: f64| -> f64 {
        let cos = (h / r).clamp(-1.0, 1.0);
        r * r * cos.acos() - h * (r * r - h * h).max(0.0).sqrt()
    };
    let lens_area = seg(ra, x) + seg(rb, xb);

    let area_a = circle_area(ra) - lens_area;
    let area_b = circle_area(rb) - lens_area;

    let lens_centroid = [a.center[0] + u[0] * x, a.center[1] + u[1] * x];
    let crescent_centroid = |full: f64, c: [f64; 2], rest: f64| -> [f64; 2] {
        [
            (full * c[0] - lens_area * lens_centroid[0]) / rest,
            (full * c[1] - lens_area * lens_centroid[1]) / rest,
        ]
    };

    let bbox_a = BoundingBox2::of_circle(a.center, ra, 0.0);
    let bbox_b = BoundingBox2::of_circle(b.center, rb, 0.0);

    vec![
        RegionProps {
            area: area_a,
            centroid: crescent_centroid(circle_area(ra), a.center, area_a),
            bbox: bbox_a,
        },
        RegionProps {
            area: area_b,
            centroid: crescent_centroid(circle_area(rb), b.center, area_b),
            bbox: bbox_b,
        },
        RegionProps {
            area: lens_area,
            centroid: lens_centroid,
            bbox: bbox_intersection(&bbox_a, &bbox_b),
        },
    ]
}

impl HostKernel for MockKernel {
    fn construct_circle(
        &mut self,
        sketch: SketchId,
        center: [f64; 2],
        radius: f64,
    ) -> Result<CircleId, KernelError> {
        if !self.sketches.contains_key(&sketch.0) {
            return Err(KernelError::EntityNotFound { id: sketch.0 });
        }
        if radius <= 0.0 {
            return Err(KernelError::InvalidParameter {
                reason: "circle radius must be positive".to_string(),
            });
        }
        let id = CircleId(self.alloc_id());
        self.circles.push(MockCircle {
            id,
            sketch,
            center,
            radius,
            constrained: false,
        });
        self.recompute_regions();
        Ok(id)
    }

    fn constrain_concentric(&mut self, circle: CircleId) -> Result<(), KernelError> {
        match self.circles.iter_mut().find(|c| c.id == circle) {
            Some(c) => {
                c.constrained = true;
                Ok(())
            }
            None => Err(KernelError::EntityNotFound { id: circle.0 }),
        }
    }

    fn delete_circle(&mut self, circle: CircleId) -> Result<(), KernelError> {
        let before = self.circles.len();
        self.circles.retain(|c| c.id != circle);
        if self.circles.len() == before {
            return Err(KernelError::EntityNotFound { id: circle.0 });
        }
        self.recompute_regions();
        Ok(())
    }

    fn cut_regions(
        &mut self,
        body: &BodyHandle,
        regions: &[RegionId],
        direction: ExtentDirection,
        depth: f64,
    ) -> Result<FeatureId, KernelError> {
        if body.id() != self.body.id() {
            return Err(KernelError::EntityNotFound { id: body.id() });
        }
        if regions.is_empty() {
            return Err(KernelError::CutFailed {
                reason: "no regions to cut".to_string(),
            });
        }
        if depth <= 0.0 {
            return Err(KernelError::InvalidParameter {
                reason: "cut depth must be positive".to_string(),
            });
        }

        let mut total_area = 0.0;
        let mut weighted = [0.0, 0.0];
        let mut sketch = None;
        for region in regions {
            let (region_sketch, props) = self
                .find_region(*region)
                .ok_or(KernelError::EntityNotFound { id: region.0 })?;
            match sketch {
                None => sketch = Some(region_sketch),
                Some(s) if s == region_sketch => {}
                Some(_) => {
                    return Err(KernelError::CutFailed {
                        reason: "regions span multiple sketches".to_string(),
                    })
                }
            }
            total_area += props.area;
            weighted[0] += props.area * props.centroid[0];
            weighted[1] += props.area * props.centroid[1];
        }
        let Some(sketch) = sketch else {
            return Err(KernelError::CutFailed {
                reason: "no regions to cut".to_string(),
            });
        };
        let plane = self.sketches[&sketch.0];
        let centroid = [weighted[0] / total_area, weighted[1] / total_area];

        // Reconstruct the bore from the combined regions: the area-weighted
        // centroid of a fragment set that tiles a disc is the disc center.
        let radius = (total_area / std::f64::consts::PI).sqrt();
        let axis_origin = plane.to_world(centroid);
        let axis_dir = scale(plane.normal, direction.sign());

        let exit = self.ray_exit_distance(axis_origin, axis_dir);
        let far_distance = match exit {
            Some(t) if depth >= t - EPS => t,
            _ => depth,
        };
        let through = exit.map_or(false, |t| depth >= t - EPS);

        let entry_edge = EdgeId(self.alloc_id());
        let far_edge = EdgeId(self.alloc_id());
        self.circular_edges.push((
            entry_edge,
            CircularEdge {
                center: axis_origin,
                radius,
                normal: plane.normal,
            },
        ));
        self.circular_edges.push((
            far_edge,
            CircularEdge {
                center: add(axis_origin, scale(axis_dir, far_distance)),
                radius,
                normal: plane.normal,
            },
        ));

        self.bores.push(MockBore {
            axis_origin,
            direction,
            radius,
            depth,
            through,
            entry_edge,
            far_edge,
            axis_dir,
        });
        self.timeline_len += 1;
        Ok(FeatureId(self.alloc_id()))
    }

    fn chamfer_edge(&mut self, edge: EdgeId, distance: f64) -> Result<FeatureId, KernelError> {
        if distance <= 0.0 {
            return Err(KernelError::ChamferFailed {
                reason: "chamfer distance must be positive".to_string(),
            });
        }
        if !self.circular_edges.iter().any(|(id, _)| *id == edge) {
            return Err(KernelError::EntityNotFound { id: edge.0 });
        }
        self.chamfers.push((edge, distance));
        self.timeline_len += 1;
        Ok(FeatureId(self.alloc_id()))
    }

    fn fillet_edge(
        &mut self,
        edge: EdgeId,
        radius: f64,
        tangent_chain: bool,
    ) -> Result<FeatureId, KernelError> {
        if radius <= 0.0 {
            return Err(KernelError::FilletFailed {
                reason: "fillet radius must be positive".to_string(),
            });
        }
        if !self.circular_edges.iter().any(|(id, _)| *id == edge) {
            return Err(KernelError::EntityNotFound { id: edge.0 });
        }
        self.fillets.push((edge, radius, tangent_chain));
        self.timeline_len += 1;
        Ok(FeatureId(self.alloc_id()))
    }

    fn group_timeline(
        &mut self,
        start: TimelineMarker,
        end: TimelineMarker,
        label: &str,
    ) -> Result<(), KernelError> {
        if !self.parametric {
            return Err(KernelError::NotSupported {
                operation: "timeline grouping in direct modeling mode".to_string(),
            });
        }
        if start > end || end.0 > self.timeline_len {
            return Err(KernelError::InvalidParameter {
                reason: format!("bad timeline range {}..{}", start.0, end.0),
            });
        }
        self.groups.push((start, end, label.to_string()));
        Ok(())
    }
}

impl HostQueries for MockKernel {
    fn sketch_plane(&self, sketch: SketchId) -> Option<SketchPlane> {
        self.sketches.get(&sketch.0).copied()
    }

    fn regions_on_plane(&self, sketch: SketchId) -> Vec<RegionId> {
        self.derived
            .iter()
            .chain(self.synthetic.iter())
            .filter(|(_, s, _)| *s == sketch)
            .map(|(id, _, _)| *id)
            .collect()
    }

    fn region_props(&self, region: RegionId) -> Option<RegionProps> {
        self.find_region(region).map(|(_, props)| props)
    }

    fn point_containment(&self, body: &BodyHandle, point: [f64; 3]) -> Containment {
        if body.id() != self.body.id() {
            return Containment::Outside;
        }
        if self.in_bore_cavity(point) {
            return Containment::Outside;
        }

        let mut on_surface = false;
        for axis in 0..3 {
            if point[axis] < self.plate_min[axis] - EPS || point[axis] > self.plate_max[axis] + EPS
            {
                return Containment::Outside;
            }
            if (point[axis] - self.plate_min[axis]).abs() <= EPS
                || (point[axis] - self.plate_max[axis]).abs() <= EPS
            {
                on_surface = true;
            }
        }
        if on_surface {
            Containment::OnSurface
        } else {
            Containment::Inside
        }
    }

    fn edges_of(&self, body: &BodyHandle) -> Vec<EdgeId> {
        if body.id() != self.body.id() {
            return Vec::new();
        }
        self.line_edges
            .iter()
            .copied()
            .chain(self.circular_edges.iter().map(|(id, _)| *id))
            .collect()
    }

    fn edge_curve(&self, edge: EdgeId) -> CurveGeometry {
        if self.line_edges.contains(&edge) {
            return CurveGeometry::Line;
        }
        match self.circular_edges.iter().find(|(id, _)| *id == edge) {
            Some((_, circ)) => CurveGeometry::Circle {
                center: circ.center,
                radius: circ.radius,
                normal: circ.normal,
            },
            None => CurveGeometry::Other,
        }
    }

    fn timeline_marker(&self) -> TimelineMarker {
        TimelineMarker(self.timeline_len)
    }
}
