use insert_types::SketchPlane;

use crate::types::*;

/// Mutating feature-creation commands on the host kernel.
///
/// Implemented by the production host adapter and by [`crate::MockKernel`].
/// All lengths are centimeters.
pub trait HostKernel {
    /// Place a construction circle on a sketch.
    fn construct_circle(
        &mut self,
        sketch: SketchId,
        center: [f64; 2],
        radius: f64,
    ) -> Result<CircleId, KernelError>;

    /// Constrain a constructed circle concentric to its anchor point, so
    /// the bore follows later sketch edits.
    fn constrain_concentric(&mut self, circle: CircleId) -> Result<(), KernelError>;

    /// Remove a constructed circle. Used to retract geometry when a point
    /// fails downstream.
    fn delete_circle(&mut self, circle: CircleId) -> Result<(), KernelError>;

    /// Cut the given planar regions into the body along one side of the
    /// sketch plane, to the given depth.
    fn cut_regions(
        &mut self,
        body: &BodyHandle,
        regions: &[RegionId],
        direction: ExtentDirection,
        depth: f64,
    ) -> Result<FeatureId, KernelError>;

    /// Chamfer a single edge with an equal-distance chamfer.
    fn chamfer_edge(&mut self, edge: EdgeId, distance: f64) -> Result<FeatureId, KernelError>;

    /// Fillet a single edge with a constant radius.
    fn fillet_edge(
        &mut self,
        edge: EdgeId,
        radius: f64,
        tangent_chain: bool,
    ) -> Result<FeatureId, KernelError>;

    /// Wrap the timeline range [start, end) in one named, collapsible
    /// group. Best-effort: direct-modeling hosts may not support it.
    fn group_timeline(
        &mut self,
        start: TimelineMarker,
        end: TimelineMarker,
        label: &str,
    ) -> Result<(), KernelError>;
}

/// Read-only geometric oracle queries on the host kernel.
pub trait HostQueries {
    /// The plane a sketch lies on, for lifting 2D anchors to world space.
    fn sketch_plane(&self, sketch: SketchId) -> Option<SketchPlane>;

    /// All bounded planar regions currently on a sketch plane.
    fn regions_on_plane(&self, sketch: SketchId) -> Vec<RegionId>;

    /// Area, centroid, and bounds of a region.
    fn region_props(&self, region: RegionId) -> Option<RegionProps>;

    /// Classify a world point against a body.
    fn point_containment(&self, body: &BodyHandle, point: [f64; 3]) -> Containment;

    /// All edges of a body.
    fn edges_of(&self, body: &BodyHandle) -> Vec<EdgeId>;

    /// Curve classification of an edge.
    fn edge_curve(&self, edge: EdgeId) -> CurveGeometry;

    /// Current timeline position.
    fn timeline_marker(&self) -> TimelineMarker;
}
