//! Locate the circular edges a bore produces, for chamfering and filleting.
//!
//! After a cut the host only offers the body's full edge list, so the bore
//! mouth and bottom must be found again by geometry: circular edges with
//! the bore's radius, coaxial with the bore, picked by axial distance from
//! the sketch plane.

use insert_types::geometry::{dot, length, scale, sub};
use kernel_adapter::{BodyHandle, CurveGeometry, EdgeId, HostQueries};
use tracing::debug;

/// Which bore edge to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSearchMode {
    /// The bore mouth on the sketch plane; nearest coaxial edge wins.
    /// Tolerances are tight because the mouth is uncut geometry.
    Entry,
    /// The bottom of a blind bore; farthest coaxial edge wins. Tolerances
    /// are looser because a prior chamfer may have displaced the mouth
    /// edges that must still be excluded by the radius filter.
    Bottom,
}

struct SearchParams {
    radius_tol: f64,
    min_normal_dot: f64,
    axis_tol: f64,
}

impl EdgeSearchMode {
    fn params(self) -> SearchParams {
        match self {
            EdgeSearchMode::Entry => SearchParams {
                radius_tol: 0.001,
                min_normal_dot: 0.99,
                axis_tol: 0.01,
            },
            EdgeSearchMode::Bottom => SearchParams {
                radius_tol: 0.005,
                min_normal_dot: 0.95,
                axis_tol: 0.05,
            },
        }
    }
}

/// Find the circular edge of a bore on `body`.
///
/// The bore is described by a point on its axis (`axis_origin`, where the
/// axis crosses the sketch plane), the unit plane normal, and the expected
/// edge radius. Nearby bores from the same batch are rejected by the
/// axis-distance filter.
pub fn find_bore_edge(
    queries: &dyn HostQueries,
    body: &BodyHandle,
    axis_origin: [f64; 3],
    axis_normal: [f64; 3],
    expected_radius: f64,
    mode: EdgeSearchMode,
) -> Option<EdgeId> {
    let params = mode.params();
    let mut best: Option<(EdgeId, f64)> = None;

    for edge in queries.edges_of(body) {
        let CurveGeometry::Circle {
            center,
            radius,
            normal,
        } = queries.edge_curve(edge)
        else {
            continue;
        };

        if (radius - expected_radius).abs() > params.radius_tol {
            continue;
        }
        // Orientation check ignores sign: hosts flip edge normals freely.
        if dot(normal, axis_normal).abs() < params.min_normal_dot {
            continue;
        }

        let rel = sub(center, axis_origin);
        let axial = dot(rel, axis_normal);
        let radial = length(sub(rel, scale(axis_normal, axial)));
        if radial > params.axis_tol {
            continue;
        }

        let distance = axial.abs();
        let better = match (best, mode) {
            (None, _) => true,
            (Some((_, d)), EdgeSearchMode::Entry) => distance < d,
            (Some((_, d)), EdgeSearchMode::Bottom) => distance > d,
        };
        if better {
            best = Some((edge, distance));
        }
    }

    if best.is_none() {
        debug!(expected_radius, ?mode, "no matching circular edge on body");
    }
    best.map(|(edge, _)| edge)
}
