//! Resolve which planar regions a constructed circle should cut.
//!
//! On a clean face the circle encloses exactly one disc region. Sketches
//! decorated with other curves fragment that disc into several regions, so
//! the resolver searches for the combination of region fragments whose
//! areas sum back to the circle's area.

use insert_types::{circle_area, BoundingBox2};
use kernel_adapter::{HostQueries, RegionId, RegionProps, SketchId};
use tracing::{debug, warn};

/// Coarse filter slack: a candidate may exceed the circle area by 1%.
const AREA_SLACK: f64 = 0.01;
/// A combined area within 0.003% of the target stops the search.
const EXACT_TOL: f64 = 0.00003;
/// A combined area within 3% of the target is accepted.
const ACCEPT_TOL: f64 = 0.03;
/// Combination search is exponential; cap the candidate set.
const MAX_CANDIDATES: usize = 15;

/// The circle to match regions against, in sketch coordinates (cm).
#[derive(Debug, Clone, Copy)]
pub struct CircleSpec {
    pub center: [f64; 2],
    pub radius: f64,
}

/// The region set a cut should consume for one circle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedCutRegion {
    /// One region matched the circle on its own.
    Single(RegionId),
    /// Several fragments together tile the circle.
    Group(Vec<RegionId>),
}

impl ResolvedCutRegion {
    pub fn region_ids(&self) -> Vec<RegionId> {
        match self {
            ResolvedCutRegion::Single(id) => vec![*id],
            ResolvedCutRegion::Group(ids) => ids.clone(),
        }
    }
}

/// Find the region(s) enclosed by `circle` on `sketch`.
///
/// Candidates pass three coarse filters (area not larger than the circle's,
/// centroid within one radius of the center, bounds within the circle's
/// bounds grown by one radius), then combinations of the survivors are
/// tried in increasing size until one sums to within [`ACCEPT_TOL`] of the
/// circle area. Returns None when nothing combines closely enough.
pub fn resolve_cut_region(
    queries: &dyn HostQueries,
    sketch: SketchId,
    circle: &CircleSpec,
) -> Option<ResolvedCutRegion> {
    let target = circle_area(circle.radius);
    let bounds = BoundingBox2::of_circle(circle.center, circle.radius, circle.radius);

    let mut candidates: Vec<(RegionId, RegionProps)> = queries
        .regions_on_plane(sketch)
        .into_iter()
        .filter_map(|id| queries.region_props(id).map(|props| (id, props)))
        .filter(|(_, props)| props.area <= target * (1.0 + AREA_SLACK))
        .filter(|(_, props)| {
            let dx = props.centroid[0] - circle.center[0];
            let dy = props.centroid[1] - circle.center[1];
            (dx * dx + dy * dy).sqrt() <= circle.radius
        })
        .filter(|(_, props)| bounds.contains(&props.bbox))
        .collect();

    if candidates.is_empty() {
        debug!(radius = circle.radius, "no candidate regions for circle");
        return None;
    }

    // Largest first, so single-region matches and near-full combinations
    // are tried before long tails of slivers.
    candidates.sort_by(|a, b| b.1.area.total_cmp(&a.1.area));
    if candidates.len() > MAX_CANDIDATES {
        warn!(
            candidates = candidates.len(),
            kept = MAX_CANDIDATES,
            "truncating fragment candidates for combination search"
        );
        candidates.truncate(MAX_CANDIDATES);
    }

    let mut search = CombinationSearch {
        candidates: &candidates,
        target,
        best: None,
        chosen: Vec::new(),
    };
    search.run();

    let (ids, diff) = search.best?;
    if diff > target * ACCEPT_TOL {
        debug!(
            diff,
            target, "best fragment combination outside acceptance window"
        );
        return None;
    }

    debug!(regions = ids.len(), diff, "resolved cut region");
    Some(if ids.len() == 1 {
        ResolvedCutRegion::Single(ids[0])
    } else {
        ResolvedCutRegion::Group(ids)
    })
}

struct CombinationSearch<'a> {
    candidates: &'a [(RegionId, RegionProps)],
    target: f64,
    best: Option<(Vec<RegionId>, f64)>,
    chosen: Vec<RegionId>,
}

impl CombinationSearch<'_> {
    /// Enumerate combinations in increasing size, so an exact-enough match
    /// of a small fragment set wins before any larger set is considered.
    fn run(&mut self) {
        for size in 1..=self.candidates.len() {
            if self.run_size(size, 0, 0.0) {
                return;
            }
        }
    }

    /// All combinations of exactly `size` elements drawn from
    /// candidates[from..], with the running area in `sum`. Returns true
    /// once an exact-enough match is found, which unwinds the whole search.
    fn run_size(&mut self, size: usize, from: usize, sum: f64) -> bool {
        if self.chosen.len() == size {
            let diff = (self.target - sum).abs();
            let improved = match &self.best {
                Some((_, best_diff)) => diff < *best_diff,
                None => true,
            };
            if improved {
                self.best = Some((self.chosen.clone(), diff));
            }
            return diff <= self.target * EXACT_TOL;
        }

        let needed = size - self.chosen.len();
        for i in from..self.candidates.len() {
            if self.candidates.len() - i < needed {
                break;
            }
            let (id, props) = self.candidates[i];
            let total = sum + props.area;
            if total > self.target * (1.0 + ACCEPT_TOL) {
                // Overshot; later candidates are smaller, so keep scanning.
                continue;
            }
            self.chosen.push(id);
            if self.run_size(size, i + 1, total) {
                return true;
            }
            self.chosen.pop();
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insert_types::geometry::BoundingBox2;
    use kernel_adapter::{MockKernel, RegionProps};

    fn region_at(center: [f64; 2], area: f64) -> RegionProps {
        RegionProps {
            area,
            centroid: center,
            bbox: BoundingBox2::of_circle(center, 0.01, 0.0),
        }
    }

    #[test]
    fn coarse_filters_reject_far_and_oversized_regions() {
        let (mut kernel, _body, sketch) = MockKernel::with_plate(5.0, 5.0, 1.0);
        kernel.set_region_derivation(false);

        let target = circle_area(0.2);
        // Oversized, off-center, and out-of-bounds decoys.
        kernel.push_region(sketch, region_at([2.5, 2.5], target * 1.05));
        kernel.push_region(sketch, region_at([2.5, 3.0], target));
        kernel.push_region(
            sketch,
            RegionProps {
                area: target,
                centroid: [2.5, 2.5],
                bbox: BoundingBox2::new([1.0, 1.0], [4.0, 4.0]),
            },
        );

        let circle = CircleSpec {
            center: [2.5, 2.5],
            radius: 0.2,
        };
        assert_eq!(resolve_cut_region(&kernel, sketch, &circle), None);
    }

    #[test]
    fn prefers_exact_single_over_loose_combination() {
        let (mut kernel, _body, sketch) = MockKernel::with_plate(5.0, 5.0, 1.0);
        kernel.set_region_derivation(false);

        let target = circle_area(0.2);
        kernel.push_region(sketch, region_at([2.5, 2.5], target * 0.52));
        let exact = kernel.push_region(sketch, region_at([2.5, 2.5], target));
        kernel.push_region(sketch, region_at([2.5, 2.5], target * 0.47));

        let circle = CircleSpec {
            center: [2.5, 2.5],
            radius: 0.2,
        };
        assert_eq!(
            resolve_cut_region(&kernel, sketch, &circle),
            Some(ResolvedCutRegion::Single(exact))
        );
    }

    #[test]
    fn acceptance_window_is_three_percent() {
        let circle = CircleSpec {
            center: [2.5, 2.5],
            radius: 0.2,
        };
        let target = circle_area(0.2);

        let (mut kernel, _body, sketch) = MockKernel::with_plate(5.0, 5.0, 1.0);
        kernel.set_region_derivation(false);
        let near = kernel.push_region(sketch, region_at([2.5, 2.5], target * (1.0 - 0.0299)));
        assert_eq!(
            resolve_cut_region(&kernel, sketch, &circle),
            Some(ResolvedCutRegion::Single(near))
        );

        let (mut kernel, _body, sketch) = MockKernel::with_plate(5.0, 5.0, 1.0);
        kernel.set_region_derivation(false);
        kernel.push_region(sketch, region_at([2.5, 2.5], target * (1.0 - 0.031)));
        assert_eq!(resolve_cut_region(&kernel, sketch, &circle), None);
    }

    #[test]
    fn exact_pair_wins_before_larger_combinations_are_tried() {
        let (mut kernel, _body, sketch) = MockKernel::with_plate(5.0, 5.0, 1.0);
        kernel.set_region_derivation(false);

        let target = circle_area(0.2);
        let big = kernel.push_region(sketch, region_at([2.5, 2.5], target * 0.6));
        kernel.push_region(sketch, region_at([2.5, 2.5], target * 0.55));
        let small = kernel.push_region(sketch, region_at([2.5, 2.5], target * 0.4));
        kernel.push_region(sketch, region_at([2.5, 2.5], target * 0.35));

        let circle = CircleSpec {
            center: [2.5, 2.5],
            radius: 0.2,
        };
        // {0.6, 0.4} sums exactly to the target; the search must stop there
        // rather than go on to three-element combinations.
        assert_eq!(
            resolve_cut_region(&kernel, sketch, &circle),
            Some(ResolvedCutRegion::Group(vec![big, small]))
        );
    }

    #[test]
    fn minimal_combination_beats_equally_exact_larger_one() {
        let (mut kernel, _body, sketch) = MockKernel::with_plate(5.0, 5.0, 1.0);
        kernel.set_region_derivation(false);

        // Both {0.55, 0.45} and {0.6, 0.25, 0.15} sum exactly to the
        // target; the pair must win because smaller sizes are tried first.
        let target = circle_area(0.2);
        kernel.push_region(sketch, region_at([2.5, 2.5], target * 0.6));
        let a = kernel.push_region(sketch, region_at([2.5, 2.5], target * 0.55));
        let b = kernel.push_region(sketch, region_at([2.5, 2.5], target * 0.45));
        kernel.push_region(sketch, region_at([2.5, 2.5], target * 0.25));
        kernel.push_region(sketch, region_at([2.5, 2.5], target * 0.15));

        let circle = CircleSpec {
            center: [2.5, 2.5],
            radius: 0.2,
        };
        assert_eq!(
            resolve_cut_region(&kernel, sketch, &circle),
            Some(ResolvedCutRegion::Group(vec![a, b]))
        );
    }
}
