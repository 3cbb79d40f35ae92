//! Maps an annotation's image-space box to the region it most likely refers to.
//!
//! Two phases:
//!
//! 1. **Overlap** -- every region whose box strictly overlaps the annotation
//!    box is a candidate. If there is at least one, the nearest-center
//!    fallback is never consulted.
//! 2. **Nearest center** -- with no overlap, the region whose center is
//!    closest (Euclidean) to the annotation center is the only candidate.
//!
//! The highest-importance candidate wins. Ties at the same tier, and
//! equidistant nearest-center candidates, go to the region declared first in
//! the [`ImageRegionSet`].

use std::cmp::Reverse;

use crate::geometry::BoundingBox;
use crate::region::{ImageRegionSet, Region};

/// Which phase produced a [`Resolution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMethod {
    Overlap,
    NearestCenter,
}

/// The primary region chosen for one annotation box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution<'a> {
    pub region: &'a Region,
    pub method: MatchMethod,
}

/// Resolve `bbox` against `regions`. Always yields exactly one region.
pub fn resolve<'a>(bbox: &BoundingBox, regions: &'a ImageRegionSet) -> Resolution<'a> {
    let overlapping: Vec<&Region> = regions
        .regions()
        .iter()
        .filter(|r| bbox.overlaps(&r.bbox))
        .collect();

    match most_important(&overlapping) {
        Some(region) => Resolution {
            region,
            method: MatchMethod::Overlap,
        },
        None => Resolution {
            region: nearest_by_center(bbox, regions),
            method: MatchMethod::NearestCenter,
        },
    }
}

/// Highest-importance region; the earliest one wins a tie.
///
/// `min_by_key` returns the first of several equal minima, which is what
/// makes the tie-break follow declaration order.
pub fn most_important<'a>(candidates: &[&'a Region]) -> Option<&'a Region> {
    candidates
        .iter()
        .copied()
        .min_by_key(|r| Reverse(r.importance))
}

/// Region whose center is closest to the center of `bbox`; the earliest one
/// wins a tie.
pub fn nearest_by_center<'a>(bbox: &BoundingBox, regions: &'a ImageRegionSet) -> &'a Region {
    let mut nearest = regions.first();
    let mut best = f64::INFINITY;
    for region in regions.regions() {
        let distance = bbox.center_distance(&region.bbox);
        if distance < best {
            best = distance;
            nearest = region;
        }
    }
    nearest
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{RegionCatalog, DEFAULT_IMAGE, NO_BENCH_IMAGE};
    use crate::region::Importance;

    fn region(name: &str, bbox: [f64; 4], importance: Importance) -> Region {
        Region::new(name, name, bbox.into(), importance)
    }

    fn set(regions: Vec<Region>) -> ImageRegionSet {
        ImageRegionSet::new(1000, 1000, regions).unwrap()
    }

    #[test]
    fn single_overlap_selected() {
        let regions = set(vec![
            region("left", [0.0, 0.0, 100.0, 100.0], Importance::Low),
            region("right", [200.0, 0.0, 300.0, 100.0], Importance::Critical),
        ]);
        let res = resolve(&BoundingBox::new(10.0, 10.0, 20.0, 20.0), &regions);
        assert_eq!(res.region.name, "left");
        assert_eq!(res.method, MatchMethod::Overlap);
    }

    #[test]
    fn critical_beats_low_regardless_of_order() {
        let low_first = set(vec![
            region("low", [0.0, 0.0, 100.0, 100.0], Importance::Low),
            region("crit", [50.0, 50.0, 150.0, 150.0], Importance::Critical),
        ]);
        let crit_first = set(vec![
            region("crit", [50.0, 50.0, 150.0, 150.0], Importance::Critical),
            region("low", [0.0, 0.0, 100.0, 100.0], Importance::Low),
        ]);
        let bbox = BoundingBox::new(60.0, 60.0, 90.0, 90.0);
        assert_eq!(resolve(&bbox, &low_first).region.name, "crit");
        assert_eq!(resolve(&bbox, &crit_first).region.name, "crit");
    }

    #[test]
    fn same_tier_tie_goes_to_first_declared() {
        let regions = set(vec![
            region("first", [0.0, 0.0, 100.0, 100.0], Importance::High),
            region("second", [0.0, 0.0, 100.0, 100.0], Importance::High),
        ]);
        let res = resolve(&BoundingBox::new(10.0, 10.0, 20.0, 20.0), &regions);
        assert_eq!(res.region.name, "first");
    }

    #[test]
    fn overlap_takes_precedence_over_closer_center() {
        // The box barely overlaps the far region's corner while sitting right
        // next to the center of a small, non-overlapping region.
        let regions = set(vec![
            region("small", [120.0, 120.0, 130.0, 130.0], Importance::Critical),
            region("big", [0.0, 0.0, 101.0, 101.0], Importance::Low),
        ]);
        let bbox = BoundingBox::new(100.0, 100.0, 119.0, 119.0);
        let res = resolve(&bbox, &regions);
        assert_eq!(res.method, MatchMethod::Overlap);
        assert_eq!(res.region.name, "big");
    }

    #[test]
    fn touching_box_falls_back_to_nearest() {
        let regions = set(vec![
            region("a", [0.0, 0.0, 100.0, 100.0], Importance::Low),
            region("b", [500.0, 500.0, 600.0, 600.0], Importance::Critical),
        ]);
        let res = resolve(&BoundingBox::new(100.0, 0.0, 120.0, 20.0), &regions);
        assert_eq!(res.method, MatchMethod::NearestCenter);
        assert_eq!(res.region.name, "a");
    }

    #[test]
    fn far_outside_box_still_resolves() {
        let regions = set(vec![
            region("a", [0.0, 0.0, 100.0, 100.0], Importance::Low),
            region("b", [800.0, 800.0, 900.0, 900.0], Importance::Low),
        ]);
        let res = resolve(&BoundingBox::new(5000.0, 5000.0, 5010.0, 5010.0), &regions);
        assert_eq!(res.method, MatchMethod::NearestCenter);
        assert_eq!(res.region.name, "b");
    }

    #[test]
    fn equidistant_nearest_goes_to_first_declared() {
        let regions = set(vec![
            region("west", [0.0, 0.0, 10.0, 10.0], Importance::Low),
            region("east", [20.0, 0.0, 30.0, 10.0], Importance::High),
        ]);
        // Degenerate box at (15, 5): 10 px from both centers, overlapping neither.
        let res = resolve(&BoundingBox::new(15.0, 5.0, 15.0, 5.0), &regions);
        assert_eq!(res.region.name, "west");
    }

    // -- Built-in catalog tie-breaks -----------------------------------------

    #[test]
    fn nested_signage_beats_awning() {
        let catalog = RegionCatalog::builtin();
        let bbox = BoundingBox::new(400.0, 200.0, 500.0, 230.0);
        for image in [DEFAULT_IMAGE, NO_BENCH_IMAGE] {
            let res = resolve(&bbox, catalog.lookup(image));
            assert_eq!(res.region.name, "signage", "image {image}");
            assert_eq!(res.method, MatchMethod::Overlap);
        }
    }

    #[test]
    fn awning_beats_entrance_by_declaration_order() {
        // Spans awning (high) and entrance (high) but not signage.
        let catalog = RegionCatalog::builtin();
        let bbox = BoundingBox::new(460.0, 260.0, 500.0, 300.0);
        for image in [DEFAULT_IMAGE, NO_BENCH_IMAGE] {
            let res = resolve(&bbox, catalog.lookup(image));
            assert_eq!(res.region.name, "awning", "image {image}");
        }
    }

    #[test]
    fn trees_left_beats_sky_by_declaration_order() {
        let catalog = RegionCatalog::builtin();
        let bbox = BoundingBox::new(10.0, 105.0, 50.0, 115.0);
        let res = resolve(&bbox, catalog.lookup(DEFAULT_IMAGE));
        assert_eq!(res.region.name, "trees_left");
    }

    #[test]
    fn bench_outranks_planters() {
        let catalog = RegionCatalog::builtin();
        let bbox = BoundingBox::new(190.0, 420.0, 260.0, 460.0);
        assert_eq!(resolve(&bbox, catalog.lookup(DEFAULT_IMAGE)).region.name, "bench_people");
        assert_eq!(resolve(&bbox, catalog.lookup(NO_BENCH_IMAGE)).region.name, "bench_empty");
    }
}
