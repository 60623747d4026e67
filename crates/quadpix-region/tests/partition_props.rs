//! Property-based invariant tests for partitioning and the region tree.
//!
//! 1. A partition tiles the raster with no gap and no overlap.
//! 2. Partitioning a partition again changes nothing.
//! 3. In-order keys stay strictly increasing across deletes.
//! 4. Inserted regions are found by origin and by any inner pixel.

use proptest::prelude::*;
use quadpix_core::Pix;
use quadpix_region::{PartitionOptions, RegionTree, partition, partition_pix};

fn raster_strategy() -> impl Strategy<Value = Pix> {
    (1u32..=24, 1u32..=24).prop_flat_map(|(w, h)| {
        proptest::collection::vec(any::<u8>(), (w * h) as usize)
            .prop_map(move |data| Pix::from_bytes(w, h, data).unwrap())
    })
}

/// Blocky raster: few distinct levels, so partitions stop early
fn blocky_strategy() -> impl Strategy<Value = Pix> {
    (1u32..=32, 1u32..=32, 1u32..=8, any::<u64>()).prop_map(|(w, h, cell, seed)| {
        let data = (0..h)
            .flat_map(|y| {
                (0..w).map(move |x| {
                    let block = (x / cell) as u64 * 31 + (y / cell) as u64 * 17;
                    (seed.wrapping_mul(block + 1) >> 56) as u8
                })
            })
            .collect();
        Pix::from_bytes(w, h, data).unwrap()
    })
}

fn options_strategy() -> impl Strategy<Value = PartitionOptions> {
    (any::<u8>(), any::<bool>()).prop_map(|(t, ws)| {
        PartitionOptions::new().with_threshold(t).with_initial_wsplit(ws)
    })
}

proptest! {
    #[test]
    fn partition_tiles_raster(pix in raster_strategy(), opts in options_strategy()) {
        let tree = partition_pix(&pix, &opts).unwrap();
        let (w, h) = (pix.width(), pix.height());
        let mut hits = vec![0u8; (w * h) as usize];
        for r in tree.regions() {
            prop_assert!(r.fits_within(w, h), "region {} outside {}x{}", r, w, h);
            for y in r.ty()..r.ty() + r.height() {
                for x in r.tx()..r.tx() + r.width() {
                    hits[(y * w + x) as usize] += 1;
                }
            }
        }
        prop_assert!(hits.iter().all(|&c| c == 1), "gap or overlap in partition");
    }

    #[test]
    fn partition_leaves_are_final(pix in blocky_strategy(), opts in options_strategy()) {
        let tree = partition_pix(&pix, &opts).unwrap();
        for r in tree.regions() {
            let range = quadpix_region::intensity_range(&pix, r).unwrap();
            prop_assert!(r.is_unit() || range <= opts.threshold);
        }
    }

    #[test]
    fn partition_idempotent(pix in blocky_strategy(), opts in options_strategy()) {
        let first = partition_pix(&pix, &opts).unwrap();
        let before: Vec<_> = first.regions().copied().collect();
        let second = partition(first, &pix, opts.threshold).unwrap();
        let after: Vec<_> = second.regions().copied().collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn delete_keeps_order(
        xs in proptest::collection::vec(0u32..64, 1..48),
        dels in proptest::collection::vec(0u32..64, 0..32),
    ) {
        let mut tree = RegionTree::new(64);
        for &x in &xs {
            let _ = tree.insert(tree.region(x, 0, 1, 1, true));
        }
        for &x in &dels {
            let had = tree.search(x, 0).is_some();
            prop_assert_eq!(tree.delete(x, 0).is_some(), had);
            prop_assert!(tree.search(x, 0).is_none());
        }
        let keys: Vec<u64> = tree.regions().map(|r| r.key()).collect();
        prop_assert!(keys.windows(2).all(|k| k[0] < k[1]));
        prop_assert_eq!(keys.len(), tree.len());
    }

    #[test]
    fn locate_after_insert(
        tx in 0u32..50, ty in 0u32..50, w in 1u32..10, h in 1u32..10,
        dx in 0u32..10, dy in 0u32..10,
    ) {
        let mut tree = RegionTree::new(64);
        let region = tree.region(tx, ty, w, h, true);
        tree.insert(region).unwrap();
        prop_assert_eq!(tree.search(tx, ty), Some(&region));
        let (x, y) = (tx + dx % w, ty + dy % h);
        prop_assert_eq!(tree.locate(x, y), Some(&region));
        prop_assert!(tree.locate(tx + w, ty).is_none());
    }
}
