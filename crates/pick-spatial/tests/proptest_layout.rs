//! Property-based tests for layout geometry.
//!
//! Run with: cargo test -p pick-spatial -- proptest

use pick_spatial::{CellGrid, FloorGeometry, FloorLayout, LayoutConfig, Point3, RackUnit};
use proptest::prelude::*;

/// A rack somewhere on a 100x100 floor, with a random rotation.
fn arb_unit() -> impl Strategy<Value = RackUnit> {
    (
        0.0..100.0f64,
        0.0..100.0f64,
        0.5..12.0f64,
        0.5..3.0f64,
        -7.0..7.0f64,
    )
        .prop_map(|(x, z, w, d, rot)| {
            RackUnit::new(Point3::new(x, 0.0, z), w, d)
                .with_rotation(rot)
        })
}

fn arb_layout() -> impl Strategy<Value = FloorLayout> {
    prop::collection::vec(arb_unit(), 1..12)
        .prop_map(|units| FloorLayout { floor: 1, units })
}

proptest! {
    #[test]
    fn proptest_bounds_cover_every_footprint(layout in arb_layout()) {
        let geometry = FloorGeometry::build(&layout, &LayoutConfig::default())
            .unwrap()
            .unwrap();
        let bounds = geometry.bounds();
        for unit in &layout.units {
            let fp = unit.footprint();
            prop_assert!(fp.min_x >= bounds.min_x && fp.max_x <= bounds.max_x);
            prop_assert!(fp.min_z >= bounds.min_z && fp.max_z <= bounds.max_z);
        }
    }

    #[test]
    fn proptest_obstacles_contain_their_footprint(layout in arb_layout()) {
        let geometry = FloorGeometry::build(&layout, &LayoutConfig::default())
            .unwrap()
            .unwrap();
        prop_assert_eq!(geometry.obstacles().len(), layout.units.len());
        for (unit, obstacle) in layout.units.iter().zip(geometry.obstacles()) {
            let fp = unit.footprint();
            prop_assert!(obstacle.min_x <= fp.min_x && obstacle.max_x >= fp.max_x);
            prop_assert!(obstacle.min_z <= fp.min_z && obstacle.max_z >= fp.max_z);
        }
    }

    #[test]
    fn proptest_rasterized_cells_agree_with_geometry(layout in arb_layout(), x in -5i32..105, z in -5i32..105) {
        let geometry = FloorGeometry::build(&layout, &LayoutConfig::default())
            .unwrap()
            .unwrap();
        let grid = CellGrid::from_floor(&geometry, 0.5);
        let cell = pick_spatial::GridCell::new(x, z);
        prop_assert_eq!(
            grid.is_blocked(cell),
            geometry.is_blocked_xz(f64::from(x), f64::from(z), 0.5)
        );
    }
}
