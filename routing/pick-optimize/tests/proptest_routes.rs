//! Property-based tests for route generation and re-planning.
//!
//! Run with: cargo test -p pick-optimize -- proptest

use std::collections::BTreeMap;

use nalgebra::Point3;
use pick_optimize::sequence::is_contiguous;
use pick_optimize::{ReplanRequest, StraightLine, generate_route, replan};
use pick_types::{BinCoordinate, BinMap, Location, OrderLine, QTY_EPSILON, StockRecord};
use proptest::prelude::*;

const MATERIALS: [&str; 4] = ["M1", "M2", "M3", "M4"];
const BINS: usize = 12;

fn bin_name(i: usize) -> String {
    format!("B-{i:02}")
}

/// Bins 0..BINS-2 are located, the last two are not.
fn arb_bins() -> impl Strategy<Value = BinMap> {
    let coord = (0.0..50.0f64, 0.0..3.0f64, 0.0..50.0f64, 1u32..3);
    prop::collection::vec(coord, BINS - 2).prop_map(|coords| {
        coords
            .into_iter()
            .enumerate()
            .map(|(i, (x, y, z, floor))| BinCoordinate::new(bin_name(i), x, y, z).on_floor(floor))
            .collect()
    })
}

fn arb_stock() -> impl Strategy<Value = Vec<StockRecord>> {
    prop::collection::vec((0..MATERIALS.len(), 0..BINS, 0.0..20.0f64), 0..20).prop_map(|rows| {
        rows.into_iter()
            .map(|(m, b, qty)| StockRecord::new(MATERIALS[m], bin_name(b), qty.floor()))
            .collect()
    })
}

fn arb_orders() -> impl Strategy<Value = Vec<OrderLine>> {
    prop::collection::vec((0..MATERIALS.len(), 1.0..30.0f64), 1..6).prop_map(|rows| {
        rows.into_iter()
            .map(|(m, qty)| OrderLine::new(MATERIALS[m], qty.floor()))
            .collect()
    })
}

fn entry() -> Location {
    Location::new(Point3::origin(), 1)
}

fn located_stock(stock: &[StockRecord], bins: &BinMap) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for record in stock.iter().filter(|r| bins.is_located(&r.bin)) {
        *totals.entry(record.material.clone()).or_insert(0.0) += record.qty_available;
    }
    totals
}

proptest! {
    #[test]
    fn proptest_generated_route_invariants(
        orders in arb_orders(),
        stock in arb_stock(),
        bins in arb_bins(),
    ) {
        let plan = generate_route(&orders, &stock, &bins, &entry(), &StraightLine);

        prop_assert!(is_contiguous(&plan.tasks, 1));
        prop_assert!(plan.tasks.iter().all(|t| t.qty_to_pick > 0.0));
        prop_assert!(plan.tasks.iter().all(|t| bins.is_located(&t.bin)));

        let available = located_stock(&stock, &bins);
        let mut planned: BTreeMap<&str, f64> = BTreeMap::new();
        for task in &plan.tasks {
            *planned.entry(task.material.as_str()).or_insert(0.0) += task.qty_to_pick;
        }
        for (material, qty) in planned {
            prop_assert!(qty <= available[material] + QTY_EPSILON);
        }
    }

    #[test]
    fn proptest_generation_is_deterministic(
        orders in arb_orders(),
        stock in arb_stock(),
        bins in arb_bins(),
    ) {
        let a = generate_route(&orders, &stock, &bins, &entry(), &StraightLine);
        let b = generate_route(&orders, &stock, &bins, &entry(), &StraightLine);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn proptest_replan_keeps_sequence_and_never_overallocates(
        orders in arb_orders(),
        stock in arb_stock(),
        bins in arb_bins(),
        fraction in 0.0..1.5f64,
    ) {
        let plan = generate_route(&orders, &stock, &bins, &entry(), &StraightLine);
        prop_assume!(!plan.tasks.is_empty());

        let mut resolved = plan.tasks[0].clone();
        let got = (resolved.qty_to_pick * fraction).floor();
        resolved.confirm(got).unwrap();
        let pending = &plan.tasks[1..];

        let request = ReplanRequest::new(&resolved, pending, &[], &orders, &stock, &bins);
        let outcome = replan(&request, &StraightLine);

        prop_assert_eq!(outcome.resolved.sequence, 1);
        prop_assert!(is_contiguous(&outcome.pending, 2));
        prop_assert!(outcome.pending.iter().all(|t| t.qty_to_pick > 0.0));
        prop_assert!(outcome.pending.iter().all(|t| bins.is_located(&t.bin)));

        // The resolved material is never planned beyond what the order needs.
        let ordered: f64 = orders
            .iter()
            .filter(|o| o.material == resolved.material)
            .map(|o| o.qty)
            .sum();
        let still_planned: f64 = outcome
            .pending
            .iter()
            .filter(|t| t.material == resolved.material)
            .map(|t| t.qty_to_pick)
            .sum();
        prop_assert!(got + still_planned <= ordered.max(got) + QTY_EPSILON);
    }

    #[test]
    fn proptest_exact_pick_keeps_a_covered_order_covered(
        orders in arb_orders(),
        stock in arb_stock(),
        bins in arb_bins(),
    ) {
        let plan = generate_route(&orders, &stock, &bins, &entry(), &StraightLine);
        prop_assume!(!plan.tasks.is_empty());
        prop_assume!(!plan.unmet.contains_key(&plan.tasks[0].material));

        let mut resolved = plan.tasks[0].clone();
        resolved.confirm(resolved.qty_to_pick).unwrap();
        let pending = &plan.tasks[1..];

        let request = ReplanRequest::new(&resolved, pending, &[], &orders, &stock, &bins);
        let outcome = replan(&request, &StraightLine);

        prop_assert!(outcome.shortfall.is_none());

        let ordered: f64 = orders
            .iter()
            .filter(|o| o.material == resolved.material)
            .map(|o| o.qty)
            .sum();
        let still_planned: f64 = outcome
            .pending
            .iter()
            .filter(|t| t.material == resolved.material)
            .map(|t| t.qty_to_pick)
            .sum();
        prop_assert!((resolved.qty_to_pick + still_planned - ordered).abs() <= QTY_EPSILON);
        prop_assert_eq!(outcome.pending.len(), pending.len());
    }
}
