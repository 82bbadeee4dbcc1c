//! Initial route generation.
//!
//! The route is built greedily: from the current position, the nearest stock
//! record whose material is still needed becomes the next task. This does
//! not search for a globally shortest tour.

use std::collections::BTreeMap;

use pick_types::{BinMap, Demand, Location, OrderLine, PickingTask, StockRecord};
use tracing::{debug, info, warn};

use crate::pool::StockPool;
use crate::sequence::total_distance;
use crate::travel::TravelMetric;

/// A generated pick route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutePlan {
    /// Tasks in visiting order, numbered from 1.
    pub tasks: Vec<PickingTask>,
    /// Ordered materials with no located, available stock at all.
    pub skipped: Vec<String>,
    /// Quantity per material the stock could not cover.
    pub unmet: BTreeMap<String, f64>,
}

impl RoutePlan {
    /// Returns `true` if every ordered quantity is covered by a task.
    #[must_use]
    pub fn is_fully_covered(&self) -> bool {
        self.unmet.is_empty()
    }

    /// Total travel distance of the route.
    #[must_use]
    pub fn total_distance(&self) -> f64 {
        total_distance(&self.tasks)
    }

    /// Number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if the route has no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Generates a pick route for an order.
///
/// Stock records are skipped when their material is not ordered, their bin
/// has no coordinate, or they hold nothing. Among the rest, the record
/// nearest to the current position (by `metric`) is picked next, taking as
/// much as the record holds or the order still needs. Ties go to the record
/// listed first in `stock`.
///
/// Demand the stock cannot cover is left unmet and reported in
/// [`RoutePlan::unmet`]; materials without any usable stock are also listed
/// in [`RoutePlan::skipped`].
///
/// # Example
///
/// ```
/// use pick_optimize::{StraightLine, generate_route};
/// use pick_types::{BinCoordinate, BinMap, Location, OrderLine, StockRecord};
/// use nalgebra::Point3;
///
/// let orders = vec![OrderLine::new("M1", 5.0)];
/// let stock = vec![
///     StockRecord::new("M1", "binA", 3.0),
///     StockRecord::new("M1", "binB", 5.0),
/// ];
/// let bins = BinMap::new(vec![
///     BinCoordinate::new("binA", 2.0, 0.0, 0.0),
///     BinCoordinate::new("binB", 8.0, 0.0, 0.0),
/// ]);
/// let entry = Location::new(Point3::origin(), 1);
///
/// let plan = generate_route(&orders, &stock, &bins, &entry, &StraightLine);
///
/// assert_eq!(plan.tasks.len(), 2);
/// assert_eq!(plan.tasks[0].bin, "binA");
/// assert_eq!(plan.tasks[0].qty_to_pick, 3.0);
/// assert_eq!(plan.tasks[1].qty_to_pick, 2.0);
/// assert!(plan.is_fully_covered());
/// ```
#[must_use]
pub fn generate_route<M: TravelMetric + ?Sized>(
    orders: &[OrderLine],
    stock: &[StockRecord],
    bins: &BinMap,
    entry: &Location,
    metric: &M,
) -> RoutePlan {
    let mut demand = Demand::from_lines(orders);
    let mut pool = StockPool::new(stock, bins, &demand);

    let skipped: Vec<String> = demand
        .materials()
        .filter(|m| demand.needs(m) && pool.available(m) <= 0.0)
        .map(str::to_owned)
        .collect();
    for material in &skipped {
        warn!(material = %material, "No located stock for ordered material");
    }

    let mut tasks: Vec<PickingTask> = Vec::new();
    let mut current = *entry;

    while let Some((index, distance)) = nearest_candidate(&pool, &demand, &current, metric) {
        let candidate = &pool.entries()[index];
        let location = candidate.location;
        let qty = demand
            .outstanding(&candidate.material)
            .min(candidate.remaining);

        let mut task = PickingTask::new(
            candidate.material.clone(),
            candidate.bin.clone(),
            qty,
            location,
        );
        task.sequence = u32::try_from(tasks.len() + 1).unwrap_or(u32::MAX);
        task.distance_from_last = distance;
        task.start_new_section = location.floor != current.floor;

        debug!(
            sequence = task.sequence,
            material = %task.material,
            bin = %task.bin,
            qty,
            distance,
            "Planned pick"
        );

        demand.consume(&task.material, qty);
        pool.take(index, qty);
        current = location;
        tasks.push(task);
    }

    let unmet = demand.unmet();
    info!(
        tasks = tasks.len(),
        skipped = skipped.len(),
        unmet = unmet.len(),
        distance = total_distance(&tasks),
        "Generated pick route"
    );

    RoutePlan {
        tasks,
        skipped,
        unmet,
    }
}

/// Pool entry of a still-needed material closest to `from`.
fn nearest_candidate<M: TravelMetric + ?Sized>(
    pool: &StockPool,
    demand: &Demand,
    from: &Location,
    metric: &M,
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, entry) in pool.entries().iter().enumerate() {
        if !demand.needs(&entry.material) {
            continue;
        }
        let d = metric.distance(from, &entry.location);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((index, d));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::travel::StraightLine;
    use approx::assert_relative_eq;
    use nalgebra::Point3;
    use pick_types::BinCoordinate;

    fn origin() -> Location {
        Location::new(Point3::origin(), 1)
    }

    #[test]
    fn test_nearer_bin_first() {
        let orders = vec![OrderLine::new("M1", 5.0)];
        let stock = vec![
            StockRecord::new("M1", "binA", 3.0),
            StockRecord::new("M1", "binB", 5.0),
        ];
        let bins = BinMap::new(vec![
            BinCoordinate::new("binA", 10.0, 0.0, 0.0),
            BinCoordinate::new("binB", 4.0, 0.0, 0.0),
        ]);

        let plan = generate_route(&orders, &stock, &bins, &origin(), &StraightLine);

        assert_eq!(plan.tasks.len(), 1);
        assert_eq!(plan.tasks[0].bin, "binB");
        assert_relative_eq!(plan.tasks[0].qty_to_pick, 5.0);
        assert_relative_eq!(plan.tasks[0].distance_from_last, 4.0);
        assert_eq!(plan.tasks[0].sequence, 1);
    }

    #[test]
    fn test_zero_stock_material_is_skipped() {
        let orders = vec![OrderLine::new("M1", 1.0), OrderLine::new("M2", 2.0)];
        let stock = vec![
            StockRecord::new("M1", "A", 1.0),
            StockRecord::new("M2", "A", 0.0),
        ];
        let bins = BinMap::new(vec![BinCoordinate::new("A", 1.0, 0.0, 0.0)]);

        let plan = generate_route(&orders, &stock, &bins, &origin(), &StraightLine);

        assert_eq!(plan.tasks.len(), 1);
        assert_eq!(plan.skipped, vec!["M2".to_string()]);
        assert_relative_eq!(plan.unmet["M2"], 2.0);
    }

    #[test]
    fn test_partial_cover_reports_unmet() {
        let orders = vec![OrderLine::new("M1", 10.0)];
        let stock = vec![StockRecord::new("M1", "A", 4.0)];
        let bins = BinMap::new(vec![BinCoordinate::new("A", 1.0, 0.0, 0.0)]);

        let plan = generate_route(&orders, &stock, &bins, &origin(), &StraightLine);

        assert!(plan.skipped.is_empty());
        assert!(!plan.is_fully_covered());
        assert_relative_eq!(plan.unmet["M1"], 6.0);
    }

    #[test]
    fn test_greedy_interleaves_materials() {
        let orders = vec![OrderLine::new("M1", 1.0), OrderLine::new("M2", 1.0)];
        let stock = vec![
            StockRecord::new("M1", "far", 1.0),
            StockRecord::new("M2", "near", 1.0),
        ];
        let bins = BinMap::new(vec![
            BinCoordinate::new("far", 10.0, 0.0, 0.0),
            BinCoordinate::new("near", 3.0, 0.0, 0.0),
        ]);

        let plan = generate_route(&orders, &stock, &bins, &origin(), &StraightLine);

        let bins: Vec<_> = plan.tasks.iter().map(|t| t.bin.as_str()).collect();
        assert_eq!(bins, ["near", "far"]);
        assert_relative_eq!(plan.tasks[1].distance_from_last, 7.0);
        assert_relative_eq!(plan.total_distance(), 10.0);
    }

    #[test]
    fn test_floor_change_starts_section() {
        let orders = vec![OrderLine::new("M1", 2.0)];
        let stock = vec![
            StockRecord::new("M1", "ground", 1.0),
            StockRecord::new("M1", "upstairs", 1.0),
        ];
        let bins = BinMap::new(vec![
            BinCoordinate::new("ground", 1.0, 0.0, 0.0),
            BinCoordinate::new("upstairs", 1.0, 0.0, 1.0).on_floor(2),
        ]);

        let plan = generate_route(&orders, &stock, &bins, &origin(), &StraightLine);

        assert!(!plan.tasks[0].start_new_section);
        assert!(plan.tasks[1].start_new_section);
        assert_eq!(plan.tasks[1].floor, 2);
    }

    #[test]
    fn test_records_sharing_a_bin_give_one_task() {
        let orders = vec![OrderLine::new("M1", 5.0)];
        let stock = vec![
            StockRecord::new("M1", "binA", 3.0),
            StockRecord::new("M1", "binA", 2.0),
        ];
        let bins = BinMap::new(vec![BinCoordinate::new("binA", 2.0, 0.0, 0.0)]);

        let plan = generate_route(&orders, &stock, &bins, &origin(), &StraightLine);

        assert_eq!(plan.tasks.len(), 1);
        assert_eq!(plan.tasks[0].bin, "binA");
        assert_relative_eq!(plan.tasks[0].qty_to_pick, 5.0);
        assert!(plan.is_fully_covered());
    }

    #[test]
    fn test_empty_order() {
        let plan = generate_route(&[], &[], &BinMap::default(), &origin(), &StraightLine);
        assert!(plan.is_empty());
        assert!(plan.is_fully_covered());
    }
}
