//! Re-planning after a pick deviates from plan.
//!
//! When the worker confirms a task with a different quantity, or at a
//! different bin, the remaining tasks for that material no longer add up.
//! [`replan`] trims or drops surplus tasks, adds tasks at the nearest other
//! bins when the order is now short, and re-sequences everything still
//! pending from where the worker stands.

use std::collections::{BTreeMap, BTreeSet};

use pick_types::{BinMap, Demand, Location, OrderLine, PickingTask, StockRecord, is_positive};
use tracing::{debug, info, warn};

use crate::sequence::{annotate_travel, nearest_neighbor_order, renumber};
use crate::travel::TravelMetric;

/// Snapshot of the route at the moment a task is resolved.
///
/// The six required inputs are set by [`ReplanRequest::new`]; the planned
/// bin and the route entry are optional refinements.
#[derive(Debug, Clone, Copy)]
pub struct ReplanRequest<'a> {
    /// The task just confirmed, carrying the actual bin and quantity.
    pub resolved: &'a PickingTask,
    /// Tasks still pending, in their current order, without the resolved one.
    pub pending: &'a [PickingTask],
    /// Tasks confirmed earlier, in sequence order.
    pub settled: &'a [PickingTask],
    /// The order being picked.
    pub orders: &'a [OrderLine],
    /// Stock snapshot.
    pub stock: &'a [StockRecord],
    /// Bin coordinates.
    pub bins: &'a BinMap,
    /// Bin the resolved task was planned at, when the worker picked elsewhere.
    pub planned_bin: Option<&'a str>,
    /// Where the route started; used to measure the resolved task when
    /// nothing was settled before it.
    pub entry: Option<Location>,
}

impl<'a> ReplanRequest<'a> {
    /// Creates a request from the route snapshot.
    #[must_use]
    pub const fn new(
        resolved: &'a PickingTask,
        pending: &'a [PickingTask],
        settled: &'a [PickingTask],
        orders: &'a [OrderLine],
        stock: &'a [StockRecord],
        bins: &'a BinMap,
    ) -> Self {
        Self {
            resolved,
            pending,
            settled,
            orders,
            stock,
            bins,
            planned_bin: None,
            entry: None,
        }
    }

    /// Records the bin the resolved task was planned at.
    #[must_use]
    pub const fn with_planned_bin(mut self, bin: &'a str) -> Self {
        self.planned_bin = Some(bin);
        self
    }

    /// Records where the route started.
    #[must_use]
    pub const fn with_entry(mut self, entry: Location) -> Self {
        self.entry = Some(entry);
        self
    }
}

/// Demand the replanner could not cover from any bin.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shortfall {
    /// Material that is short.
    pub material: String,
    /// Quantity still missing.
    pub missing: f64,
}

/// Result of a replan.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplanOutcome {
    /// The resolved task with its new sequence number.
    pub resolved: PickingTask,
    /// Pending tasks in their new order, numbered after the resolved task.
    pub pending: Vec<PickingTask>,
    /// Demand left uncovered for the resolved material, if any.
    pub shortfall: Option<Shortfall>,
}

impl ReplanOutcome {
    /// The task the worker should do next.
    #[must_use]
    pub fn focus(&self) -> Option<&PickingTask> {
        self.pending.first()
    }

    /// Returns `true` when nothing is left to pick.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Recomputes the pending tasks after a task is resolved.
///
/// Only the resolved task's material is re-balanced; tasks for other
/// materials keep their quantities and are just re-sequenced.
///
/// 1. The quantity still needed is the ordered quantity minus everything
///    picked so far for the material (settled tasks plus this pick).
/// 2. Pending tasks for the material are dropped once nothing is needed,
///    or shrunk to what is still needed. A pending task at the bin just
///    picked from is always dropped.
/// 3. If more is still needed, new tasks are added at other bins holding
///    the material, nearest (straight-line) to the resolved bin first.
///    Bins just used and bins already queued for the material are skipped;
///    available stock is reduced by what settled tasks took there.
/// 4. Pending tasks are ordered nearest-first from the resolved bin and
///    numbered after the settled tasks.
///
/// A shortage that no bin can cover is reported in
/// [`ReplanOutcome::shortfall`]; the route stays completable.
///
/// # Example
///
/// ```
/// use pick_optimize::{ReplanRequest, StraightLine, replan};
/// use pick_types::{BinCoordinate, BinMap, OrderLine, PickingTask, StockRecord};
///
/// let orders = vec![OrderLine::new("M1", 5.0)];
/// let stock = vec![
///     StockRecord::new("M1", "binA", 5.0),
///     StockRecord::new("M1", "binB", 4.0),
/// ];
/// let bins = BinMap::new(vec![
///     BinCoordinate::new("binA", 1.0, 0.0, 0.0),
///     BinCoordinate::new("binB", 6.0, 0.0, 0.0),
/// ]);
///
/// // The worker only found 2 of the planned 5 at binA.
/// let mut resolved = PickingTask::new("M1", "binA", 5.0, bins.locate("binA").unwrap());
/// resolved.sequence = 1;
/// resolved.confirm(2.0).unwrap();
///
/// let request = ReplanRequest::new(&resolved, &[], &[], &orders, &stock, &bins);
/// let outcome = replan(&request, &StraightLine);
///
/// let next = outcome.focus().unwrap();
/// assert_eq!(next.bin, "binB");
/// assert_eq!(next.qty_to_pick, 3.0);
/// assert_eq!(next.sequence, 2);
/// assert!(outcome.shortfall.is_none());
/// ```
#[must_use]
pub fn replan<M: TravelMetric + ?Sized>(
    request: &ReplanRequest<'_>,
    metric: &M,
) -> ReplanOutcome {
    let resolved = request.resolved;
    let material = resolved.material.as_str();
    let here = resolved.location();

    let settled: Vec<&PickingTask> = request.settled.iter().filter(|t| t.is_picked()).collect();
    let settled_qty: f64 = settled
        .iter()
        .filter(|t| t.material == material)
        .map(|t| t.confirmed_qty())
        .sum();
    let ordered = Demand::from_lines(request.orders).outstanding(material);
    let mut remaining = ordered - (settled_qty + resolved.confirmed_qty());

    let mut pending = Vec::with_capacity(request.pending.len());
    let mut dropped = 0usize;
    for task in request.pending {
        if task.material != material {
            pending.push(task.clone());
        } else if task.bin == resolved.bin || !is_positive(remaining) {
            dropped += 1;
        } else {
            let mut task = task.clone();
            task.qty_to_pick = task.qty_to_pick.min(remaining);
            remaining -= task.qty_to_pick;
            pending.push(task);
        }
    }

    let mut added = 0usize;
    if is_positive(remaining) {
        let mut excluded: BTreeSet<&str> = pending
            .iter()
            .filter(|t| t.material == material)
            .map(|t| t.bin.as_str())
            .collect();
        excluded.insert(resolved.bin.as_str());
        if let Some(bin) = request.planned_bin {
            excluded.insert(bin);
        }

        for (bin, location, available) in candidate_bins(request, &settled, &excluded, &here) {
            let qty = available.min(remaining);
            pending.push(PickingTask::new(material, bin, qty, location));
            remaining -= qty;
            added += 1;
            debug!(material, bin, qty, "Added replacement pick");
            if !is_positive(remaining) {
                break;
            }
        }
    }

    let shortfall = is_positive(remaining).then(|| {
        warn!(
            material,
            missing = remaining,
            "Order cannot be fully picked"
        );
        Shortfall {
            material: material.to_owned(),
            missing: remaining,
        }
    });

    let mut pending = nearest_neighbor_order(pending, &here, metric);
    let first = u32::try_from(settled.len())
        .unwrap_or(u32::MAX)
        .saturating_add(1);

    let mut resolved = resolved.clone();
    resolved.sequence = first;
    if let Some(previous) = settled.last().map(|t| t.location()).or(request.entry) {
        annotate_travel(std::slice::from_mut(&mut resolved), &previous, metric);
    }
    renumber(&mut pending, first.saturating_add(1));
    annotate_travel(&mut pending, &here, metric);

    info!(
        material,
        dropped,
        added,
        pending = pending.len(),
        "Replanned route"
    );

    ReplanOutcome {
        resolved,
        pending,
        shortfall,
    }
}

/// Other bins holding the material, with what is left in them, nearest to
/// `from` first.
fn candidate_bins<'a>(
    request: &ReplanRequest<'a>,
    settled: &[&PickingTask],
    excluded: &BTreeSet<&str>,
    from: &Location,
) -> Vec<(&'a str, Location, f64)> {
    let material = request.resolved.material.as_str();

    // Records sharing a bin are pooled, keeping first-seen order.
    let mut order: Vec<&'a str> = Vec::new();
    let mut stock_by_bin: BTreeMap<&'a str, f64> = BTreeMap::new();
    for record in request.stock.iter().filter(|r| r.material == material) {
        let qty = stock_by_bin.entry(record.bin.as_str()).or_insert_with(|| {
            order.push(record.bin.as_str());
            0.0
        });
        *qty += record.qty_available.max(0.0);
    }

    let mut candidates: Vec<(&'a str, Location, f64, f64)> = order
        .into_iter()
        .filter(|bin| !excluded.contains(bin))
        .filter_map(|bin| {
            let taken: f64 = settled
                .iter()
                .filter(|t| t.targets(material, bin))
                .map(|t| t.confirmed_qty())
                .sum();
            let available = stock_by_bin.get(bin).copied().unwrap_or(0.0) - taken;
            let location = request.bins.locate(bin)?;
            is_positive(available)
                .then(|| (bin, location, available, from.straight_line_distance(&location)))
        })
        .collect();

    candidates.sort_by(|a, b| a.3.total_cmp(&b.3));
    candidates
        .into_iter()
        .map(|(bin, location, available, _)| (bin, location, available))
        .collect()
}
