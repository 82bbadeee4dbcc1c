//! A single worker's route from first task to completion.
//!
//! [`RouteSession`] owns everything the planners need between picks: the
//! order, the stock and bin snapshots, the route entry and the current task
//! list. The hosting application keeps one session per route and saves it
//! (with the `serde` feature, as JSON) whenever it needs to persist state.

use pick_types::{
    BinMap, Location, OrderLine, PickingError, PickingResult, PickingTask, RouteConfig, StockRecord,
};
use tracing::info;

use crate::generate::generate_route;
use crate::replan::{ReplanRequest, Shortfall, replan};
use crate::sequence::total_distance;
use crate::travel::TravelMetric;

/// How far along a route is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Tasks confirmed.
    pub picked: usize,
    /// Tasks in the route.
    pub total: usize,
}

impl Progress {
    /// Share of tasks confirmed, from 0.0 to 1.0. An empty route is done.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.picked as f64 / self.total as f64
        }
    }
}

/// Live state of one pick route.
///
/// Tasks are kept in sequence order: confirmed tasks first, then the
/// pending ones. The first pending task is the focus.
///
/// # Example
///
/// ```
/// use pick_optimize::{RouteSession, StraightLine};
/// use pick_types::{BinCoordinate, BinMap, OrderLine, RouteConfig, StockRecord};
///
/// let orders = vec![OrderLine::new("M1", 5.0)];
/// let stock = vec![
///     StockRecord::new("M1", "binA", 5.0),
///     StockRecord::new("M1", "binB", 5.0),
/// ];
/// let bins = BinMap::new(vec![
///     BinCoordinate::new("binA", 2.0, 0.0, 0.0),
///     BinCoordinate::new("binB", 7.0, 0.0, 0.0),
/// ]);
///
/// let mut session =
///     RouteSession::start(orders, stock, bins, &RouteConfig::default(), &StraightLine)?;
/// assert_eq!(session.focused().unwrap().bin, "binA");
///
/// // Only 2 were there; the rest moves to binB.
/// session.confirm_pick(2.0, &StraightLine)?;
/// let next = session.focused().unwrap();
/// assert_eq!((next.bin.as_str(), next.qty_to_pick), ("binB", 3.0));
///
/// session.confirm_pick(3.0, &StraightLine)?;
/// assert!(session.is_complete());
/// # Ok::<(), pick_types::PickingError>(())
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteSession {
    orders: Vec<OrderLine>,
    stock: Vec<StockRecord>,
    bins: BinMap,
    entry: Location,
    tasks: Vec<PickingTask>,
    skipped: Vec<String>,
    shortfalls: Vec<Shortfall>,
}

impl RouteSession {
    /// Validates the input and generates the initial route.
    ///
    /// # Errors
    ///
    /// Returns an error if an order line or stock record is malformed, or the
    /// route configuration is invalid.
    pub fn start<M: TravelMetric + ?Sized>(
        orders: Vec<OrderLine>,
        stock: Vec<StockRecord>,
        bins: BinMap,
        config: &RouteConfig,
        metric: &M,
    ) -> PickingResult<Self> {
        for line in &orders {
            line.validate()?;
        }
        for record in &stock {
            record.validate()?;
        }
        let issues = config.validate();
        if !issues.is_empty() {
            return Err(PickingError::invalid_config(issues.join("; ")));
        }

        let entry = config.entry();
        let plan = generate_route(&orders, &stock, &bins, &entry, metric);

        Ok(Self {
            orders,
            stock,
            bins,
            entry,
            tasks: plan.tasks,
            skipped: plan.skipped,
            shortfalls: Vec::new(),
        })
    }

    /// All tasks in sequence order.
    #[must_use]
    pub fn tasks(&self) -> &[PickingTask] {
        &self.tasks
    }

    /// The task the worker should do next.
    #[must_use]
    pub fn focused(&self) -> Option<&PickingTask> {
        self.tasks.iter().find(|t| t.is_pending())
    }

    /// Tasks still to pick.
    pub fn pending(&self) -> impl Iterator<Item = &PickingTask> {
        self.tasks.iter().filter(|t| t.is_pending())
    }

    /// Tasks already confirmed.
    pub fn settled(&self) -> impl Iterator<Item = &PickingTask> {
        self.tasks.iter().filter(|t| t.is_picked())
    }

    /// Returns `true` when no task is pending.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.focused().is_none()
    }

    /// Confirmed and total task counts.
    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress {
            picked: self.settled().count(),
            total: self.tasks.len(),
        }
    }

    /// Ordered materials that had no usable stock when the route started.
    #[must_use]
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Shortfalls reported by re-planning so far.
    #[must_use]
    pub fn shortfalls(&self) -> &[Shortfall] {
        &self.shortfalls
    }

    /// Where the route starts.
    #[must_use]
    pub const fn entry(&self) -> Location {
        self.entry
    }

    /// The order being picked.
    #[must_use]
    pub fn orders(&self) -> &[OrderLine] {
        &self.orders
    }

    /// Bin coordinates the route was planned with.
    #[must_use]
    pub const fn bins(&self) -> &BinMap {
        &self.bins
    }

    /// Total travel distance of the current task list.
    #[must_use]
    pub fn total_distance(&self) -> f64 {
        total_distance(&self.tasks)
    }

    /// Confirms the focused task at its planned bin and re-plans.
    ///
    /// Returns the shortfall if the order can no longer be covered.
    ///
    /// # Errors
    ///
    /// Returns [`PickingError::NoPendingTask`] when the route is complete, or
    /// an error for an invalid quantity. The session is unchanged on error.
    pub fn confirm_pick<M: TravelMetric + ?Sized>(
        &mut self,
        picked_qty: f64,
        metric: &M,
    ) -> PickingResult<Option<Shortfall>> {
        self.resolve(None, picked_qty, metric)
    }

    /// Confirms the focused task at a different bin and re-plans.
    ///
    /// # Errors
    ///
    /// As [`RouteSession::confirm_pick`], and
    /// [`PickingError::UnlocatedBin`] if the bin has no coordinate.
    pub fn confirm_pick_at<M: TravelMetric + ?Sized>(
        &mut self,
        bin: &str,
        picked_qty: f64,
        metric: &M,
    ) -> PickingResult<Option<Shortfall>> {
        self.resolve(Some(bin), picked_qty, metric)
    }

    fn resolve<M: TravelMetric + ?Sized>(
        &mut self,
        substitute: Option<&str>,
        picked_qty: f64,
        metric: &M,
    ) -> PickingResult<Option<Shortfall>> {
        let index = self
            .tasks
            .iter()
            .position(PickingTask::is_pending)
            .ok_or(PickingError::NoPendingTask)?;

        let mut resolved = self.tasks[index].clone();
        let planned_bin = resolved.bin.clone();
        match substitute {
            Some(bin) if bin != planned_bin => {
                let location = self
                    .bins
                    .locate(bin)
                    .ok_or_else(|| PickingError::UnlocatedBin(bin.to_owned()))?;
                resolved.confirm_at(bin, location, picked_qty)?;
            }
            _ => resolved.confirm(picked_qty)?,
        }

        let settled: Vec<PickingTask> = self.settled().cloned().collect();
        let pending: Vec<PickingTask> = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(i, t)| *i != index && t.is_pending())
            .map(|(_, t)| t.clone())
            .collect();

        let mut request = ReplanRequest::new(
            &resolved,
            &pending,
            &settled,
            &self.orders,
            &self.stock,
            &self.bins,
        )
        .with_entry(self.entry);
        if resolved.bin != planned_bin {
            request = request.with_planned_bin(&planned_bin);
        }
        let outcome = replan(&request, metric);

        let mut tasks = settled;
        tasks.push(outcome.resolved);
        tasks.extend(outcome.pending);
        self.tasks = tasks;
        if let Some(shortfall) = &outcome.shortfall {
            self.shortfalls.push(shortfall.clone());
        }

        let progress = self.progress();
        info!(
            picked = progress.picked,
            total = progress.total,
            "Pick confirmed"
        );
        Ok(outcome.shortfall)
    }

    /// Serializes the session as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PickingError::Persistence`] if serialization fails.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> PickingResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PickingError::Persistence(e.to_string()))
    }

    /// Restores a session saved with [`RouteSession::to_json`].
    ///
    /// # Errors
    ///
    /// Returns [`PickingError::Persistence`] if the JSON is malformed.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> PickingResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| PickingError::Persistence(e.to_string()))
    }
}
