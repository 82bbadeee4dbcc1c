//! Pick route generation and live re-planning.
//!
//! This crate turns an order, a stock snapshot and a bin coordinate map into
//! an ordered list of [`PickingTask`](pick_types::PickingTask)s, and keeps
//! that list consistent as the worker's actual picks deviate from plan.
//!
//! # Overview
//!
//! - **Generation** ([`generate`]): greedy nearest-neighbour allocation of
//!   stock to the order, starting at the route entry
//! - **Re-planning** ([`replan`](mod@replan)): after each confirmed pick,
//!   trims surplus tasks, covers shortfalls from other bins and re-sequences
//! - **Travel** ([`travel`]): the [`TravelMetric`] used to rank bins, either
//!   [`StraightLine`] or [`Walking`] over planned floor paths
//! - **Sequencing** ([`sequence`]): ordering, numbering and travel annotation
//!   of task lists
//! - **Shortages** ([`shortage`]): order-level stock check
//! - **Sessions** ([`session`]): one route's state between picks
//!
//! # Quick Start
//!
//! ```
//! use pick_optimize::{RouteSession, StraightLine, shortages};
//! use pick_types::{BinCoordinate, BinMap, OrderLine, RouteConfig, StockRecord};
//!
//! let orders = vec![OrderLine::new("M1", 5.0), OrderLine::new("M2", 2.0)];
//! let stock = vec![
//!     StockRecord::new("M1", "A-01", 3.0),
//!     StockRecord::new("M1", "B-04", 5.0),
//!     StockRecord::new("M2", "A-02", 1.0),
//! ];
//! let bins = BinMap::new(vec![
//!     BinCoordinate::new("A-01", 2.0, 1.0, 0.0),
//!     BinCoordinate::new("A-02", 3.0, 1.0, 0.0),
//!     BinCoordinate::new("B-04", 2.0, 1.0, 6.0),
//! ]);
//!
//! // M2 cannot be fully picked.
//! assert!(shortages(&orders, &stock)["M2"]);
//!
//! let session =
//!     RouteSession::start(orders, stock, bins, &RouteConfig::default(), &StraightLine)?;
//! let route: Vec<_> = session.tasks().iter().map(|t| t.bin.as_str()).collect();
//! assert_eq!(route, ["A-01", "A-02", "B-04"]);
//! # Ok::<(), pick_types::PickingError>(())
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enables serialization of plans and sessions, including
//!   `RouteSession::to_json` and `RouteSession::from_json`

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

pub mod generate;
pub mod pool;
pub mod replan;
pub mod sequence;
pub mod session;
pub mod shortage;
pub mod travel;

pub use generate::{RoutePlan, generate_route};
pub use pool::{PoolEntry, StockPool};
pub use replan::{ReplanOutcome, ReplanRequest, Shortfall, replan};
pub use session::{Progress, RouteSession};
pub use shortage::{MaterialSupply, ShortageReport, shortages};
pub use travel::{StraightLine, TravelMetric, Walking};
