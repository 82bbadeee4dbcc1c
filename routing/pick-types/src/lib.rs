//! Core types for warehouse pick routing.
//!
//! This crate defines the data exchanged between the planners and their
//! hosting application:
//!
//! - **Demand**: [`OrderLine`] and the derived [`Demand`] ledger
//! - **Supply**: [`StockRecord`] snapshots and [`BinMap`] coordinates
//! - **Plan**: [`PickingTask`] and its [`TaskStatus`] lifecycle
//! - **Floors**: [`Floor`] entry points, [`Location`]
//! - **Configuration**: [`SearchConfig`], [`RouteConfig`]
//! - **Errors**: [`PickingError`]
//!
//! # Example
//!
//! ```
//! use pick_types::{BinCoordinate, BinMap, Demand, OrderLine, PickingTask, StockRecord};
//!
//! let order = vec![OrderLine::new("M1", 5.0)];
//! let stock = vec![StockRecord::new("M1", "A-01", 3.0), StockRecord::new("M1", "X-00", 9.0)];
//! let bins = BinMap::new(vec![BinCoordinate::new("A-01", 2.0, 0.0, 4.0)]);
//!
//! let demand = Demand::from_lines(&order);
//! assert!(demand.needs("M1"));
//!
//! // Only located stock can become a task.
//! let located: Vec<_> = stock.iter().filter(|s| bins.is_located(&s.bin)).collect();
//! assert_eq!(located.len(), 1);
//!
//! let task = PickingTask::new("M1", "A-01", 3.0, bins.locate("A-01").unwrap());
//! assert!(task.is_pending());
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enables serialization/deserialization for all types

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

pub mod bin;
pub mod config;
pub mod error;
pub mod floor;
pub mod location;
pub mod order;
pub mod quantity;
pub mod stock;
pub mod task;

pub use bin::{BinCoordinate, BinMap, DEFAULT_FLOOR};
pub use config::{RouteConfig, SearchConfig};
pub use error::{PickingError, PickingResult};
pub use floor::{Floor, FloorDirectory};
pub use location::Location;
pub use order::{Demand, OrderLine};
pub use quantity::{QTY_EPSILON, check_quantity, is_positive};
pub use stock::StockRecord;
pub use task::{PickingTask, TaskKey, TaskStatus};

pub use pick_spatial::FloorId;
