//! Floor layout geometry for warehouse pick routing.
//!
//! This crate turns static rack placement data into per-floor obstacle sets
//! that the path planner searches over:
//!
//! - [`RackUnit`] / [`FloorLayout`] - rack placements grouped by floor
//! - [`Rect`] - axis-aligned rectangles on the floor plane
//! - [`FloorGeometry`] / [`GeometryIndex`] - obstacles and bounds per floor,
//!   with racks against the outer wall extended outward
//! - [`GridCell`] / [`CellGrid`] - the integer walkability lattice
//!
//! # Coordinate System
//!
//! World coordinates follow the warehouse scene: the floor plane is spanned
//! by `x` and `z`, and `y` is height. All lattice operations ignore `y`.
//!
//! # Example
//!
//! ```
//! use pick_spatial::{CellGrid, FloorLayout, GeometryIndex, GridCell, LayoutConfig, RackUnit};
//! use nalgebra::Point3;
//!
//! let layout = FloorLayout::new(1)
//!     .with_unit(RackUnit::new(Point3::new(0.0, 0.0, 0.0), 1.0, 1.0))
//!     .with_unit(RackUnit::new(Point3::new(10.0, 0.0, 10.0), 1.0, 1.0))
//!     .with_unit(RackUnit::new(Point3::new(5.0, 0.0, 5.0), 2.0, 2.0));
//!
//! let index = GeometryIndex::build(&[layout], LayoutConfig::default()).unwrap();
//! let geometry = index.floor(1).unwrap();
//!
//! let grid = CellGrid::from_floor(geometry, 0.5);
//! assert!(grid.is_blocked(GridCell::new(5, 5)));
//! assert!(grid.is_free(GridCell::new(2, 8)));
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod cell;
mod error;
mod grid;
mod index;
mod layout;
mod rect;

pub use cell::{GridCell, Step};
pub use error::{SpatialError, SpatialResult};
pub use grid::CellGrid;
pub use index::{FloorGeometry, GeometryIndex};
pub use layout::{FloorId, FloorLayout, LayoutConfig, RackUnit};
pub use rect::Rect;

// Re-export nalgebra types for convenience
pub use nalgebra::Point3;
