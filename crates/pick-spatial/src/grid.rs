//! Rasterized walkability lattice for one floor.

use hashbrown::HashSet;

use crate::cell::GridCell;
use crate::index::FloorGeometry;
use crate::rect::Rect;

/// Blocked cells of one floor, rasterized from padded obstacles.
///
/// A cell is blocked when its centre lies inside any obstacle rectangle grown
/// by `padding`. Cells outside the obstacle set are walkable; the optional
/// floor bounds only confine endpoint snapping, not the search itself.
///
/// # Example
///
/// ```
/// use pick_spatial::{CellGrid, GridCell, Rect};
///
/// let grid = CellGrid::from_obstacles(&[Rect::new(2.0, 4.0, 0.0, 0.0)], 0.5, None);
/// assert!(grid.is_blocked(GridCell::new(3, 0)));
/// assert!(grid.is_blocked(GridCell::new(4, 0)));
/// assert!(grid.is_free(GridCell::new(5, 0)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CellGrid {
    blocked: HashSet<GridCell>,
    bounds: Option<Rect>,
    padding: f64,
}

impl CellGrid {
    /// Creates a grid with no obstacles and no bounds.
    #[must_use]
    pub fn open() -> Self {
        Self::default()
    }

    /// Rasterizes a set of obstacle rectangles.
    #[must_use]
    pub fn from_obstacles(obstacles: &[Rect], padding: f64, bounds: Option<Rect>) -> Self {
        let mut blocked = HashSet::new();
        for obstacle in obstacles {
            let Some((lo, hi)) = obstacle.padded(padding).cell_range() else {
                continue;
            };
            for x in lo.x..=hi.x {
                for z in lo.z..=hi.z {
                    blocked.insert(GridCell::new(x, z));
                }
            }
        }
        Self {
            blocked,
            bounds,
            padding,
        }
    }

    /// Rasterizes the obstacles of a floor, keeping its bounds.
    #[must_use]
    pub fn from_floor(geometry: &FloorGeometry, padding: f64) -> Self {
        Self::from_obstacles(geometry.obstacles(), padding, Some(*geometry.bounds()))
    }

    /// Returns `true` if the cell is covered by a padded obstacle.
    #[must_use]
    pub fn is_blocked(&self, cell: GridCell) -> bool {
        self.blocked.contains(&cell)
    }

    /// Returns `true` if the cell is walkable.
    #[must_use]
    pub fn is_free(&self, cell: GridCell) -> bool {
        !self.is_blocked(cell)
    }

    /// Returns `true` if the cell lies within the floor bounds.
    ///
    /// Grids without bounds contain every cell.
    #[must_use]
    pub fn in_bounds(&self, cell: GridCell) -> bool {
        self.bounds.is_none_or(|b| b.contains_cell(cell))
    }

    /// Floor bounds, if known.
    #[must_use]
    pub const fn bounds(&self) -> Option<&Rect> {
        self.bounds.as_ref()
    }

    /// Padding the obstacles were grown by.
    #[must_use]
    pub const fn padding(&self) -> f64 {
        self.padding
    }

    /// Number of blocked cells.
    #[must_use]
    pub fn blocked_count(&self) -> usize {
        self.blocked.len()
    }

    /// Walkable 4-connected neighbours of a cell.
    pub fn free_neighbors(&self, cell: GridCell) -> impl Iterator<Item = GridCell> + '_ {
        cell.neighbors().into_iter().filter(|&n| self.is_free(n))
    }
}
