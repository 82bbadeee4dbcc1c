//! Moving blocked endpoints onto the nearest walkable cell.
//!
//! Pick locations usually sit inside a rack footprint, so the cell under a
//! bin is blocked. Before searching, each endpoint is moved to the nearest
//! free cell by a breadth-first search confined to the floor bounds.

use pathfinding::prelude::bfs_reach;
use pick_spatial::{CellGrid, GridCell};

/// Result of snapping one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snap {
    /// Cell the search should use.
    pub cell: GridCell,
    /// What happened while snapping.
    pub outcome: SnapOutcome,
}

/// How an endpoint was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapOutcome {
    /// The original cell was already walkable.
    AlreadyFree,
    /// A nearby walkable cell was found.
    Moved,
    /// No walkable cell within the step cap; the blocked cell is used as-is.
    Unresolved,
}

/// Finds the nearest walkable cell to `origin`.
///
/// The search is 4-connected, never leaves the grid's bounds, and visits at
/// most `max_steps` cells. When nothing free is found the original cell is
/// returned with [`SnapOutcome::Unresolved`].
///
/// # Example
///
/// ```
/// use pick_pathfind::snap::{snap_to_free, SnapOutcome};
/// use pick_spatial::{CellGrid, GridCell, Rect};
///
/// let grid = CellGrid::from_obstacles(&[Rect::new(0.0, 4.0, 0.0, 1.0)], 0.0, None);
/// let snap = snap_to_free(&grid, GridCell::new(2, 1), 500);
///
/// assert_eq!(snap.outcome, SnapOutcome::Moved);
/// assert_eq!(snap.cell, GridCell::new(2, 2));
/// ```
#[must_use]
pub fn snap_to_free(grid: &CellGrid, origin: GridCell, max_steps: usize) -> Snap {
    if grid.is_free(origin) {
        return Snap {
            cell: origin,
            outcome: SnapOutcome::AlreadyFree,
        };
    }

    let found = bfs_reach(origin, |cell: &GridCell| {
        cell.neighbors()
            .into_iter()
            .filter(|n| grid.in_bounds(*n))
            .collect::<Vec<_>>()
    })
    .take(max_steps)
    .find(|cell| grid.is_free(*cell));

    match found {
        Some(cell) => Snap {
            cell,
            outcome: SnapOutcome::Moved,
        },
        None => Snap {
            cell: origin,
            outcome: SnapOutcome::Unresolved,
        },
    }
}
