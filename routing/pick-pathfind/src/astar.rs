//! Bounded A* over the 4-connected floor lattice.
//!
//! Every step costs one unit and the heuristic is the Manhattan distance, so
//! the first time the goal is popped the path is shortest. Ties on the
//! estimated total cost are broken by insertion order, which makes the
//! result deterministic for a given grid.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hashbrown::{HashMap, HashSet};
use pick_spatial::{CellGrid, GridCell};
use tracing::trace;

use crate::heuristics::manhattan;

/// Result of a bounded grid search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A path was found. Cells run from start to goal inclusive.
    Found {
        /// Cells along the path.
        cells: Vec<GridCell>,
        /// Nodes expanded before the goal was reached.
        expanded: usize,
    },
    /// The expansion cap was reached before the goal.
    LimitReached {
        /// Nodes expanded (equal to the cap).
        expanded: usize,
    },
    /// The open set emptied without reaching the goal.
    Unreachable {
        /// Nodes expanded.
        expanded: usize,
    },
}

impl SearchOutcome {
    /// Number of nodes expanded by the search.
    #[must_use]
    pub const fn expanded(&self) -> usize {
        match self {
            Self::Found { expanded, .. }
            | Self::LimitReached { expanded }
            | Self::Unreachable { expanded } => *expanded,
        }
    }

    /// Returns the path cells if the search succeeded.
    #[must_use]
    pub fn cells(&self) -> Option<&[GridCell]> {
        match self {
            Self::Found { cells, .. } => Some(cells),
            _ => None,
        }
    }

    /// Returns `true` if a path was found.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    f: u32,
    order: u64,
    cell: GridCell,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: lowest f first, then earliest insertion.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Searches for a shortest 4-connected path from `start` to `goal`.
///
/// Blocked cells are never entered, with two exceptions: the search always
/// starts from `start`, and `goal` may be entered even when blocked. This
/// lets endpoints that could not be snapped to a free cell still terminate
/// the search when they border walkable space.
///
/// At most `max_expansions` nodes are expanded.
///
/// # Example
///
/// ```
/// use pick_pathfind::astar::search;
/// use pick_spatial::{CellGrid, GridCell, Rect};
///
/// // A wall at x = 2 spanning z = -2..=2.
/// let grid = CellGrid::from_obstacles(&[Rect::new(2.0, 2.0, -2.0, 2.0)], 0.0, None);
/// let outcome = search(&grid, GridCell::new(0, 0), GridCell::new(4, 0), 5000);
///
/// let cells = outcome.cells().unwrap();
/// assert_eq!(cells.first(), Some(&GridCell::new(0, 0)));
/// assert_eq!(cells.last(), Some(&GridCell::new(4, 0)));
/// // Detour around the wall: 4 across plus 3 up and 3 down.
/// assert_eq!(cells.len(), 11);
/// ```
#[must_use]
pub fn search(
    grid: &CellGrid,
    start: GridCell,
    goal: GridCell,
    max_expansions: usize,
) -> SearchOutcome {
    let mut open = BinaryHeap::new();
    let mut g_score: HashMap<GridCell, u32> = HashMap::new();
    let mut came_from: HashMap<GridCell, GridCell> = HashMap::new();
    let mut closed: HashSet<GridCell> = HashSet::new();
    let mut order: u64 = 0;
    let mut expanded = 0usize;

    g_score.insert(start, 0);
    open.push(OpenNode {
        f: manhattan(start, goal),
        order,
        cell: start,
    });

    while let Some(OpenNode { cell, .. }) = open.pop() {
        if cell == goal {
            trace!(expanded, "goal reached");
            return SearchOutcome::Found {
                cells: reconstruct(&came_from, goal),
                expanded,
            };
        }
        if !closed.insert(cell) {
            continue;
        }
        if expanded >= max_expansions {
            return SearchOutcome::LimitReached { expanded };
        }
        expanded += 1;

        let g = g_score.get(&cell).copied().unwrap_or(u32::MAX);
        for next in cell.neighbors() {
            if closed.contains(&next) || (next != goal && grid.is_blocked(next)) {
                continue;
            }
            let tentative = g.saturating_add(1);
            if g_score.get(&next).is_some_and(|&known| known <= tentative) {
                continue;
            }
            g_score.insert(next, tentative);
            came_from.insert(next, cell);
            order += 1;
            open.push(OpenNode {
                f: tentative.saturating_add(manhattan(next, goal)),
                order,
                cell: next,
            });
        }
    }

    SearchOutcome::Unreachable { expanded }
}

fn reconstruct(came_from: &HashMap<GridCell, GridCell>, goal: GridCell) -> Vec<GridCell> {
    let mut cells = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        cells.push(prev);
        current = prev;
    }
    cells.reverse();
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use pick_spatial::Rect;

    fn assert_contiguous(cells: &[GridCell]) {
        for pair in cells.windows(2) {
            assert_eq!(pair[0].manhattan_distance(pair[1]), 1, "{pair:?}");
        }
    }

    #[test]
    fn test_open_grid_straight_line() {
        let grid = CellGrid::open();
        let outcome = search(&grid, GridCell::new(0, 0), GridCell::new(5, 0), 5000);
        let cells = outcome.cells().unwrap();
        assert_eq!(cells.len(), 6);
        assert_contiguous(cells);
    }

    #[test]
    fn test_start_equals_goal() {
        let grid = CellGrid::open();
        let outcome = search(&grid, GridCell::new(3, 3), GridCell::new(3, 3), 5000);
        assert_eq!(outcome.cells(), Some(&[GridCell::new(3, 3)][..]));
        assert_eq!(outcome.expanded(), 0);
    }

    #[test]
    fn test_path_avoids_blocked_cells() {
        let grid = CellGrid::from_obstacles(&[Rect::new(2.0, 2.0, -3.0, 3.0)], 0.0, None);
        let outcome = search(&grid, GridCell::new(0, 0), GridCell::new(4, 0), 5000);
        let cells = outcome.cells().unwrap();
        assert_contiguous(cells);
        assert!(cells.iter().all(|c| grid.is_free(*c)));
        // 4 across, 4 up and 4 down.
        assert_eq!(cells.len(), 13);
    }

    #[test]
    fn test_enclosed_goal_is_unreachable() {
        // Ring of blocked cells around (0, 0), goal inside.
        let ring = [
            Rect::new(-1.0, 1.0, -1.0, -1.0),
            Rect::new(-1.0, 1.0, 1.0, 1.0),
            Rect::new(-1.0, -1.0, 0.0, 0.0),
            Rect::new(1.0, 1.0, 0.0, 0.0),
        ];
        let bounds = Rect::new(-3.0, 3.0, -3.0, 3.0);
        let mut obstacles = ring.to_vec();
        // Enclose the outside as well so the open set is finite.
        obstacles.extend([
            Rect::new(-4.0, 4.0, -4.0, -4.0),
            Rect::new(-4.0, 4.0, 4.0, 4.0),
            Rect::new(-4.0, -4.0, -3.0, 3.0),
            Rect::new(4.0, 4.0, -3.0, 3.0),
        ]);
        let grid = CellGrid::from_obstacles(&obstacles, 0.0, Some(bounds));
        let outcome = search(&grid, GridCell::new(3, 3), GridCell::new(0, 0), 5000);
        assert!(matches!(outcome, SearchOutcome::Unreachable { .. }));
    }

    #[test]
    fn test_expansion_cap() {
        let grid = CellGrid::from_obstacles(&[Rect::new(2.0, 2.0, -100.0, 100.0)], 0.0, None);
        let outcome = search(&grid, GridCell::new(0, 0), GridCell::new(4, 0), 50);
        assert_eq!(outcome, SearchOutcome::LimitReached { expanded: 50 });
    }

    #[test]
    fn test_blocked_goal_can_be_entered() {
        let grid = CellGrid::from_obstacles(&[Rect::new(3.0, 3.0, 0.0, 0.0)], 0.0, None);
        let outcome = search(&grid, GridCell::new(0, 0), GridCell::new(3, 0), 5000);
        assert_eq!(outcome.cells().map(<[GridCell]>::len), Some(4));
    }

    #[test]
    fn test_deterministic() {
        let grid = CellGrid::from_obstacles(&[Rect::new(1.0, 3.0, 1.0, 3.0)], 0.0, None);
        let a = search(&grid, GridCell::new(0, 0), GridCell::new(5, 5), 5000);
        let b = search(&grid, GridCell::new(0, 0), GridCell::new(5, 5), 5000);
        assert_eq!(a, b);
    }
}
