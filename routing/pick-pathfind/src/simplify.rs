//! Reducing lattice paths to their turning points.

use pick_spatial::GridCell;

/// Collapses runs of cells moving in the same direction.
///
/// Keeps the first cell, the last cell, and every cell where the direction
/// of travel changes. Input cells are expected to be 4-connected; a pair
/// that is not adjacent is treated as a turn so no cell is dropped across
/// a gap.
///
/// # Example
///
/// ```
/// use pick_pathfind::simplify::collapse_collinear;
/// use pick_spatial::GridCell;
///
/// let cells: Vec<GridCell> = [(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]
///     .into_iter()
///     .map(GridCell::from)
///     .collect();
///
/// assert_eq!(
///     collapse_collinear(&cells),
///     vec![GridCell::new(0, 0), GridCell::new(2, 0), GridCell::new(2, 2)],
/// );
/// ```
#[must_use]
pub fn collapse_collinear(cells: &[GridCell]) -> Vec<GridCell> {
    let (Some(first), Some(last)) = (cells.first(), cells.last()) else {
        return Vec::new();
    };
    if cells.len() <= 2 {
        return cells.to_vec();
    }

    let mut corners = vec![*first];
    for window in cells.windows(3) {
        let incoming = window[0].step_towards(window[1]);
        let outgoing = window[1].step_towards(window[2]);
        if incoming.is_none() || incoming != outgoing {
            corners.push(window[1]);
        }
    }
    corners.push(*last);
    corners
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(coords: &[(i32, i32)]) -> Vec<GridCell> {
        coords.iter().copied().map(GridCell::from).collect()
    }

    #[test]
    fn test_straight_run_keeps_endpoints() {
        let path = cells(&[(0, 0), (0, 1), (0, 2), (0, 3)]);
        assert_eq!(collapse_collinear(&path), cells(&[(0, 0), (0, 3)]));
    }

    #[test]
    fn test_staircase_keeps_every_corner() {
        let path = cells(&[(0, 0), (1, 0), (1, 1), (2, 1), (2, 2)]);
        assert_eq!(collapse_collinear(&path), path);
    }

    #[test]
    fn test_short_inputs() {
        assert!(collapse_collinear(&[]).is_empty());
        assert_eq!(collapse_collinear(&cells(&[(4, 4)])), cells(&[(4, 4)]));
        assert_eq!(
            collapse_collinear(&cells(&[(0, 0), (1, 0)])),
            cells(&[(0, 0), (1, 0)])
        );
    }

    #[test]
    fn test_gap_is_kept() {
        let path = cells(&[(0, 0), (1, 0), (5, 0), (6, 0)]);
        assert_eq!(collapse_collinear(&path), path);
    }
}
