//! Axis-aligned rectangles on the floor plane.

use nalgebra::Point3;

use crate::cell::GridCell;

/// An axis-aligned rectangle in the floor (`x`, `z`) plane.
///
/// Used both for rack footprints (obstacles) and for floor bounds.
///
/// # Example
///
/// ```
/// use pick_spatial::Rect;
///
/// let rack = Rect::new(0.0, 4.0, 0.0, 1.0);
/// assert!(rack.contains_xz(2.0, 0.5));
/// assert!(!rack.contains_xz(5.0, 0.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Minimum x.
    pub min_x: f64,
    /// Maximum x.
    pub max_x: f64,
    /// Minimum z.
    pub min_z: f64,
    /// Maximum z.
    pub max_z: f64,
}

impl Rect {
    /// Creates a rectangle from its extents.
    ///
    /// Extents given in the wrong order are swapped.
    #[must_use]
    pub fn new(min_x: f64, max_x: f64, min_z: f64, max_z: f64) -> Self {
        Self {
            min_x: min_x.min(max_x),
            max_x: min_x.max(max_x),
            min_z: min_z.min(max_z),
            max_z: min_z.max(max_z),
        }
    }

    /// Creates a rectangle centred on `(cx, cz)` with the given half sizes.
    ///
    /// # Example
    ///
    /// ```
    /// use pick_spatial::Rect;
    ///
    /// let rect = Rect::from_center(5.0, 5.0, 2.0, 1.0);
    /// assert_eq!(rect, Rect::new(3.0, 7.0, 4.0, 6.0));
    /// ```
    #[must_use]
    pub fn from_center(cx: f64, cz: f64, half_width: f64, half_depth: f64) -> Self {
        Self::new(
            cx - half_width,
            cx + half_width,
            cz - half_depth,
            cz + half_depth,
        )
    }

    /// Extent along x.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent along z.
    #[must_use]
    pub fn depth(&self) -> f64 {
        self.max_z - self.min_z
    }

    /// Centre of the rectangle at the given height.
    #[must_use]
    pub fn center(&self, height: f64) -> Point3<f64> {
        Point3::new(
            (self.min_x + self.max_x) * 0.5,
            height,
            (self.min_z + self.max_z) * 0.5,
        )
    }

    /// Checks whether a floor-plane position lies inside (boundary included).
    #[must_use]
    pub fn contains_xz(&self, x: f64, z: f64) -> bool {
        x >= self.min_x && x <= self.max_x && z >= self.min_z && z <= self.max_z
    }

    /// Checks whether a lattice cell centre lies inside.
    #[must_use]
    pub fn contains_cell(&self, cell: GridCell) -> bool {
        self.contains_xz(f64::from(cell.x), f64::from(cell.z))
    }

    /// Returns a copy grown by `padding` on every side.
    #[must_use]
    pub fn padded(&self, padding: f64) -> Self {
        Self {
            min_x: self.min_x - padding,
            max_x: self.max_x + padding,
            min_z: self.min_z - padding,
            max_z: self.max_z + padding,
        }
    }

    /// Returns the smallest rectangle containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            max_x: self.max_x.max(other.max_x),
            min_z: self.min_z.min(other.min_z),
            max_z: self.max_z.max(other.max_z),
        }
    }

    /// Checks whether two rectangles overlap (touching counts).
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_z <= other.max_z
            && self.max_z >= other.min_z
    }

    /// Inclusive range of lattice cells whose centres lie inside.
    ///
    /// Returns `None` when no lattice point is covered.
    ///
    /// # Example
    ///
    /// ```
    /// use pick_spatial::{GridCell, Rect};
    ///
    /// let (lo, hi) = Rect::new(0.5, 2.5, -0.2, 0.2).cell_range().unwrap();
    /// assert_eq!(lo, GridCell::new(1, 0));
    /// assert_eq!(hi, GridCell::new(2, 0));
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn cell_range(&self) -> Option<(GridCell, GridCell)> {
        let lo = GridCell::new(self.min_x.ceil() as i32, self.min_z.ceil() as i32);
        let hi = GridCell::new(self.max_x.floor() as i32, self.max_z.floor() as i32);
        (lo.x <= hi.x && lo.z <= hi.z).then_some((lo, hi))
    }

    /// Returns `true` when every edge is a finite number.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.max_x.is_finite()
            && self.min_z.is_finite()
            && self.max_z.is_finite()
    }
}
