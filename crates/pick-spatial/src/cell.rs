//! Integer lattice cells on the floor plane.

use nalgebra::Point3;

/// A discrete cell of the floor lattice.
///
/// The floor plane is spanned by the world `x` and `z` axes; height (`y`)
/// is not part of the lattice.
///
/// # Example
///
/// ```
/// use pick_spatial::GridCell;
/// use nalgebra::Point3;
///
/// let cell = GridCell::from_point(&Point3::new(2.4, 7.0, -1.6));
/// assert_eq!(cell, GridCell::new(2, -2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCell {
    /// X coordinate.
    pub x: i32,
    /// Z coordinate.
    pub z: i32,
}

/// One of the four lattice step directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// +x
    East,
    /// -x
    West,
    /// +z
    South,
    /// -z
    North,
}

impl Step {
    /// All four steps, in the order neighbours are generated.
    pub const ALL: [Self; 4] = [Self::East, Self::West, Self::South, Self::North];

    /// Returns the `(dx, dz)` offset of this step.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::East => (1, 0),
            Self::West => (-1, 0),
            Self::South => (0, 1),
            Self::North => (0, -1),
        }
    }
}

impl GridCell {
    /// Creates a new cell.
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Returns the cell nearest to a world point (rounding each axis).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_point(point: &Point3<f64>) -> Self {
        Self::new(point.x.round() as i32, point.z.round() as i32)
    }

    /// Converts the cell back to a world point at the given height.
    ///
    /// # Example
    ///
    /// ```
    /// use pick_spatial::GridCell;
    /// use nalgebra::Point3;
    ///
    /// assert_eq!(GridCell::new(3, 4).to_point(1.5), Point3::new(3.0, 1.5, 4.0));
    /// ```
    #[must_use]
    pub fn to_point(self, height: f64) -> Point3<f64> {
        Point3::new(f64::from(self.x), height, f64::from(self.z))
    }

    /// Returns the neighbouring cell one step away.
    #[must_use]
    pub const fn step(self, step: Step) -> Self {
        let (dx, dz) = step.offset();
        Self::new(self.x.saturating_add(dx), self.z.saturating_add(dz))
    }

    /// Returns the 4-connected neighbours (east, west, south, north).
    ///
    /// # Example
    ///
    /// ```
    /// use pick_spatial::GridCell;
    ///
    /// let neighbors = GridCell::new(0, 0).neighbors();
    /// assert_eq!(neighbors.len(), 4);
    /// assert!(neighbors.contains(&GridCell::new(0, -1)));
    /// ```
    #[must_use]
    pub const fn neighbors(self) -> [Self; 4] {
        [
            self.step(Step::East),
            self.step(Step::West),
            self.step(Step::South),
            self.step(Step::North),
        ]
    }

    /// Manhattan (L1) distance to another cell.
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.z.abs_diff(other.z)
    }

    /// Returns the step leading from `self` to an adjacent `other`, if any.
    #[must_use]
    pub fn step_towards(self, other: Self) -> Option<Step> {
        Step::ALL.into_iter().find(|&s| self.step(s) == other)
    }
}

impl From<(i32, i32)> for GridCell {
    fn from((x, z): (i32, i32)) -> Self {
        Self::new(x, z)
    }
}
