//! Bin coordinates and lookup.

use std::collections::HashMap;

use nalgebra::Point3;
use pick_spatial::FloorId;

use crate::location::Location;

/// Floor assumed for bins whose coordinate carries no floor id.
pub const DEFAULT_FLOOR: FloorId = 1;

/// Physical position of a bin.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinCoordinate {
    /// Bin identifier.
    pub bin: String,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate (height).
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
    /// Floor the bin is on, if recorded.
    pub floor: Option<FloorId>,
}

impl BinCoordinate {
    /// Creates a coordinate without a floor id.
    #[must_use]
    pub fn new(bin: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            bin: bin.into(),
            x,
            y,
            z,
            floor: None,
        }
    }

    /// Sets the floor id.
    #[must_use]
    pub fn on_floor(mut self, floor: FloorId) -> Self {
        self.floor = Some(floor);
        self
    }

    /// World position of the bin.
    #[must_use]
    pub fn point(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Lookup from bin identifier to location.
///
/// The coordinate table may be incomplete: [`BinMap::locate`] returns `None`
/// for unknown bins and for coordinates that are not finite, and callers
/// must then exclude the bin. There is no fallback position.
///
/// # Example
///
/// ```
/// use pick_types::{BinCoordinate, BinMap};
///
/// let bins = BinMap::new(vec![
///     BinCoordinate::new("A-01", 1.0, 0.0, 2.0),
///     BinCoordinate::new("B-07", 9.0, 1.5, 2.0).on_floor(2),
/// ]);
///
/// assert_eq!(bins.locate("A-01").unwrap().floor, 1);
/// assert_eq!(bins.locate("B-07").unwrap().floor, 2);
/// assert!(bins.locate("Z-99").is_none());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinMap {
    coords: HashMap<String, BinCoordinate>,
    default_floor: FloorId,
}

impl BinMap {
    /// Builds the lookup. Later entries for the same bin replace earlier ones.
    #[must_use]
    pub fn new(coords: impl IntoIterator<Item = BinCoordinate>) -> Self {
        Self {
            coords: coords.into_iter().map(|c| (c.bin.clone(), c)).collect(),
            default_floor: DEFAULT_FLOOR,
        }
    }

    /// Sets the floor used for coordinates without a floor id.
    #[must_use]
    pub fn with_default_floor(mut self, floor: FloorId) -> Self {
        self.default_floor = floor;
        self
    }

    /// Floor used for coordinates without a floor id.
    #[must_use]
    pub const fn default_floor(&self) -> FloorId {
        self.default_floor
    }

    /// Raw coordinate record of a bin.
    #[must_use]
    pub fn get(&self, bin: &str) -> Option<&BinCoordinate> {
        self.coords.get(bin)
    }

    /// Location of a bin, or `None` if it has no usable coordinate.
    #[must_use]
    pub fn locate(&self, bin: &str) -> Option<Location> {
        self.coords
            .get(bin)
            .filter(|c| c.is_finite())
            .map(|c| Location::new(c.point(), c.floor.unwrap_or(self.default_floor)))
    }

    /// Returns `true` if the bin has a usable coordinate.
    #[must_use]
    pub fn is_located(&self, bin: &str) -> bool {
        self.locate(bin).is_some()
    }

    /// Number of bins with a coordinate record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Returns `true` if there are no coordinate records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

impl Default for BinMap {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl FromIterator<BinCoordinate> for BinMap {
    fn from_iter<I: IntoIterator<Item = BinCoordinate>>(iter: I) -> Self {
        Self::new(iter)
    }
}
