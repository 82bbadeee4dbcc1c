//! Rack placement input and layout configuration.

use std::f64::consts::FRAC_PI_2;

use nalgebra::Point3;

use crate::error::{SpatialError, SpatialResult};
use crate::rect::Rect;

/// Identifier of a warehouse floor.
pub type FloorId = u32;

/// A single rack unit as placed in the floor layout.
///
/// The footprint is centred on `position`; `width` runs along x and `depth`
/// along z before rotation.
///
/// # Example
///
/// ```
/// use pick_spatial::{RackUnit, Rect};
/// use nalgebra::Point3;
/// use std::f64::consts::FRAC_PI_2;
///
/// let unit = RackUnit::new(Point3::new(10.0, 0.0, 5.0), 4.0, 1.0)
///     .with_rotation(FRAC_PI_2);
///
/// // A quarter turn swaps width and depth.
/// assert_eq!(unit.footprint(), Rect::new(9.5, 10.5, 3.0, 7.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RackUnit {
    /// Centre of the footprint in world coordinates.
    pub position: Point3<f64>,
    /// Rotation about the vertical axis, in radians.
    pub rotation: f64,
    /// Footprint extent along x before rotation.
    pub width: f64,
    /// Footprint extent along z before rotation.
    pub depth: f64,
}

impl RackUnit {
    /// Creates an unrotated rack unit.
    #[must_use]
    pub const fn new(position: Point3<f64>, width: f64, depth: f64) -> Self {
        Self {
            position,
            rotation: 0.0,
            width,
            depth,
        }
    }

    /// Sets the rotation about the vertical axis (radians).
    #[must_use]
    pub const fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Number of quarter turns after snapping the rotation to 90°.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn quarter_turns(&self) -> i64 {
        ((self.rotation / FRAC_PI_2).round() as i64).rem_euclid(4)
    }

    /// World-space footprint with the rotation snapped to a multiple of 90°.
    #[must_use]
    pub fn footprint(&self) -> Rect {
        let (w, d) = if self.quarter_turns() % 2 == 1 {
            (self.depth, self.width)
        } else {
            (self.width, self.depth)
        };
        Rect::from_center(self.position.x, self.position.z, w * 0.5, d * 0.5)
    }

    fn validate(&self, floor: FloorId, index: usize) -> SpatialResult<()> {
        let position_ok = self.position.iter().all(|v| v.is_finite());
        if !position_ok || !self.rotation.is_finite() {
            return Err(SpatialError::NonFinitePlacement { floor, index });
        }
        let dims_ok = self.width.is_finite()
            && self.depth.is_finite()
            && self.width > 0.0
            && self.depth > 0.0;
        if !dims_ok {
            return Err(SpatialError::InvalidFootprint {
                floor,
                index,
                width: self.width,
                depth: self.depth,
            });
        }
        Ok(())
    }
}

/// All rack units placed on one floor.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloorLayout {
    /// Floor identifier.
    pub floor: FloorId,
    /// Rack units on this floor.
    pub units: Vec<RackUnit>,
}

impl FloorLayout {
    /// Creates an empty layout for a floor.
    #[must_use]
    pub const fn new(floor: FloorId) -> Self {
        Self {
            floor,
            units: Vec::new(),
        }
    }

    /// Adds a rack unit.
    #[must_use]
    pub fn with_unit(mut self, unit: RackUnit) -> Self {
        self.units.push(unit);
        self
    }

    /// Checks every unit for usable placement and dimensions.
    ///
    /// # Errors
    ///
    /// Returns the first invalid unit found.
    pub fn validate(&self) -> SpatialResult<()> {
        self.units
            .iter()
            .enumerate()
            .try_for_each(|(i, unit)| unit.validate(self.floor, i))
    }
}

/// Parameters controlling how rack footprints become obstacles.
///
/// # Example
///
/// ```
/// use pick_spatial::LayoutConfig;
///
/// let config = LayoutConfig::default().with_wall_threshold(2.0);
/// assert!(config.validate().is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutConfig {
    /// Distance from the floor bounds under which a rack edge counts as
    /// standing against the wall.
    ///
    /// Default: `3.0`
    wall_threshold: f64,
    /// How far a wall-side edge is pushed outward.
    ///
    /// Default: `20.0`
    wall_margin: f64,
}

impl LayoutConfig {
    /// Creates the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            wall_threshold: 3.0,
            wall_margin: 20.0,
        }
    }

    /// Sets the wall detection threshold.
    #[must_use]
    pub const fn with_wall_threshold(mut self, threshold: f64) -> Self {
        self.wall_threshold = threshold;
        self
    }

    /// Sets the wall extension margin.
    #[must_use]
    pub const fn with_wall_margin(mut self, margin: f64) -> Self {
        self.wall_margin = margin;
        self
    }

    /// Returns the wall detection threshold.
    #[must_use]
    pub const fn wall_threshold(&self) -> f64 {
        self.wall_threshold
    }

    /// Returns the wall extension margin.
    #[must_use]
    pub const fn wall_margin(&self) -> f64 {
        self.wall_margin
    }

    /// Validates the configuration and returns any issues.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if !(self.wall_threshold.is_finite() && self.wall_threshold >= 0.0) {
            issues.push(format!(
                "wall_threshold must be finite and non-negative, got {}",
                self.wall_threshold
            ));
        }
        if !(self.wall_margin.is_finite() && self.wall_margin >= 0.0) {
            issues.push(format!(
                "wall_margin must be finite and non-negative, got {}",
                self.wall_margin
            ));
        }
        issues
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn unit(rotation: f64) -> RackUnit {
        RackUnit::new(Point3::origin(), 4.0, 2.0)
            .with_rotation(rotation)
    }

    #[test]
    fn test_rotation_snaps_to_quarter_turns() {
        assert_eq!(unit(0.0).quarter_turns(), 0);
        assert_eq!(unit(0.7).quarter_turns(), 0);
        assert_eq!(unit(0.9).quarter_turns(), 1);
        assert_eq!(unit(PI).quarter_turns(), 2);
        assert_eq!(unit(-FRAC_PI_2).quarter_turns(), 3);
        assert_eq!(unit(2.0 * PI).quarter_turns(), 0);
    }

    #[test]
    fn test_footprint_swaps_on_odd_turns() {
        assert_eq!(unit(0.0).footprint(), Rect::new(-2.0, 2.0, -1.0, 1.0));
        assert_eq!(unit(PI).footprint(), Rect::new(-2.0, 2.0, -1.0, 1.0));
        assert_eq!(unit(FRAC_PI_2).footprint(), Rect::new(-1.0, 1.0, -2.0, 2.0));
        assert_eq!(
            unit(-FRAC_PI_2).footprint(),
            Rect::new(-1.0, 1.0, -2.0, 2.0)
        );
    }

    #[test]
    fn test_validate_rejects_bad_units() {
        let flat = RackUnit::new(Point3::origin(), 0.0, 1.0);
        let layout = FloorLayout::new(3).with_unit(flat);
        assert!(matches!(
            layout.validate(),
            Err(SpatialError::InvalidFootprint { floor: 3, index: 0, .. })
        ));

        let layout = FloorLayout::new(1)
            .with_unit(RackUnit::new(Point3::origin(), 1.0, 1.0))
            .with_unit(RackUnit::new(Point3::new(f64::NAN, 0.0, 0.0), 1.0, 1.0));
        assert!(matches!(
            layout.validate(),
            Err(SpatialError::NonFinitePlacement { floor: 1, index: 1 })
        ));
    }

    #[test]
    fn test_layout_config_validate() {
        assert!(LayoutConfig::default().validate().is_empty());
        let issues = LayoutConfig::default()
            .with_wall_margin(-1.0)
            .with_wall_threshold(f64::INFINITY)
            .validate();
        assert_eq!(issues.len(), 2);
    }
}
