//! Configuration types for path search and route generation.
//!
//! # Example
//!
//! ```
//! use pick_types::{RouteConfig, SearchConfig};
//! use nalgebra::Point3;
//!
//! let search = SearchConfig::default()
//!     .with_padding(0.75)
//!     .with_max_expansions(20_000);
//! assert!(search.validate().is_empty());
//!
//! let route = RouteConfig::default().with_entry(Point3::new(0.0, 0.0, -5.0), 1);
//! assert_eq!(route.entry().floor, 1);
//! ```

use nalgebra::Point3;
use pick_spatial::FloorId;

use crate::bin::DEFAULT_FLOOR;
use crate::location::Location;

/// Configuration for grid path search.
///
/// Defaults:
/// - Padding: 0.5 units around each obstacle
/// - Endpoint snapping: at most 500 visited cells
/// - A* search: at most 5000 expansions
/// - Splice tolerance: 0.1 units
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Distance obstacles are grown by before rasterizing.
    padding: f64,
    /// Maximum cells visited while snapping an endpoint to free space.
    snap_max_steps: usize,
    /// Maximum A* node expansions before falling back.
    max_expansions: usize,
    /// Snapped endpoints farther than this from the real point get the real
    /// point spliced onto the path.
    splice_tolerance: f64,
}

impl SearchConfig {
    /// Creates the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            padding: 0.5,
            snap_max_steps: 500,
            max_expansions: 5000,
            splice_tolerance: 0.1,
        }
    }

    /// Sets the obstacle padding.
    #[must_use]
    pub const fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the endpoint snapping cap.
    #[must_use]
    pub const fn with_snap_max_steps(mut self, steps: usize) -> Self {
        self.snap_max_steps = steps;
        self
    }

    /// Sets the A* expansion cap.
    #[must_use]
    pub const fn with_max_expansions(mut self, expansions: usize) -> Self {
        self.max_expansions = expansions;
        self
    }

    /// Sets the endpoint splice tolerance.
    #[must_use]
    pub const fn with_splice_tolerance(mut self, tolerance: f64) -> Self {
        self.splice_tolerance = tolerance;
        self
    }

    /// Returns the obstacle padding.
    #[must_use]
    pub const fn padding(&self) -> f64 {
        self.padding
    }

    /// Returns the endpoint snapping cap.
    #[must_use]
    pub const fn snap_max_steps(&self) -> usize {
        self.snap_max_steps
    }

    /// Returns the A* expansion cap.
    #[must_use]
    pub const fn max_expansions(&self) -> usize {
        self.max_expansions
    }

    /// Returns the endpoint splice tolerance.
    #[must_use]
    pub const fn splice_tolerance(&self) -> f64 {
        self.splice_tolerance
    }

    /// Validates the configuration and returns any issues.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !(self.padding.is_finite() && self.padding >= 0.0) {
            issues.push(format!(
                "padding must be finite and non-negative, got {}",
                self.padding
            ));
        }
        if self.max_expansions == 0 {
            issues.push("max_expansions must be positive".to_string());
        }
        if !(self.splice_tolerance.is_finite() && self.splice_tolerance >= 0.0) {
            issues.push(format!(
                "splice_tolerance must be finite and non-negative, got {}",
                self.splice_tolerance
            ));
        }

        issues
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for initial route generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteConfig {
    /// Where every route starts (dock or door).
    entry: Location,
}

impl RouteConfig {
    /// Creates a configuration starting at the origin of the default floor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entry: Location::new(Point3::origin(), DEFAULT_FLOOR),
        }
    }

    /// Sets the route entry point.
    #[must_use]
    pub const fn with_entry(mut self, point: Point3<f64>, floor: FloorId) -> Self {
        self.entry = Location::new(point, floor);
        self
    }

    /// Returns the route entry point.
    #[must_use]
    pub const fn entry(&self) -> Location {
        self.entry
    }

    /// Validates the configuration and returns any issues.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if !self.entry.point.iter().all(|v| v.is_finite()) {
            issues.push(format!(
                "entry point must be finite, got {}",
                self.entry.point
            ));
        }
        issues
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_search_defaults() {
        let config = SearchConfig::default();
        assert_relative_eq!(config.padding(), 0.5);
        assert_eq!(config.snap_max_steps(), 500);
        assert_eq!(config.max_expansions(), 5000);
        assert_relative_eq!(config.splice_tolerance(), 0.1);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_search_validate_reports_each_issue() {
        let issues = SearchConfig::default()
            .with_padding(-1.0)
            .with_max_expansions(0)
            .with_splice_tolerance(f64::NAN)
            .validate();
        assert_eq!(issues.len(), 3);
        assert!(issues[0].contains("padding"));
    }

    #[test]
    fn test_route_config_validate() {
        assert!(RouteConfig::default().validate().is_empty());
        let nowhere = Point3::new(f64::NAN, 0.0, 0.0);
        let config = RouteConfig::default().with_entry(nowhere, 1);
        assert_eq!(config.validate().len(), 1);
    }
}
