//! Error types for layout geometry.

/// Errors that can occur while building floor geometry.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SpatialError {
    /// A rack unit has a non-finite or non-positive footprint dimension.
    #[error("rack unit {index} on floor {floor} has invalid footprint {width}x{depth}")]
    InvalidFootprint {
        /// Floor the unit belongs to.
        floor: u32,
        /// Position of the unit in its floor layout.
        index: usize,
        /// Footprint width (x extent before rotation).
        width: f64,
        /// Footprint depth (z extent before rotation).
        depth: f64,
    },

    /// A rack unit position or rotation is not a finite number.
    #[error("rack unit {index} on floor {floor} has a non-finite placement")]
    NonFinitePlacement {
        /// Floor the unit belongs to.
        floor: u32,
        /// Position of the unit in its floor layout.
        index: usize,
    },

    /// The same floor id appears more than once in a layout set.
    #[error("floor {0} is defined more than once")]
    DuplicateFloor(u32),

    /// A layout configuration value is out of range.
    #[error("invalid layout configuration: {0}")]
    InvalidConfig(String),
}

impl SpatialError {
    /// Creates an invalid configuration error with the given message.
    ///
    /// # Example
    ///
    /// ```
    /// use pick_spatial::SpatialError;
    ///
    /// let error = SpatialError::invalid_config("wall margin must be finite");
    /// assert!(error.to_string().contains("wall margin"));
    /// ```
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

/// Result alias for layout operations.
pub type SpatialResult<T> = Result<T, SpatialError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_footprint_display() {
        let error = SpatialError::InvalidFootprint {
            floor: 2,
            index: 7,
            width: -1.0,
            depth: 3.0,
        };
        let msg = error.to_string();
        assert!(msg.contains("rack unit 7"));
        assert!(msg.contains("floor 2"));
    }

    #[test]
    fn test_duplicate_floor_display() {
        let error = SpatialError::DuplicateFloor(4);
        assert_eq!(error.to_string(), "floor 4 is defined more than once");
    }

    #[test]
    fn test_invalid_config_helper() {
        let error = SpatialError::invalid_config("threshold");
        let SpatialError::InvalidConfig(msg) = error else {
            panic!("expected a config error");
        };
        assert_eq!(msg, "threshold");
    }
}
