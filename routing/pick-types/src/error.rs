//! Error types for picking operations.
//!
//! Unmet demand, unlocated stock and path-search fallbacks are reported as
//! data by the planners. [`PickingError`] covers the remaining hard failures:
//! malformed input and misuse of a task's lifecycle.

use crate::task::TaskStatus;

/// Errors that can occur while validating picking input or updating tasks.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PickingError {
    /// A quantity is negative or not a finite number.
    #[error("invalid quantity {qty} for material {material}")]
    InvalidQuantity {
        /// Material the quantity belongs to.
        material: String,
        /// The offending quantity.
        qty: f64,
    },

    /// A record names no material or no bin.
    #[error("missing identifier: {0}")]
    MissingIdentifier(String),

    /// A task was asked to change status in a way its lifecycle forbids.
    #[error("task {material}@{bin} is already {status:?}")]
    InvalidTransition {
        /// Material of the task.
        material: String,
        /// Bin of the task.
        bin: String,
        /// Current status of the task.
        status: TaskStatus,
    },

    /// A bin has no known coordinate.
    #[error("bin {0} has no known coordinate")]
    UnlocatedBin(String),

    /// There is no pending task to act on.
    #[error("no pending task")]
    NoPendingTask,

    /// An invalid configuration parameter was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Saving or loading planning state failed.
    #[error("persistence failed: {0}")]
    Persistence(String),
}

impl PickingError {
    /// Creates an invalid quantity error.
    ///
    /// # Example
    ///
    /// ```
    /// use pick_types::PickingError;
    ///
    /// let error = PickingError::invalid_quantity("M-100", -2.0);
    /// assert!(error.to_string().contains("M-100"));
    /// ```
    #[must_use]
    pub fn invalid_quantity(material: impl Into<String>, qty: f64) -> Self {
        Self::InvalidQuantity {
            material: material.into(),
            qty,
        }
    }

    /// Creates an invalid configuration error with the given message.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Returns `true` if this error was caused by malformed input data.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidQuantity { .. } | Self::MissingIdentifier(_) | Self::UnlocatedBin(_)
        )
    }
}

/// Result alias for picking operations.
pub type PickingResult<T> = Result<T, PickingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_display() {
        let error = PickingError::InvalidTransition {
            material: "M1".into(),
            bin: "A-01".into(),
            status: TaskStatus::Picked,
        };
        assert_eq!(error.to_string(), "task M1@A-01 is already Picked");
    }

    #[test]
    fn test_is_input_error() {
        let error = PickingError::invalid_quantity("M1", f64::NAN);
        assert!(error.is_input_error());
        assert!(PickingError::UnlocatedBin("X".into()).is_input_error());
        assert!(!PickingError::NoPendingTask.is_input_error());
        assert!(!PickingError::invalid_config("x").is_input_error());
    }
}
