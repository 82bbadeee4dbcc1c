//! Quantity helpers.

use crate::error::{PickingError, PickingResult};

/// Quantities at or below this value count as zero.
pub const QTY_EPSILON: f64 = 1e-9;

/// Returns `true` if the quantity is meaningfully above zero.
#[must_use]
pub fn is_positive(qty: f64) -> bool {
    qty > QTY_EPSILON
}

/// Checks that a quantity is finite and non-negative.
///
/// # Errors
///
/// Returns [`PickingError::InvalidQuantity`] otherwise.
pub fn check_quantity(material: &str, qty: f64) -> PickingResult<()> {
    if qty.is_finite() && qty >= 0.0 {
        Ok(())
    } else {
        Err(PickingError::invalid_quantity(material, qty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_positive() {
        assert!(is_positive(1.0));
        assert!(is_positive(0.001));
        assert!(!is_positive(0.0));
        assert!(!is_positive(1e-12));
        assert!(!is_positive(-3.0));
    }

    #[test]
    fn test_check_quantity() {
        assert!(check_quantity("M", 0.0).is_ok());
        assert!(check_quantity("M", 12.5).is_ok());
        assert!(check_quantity("M", -0.5).is_err());
        assert!(check_quantity("M", f64::INFINITY).is_err());
        assert!(check_quantity("M", f64::NAN).is_err());
    }
}
