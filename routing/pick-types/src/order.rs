//! Order demand.

use std::collections::BTreeMap;

use crate::error::{PickingError, PickingResult};
use crate::quantity::{check_quantity, is_positive};

/// One line of a material order.
///
/// Order lines are the source of truth for demand and are never mutated by
/// the planners; remaining demand lives in a separate [`Demand`] ledger.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderLine {
    /// Material identifier.
    pub material: String,
    /// Ordered quantity.
    pub qty: f64,
}

impl OrderLine {
    /// Creates a new order line.
    #[must_use]
    pub fn new(material: impl Into<String>, qty: f64) -> Self {
        Self {
            material: material.into(),
            qty,
        }
    }

    /// Checks that the line names a material and has a usable quantity.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty material or an invalid quantity.
    pub fn validate(&self) -> PickingResult<()> {
        if self.material.trim().is_empty() {
            return Err(PickingError::MissingIdentifier(
                "order line material".into(),
            ));
        }
        check_quantity(&self.material, self.qty)
    }
}

/// Outstanding demand per material.
///
/// Lines for the same material are summed. Iteration order is the material
/// name order, which keeps everything built on top of it deterministic.
///
/// # Example
///
/// ```
/// use pick_types::{Demand, OrderLine};
///
/// let mut demand = Demand::from_lines(&[
///     OrderLine::new("M1", 5.0),
///     OrderLine::new("M2", 2.0),
///     OrderLine::new("M1", 1.0),
/// ]);
/// assert_eq!(demand.outstanding("M1"), 6.0);
///
/// demand.consume("M1", 4.0);
/// assert_eq!(demand.outstanding("M1"), 2.0);
/// assert!(!demand.is_satisfied());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Demand {
    remaining: BTreeMap<String, f64>,
}

impl Demand {
    /// Builds the demand ledger from order lines.
    #[must_use]
    pub fn from_lines(lines: &[OrderLine]) -> Self {
        let mut remaining = BTreeMap::new();
        for line in lines {
            *remaining.entry(line.material.clone()).or_insert(0.0) += line.qty.max(0.0);
        }
        Self { remaining }
    }

    /// Ordered quantity still outstanding for a material (zero if unknown).
    #[must_use]
    pub fn outstanding(&self, material: &str) -> f64 {
        self.remaining
            .get(material)
            .copied()
            .unwrap_or(0.0)
            .max(0.0)
    }

    /// Returns `true` if the material is part of the order.
    #[must_use]
    pub fn contains(&self, material: &str) -> bool {
        self.remaining.contains_key(material)
    }

    /// Returns `true` if the material still needs picking.
    #[must_use]
    pub fn needs(&self, material: &str) -> bool {
        is_positive(self.outstanding(material))
    }

    /// Reduces the outstanding quantity of a material.
    pub fn consume(&mut self, material: &str, qty: f64) {
        if let Some(rem) = self.remaining.get_mut(material) {
            *rem -= qty;
        }
    }

    /// Returns `true` when no material has outstanding demand.
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.remaining.values().all(|&q| !is_positive(q))
    }

    /// Materials in the order, ascending.
    pub fn materials(&self) -> impl Iterator<Item = &str> {
        self.remaining.keys().map(String::as_str)
    }

    /// Materials with outstanding demand and the amount still owed.
    #[must_use]
    pub fn unmet(&self) -> BTreeMap<String, f64> {
        self.remaining
            .iter()
            .filter(|(_, q)| is_positive(**q))
            .map(|(m, q)| (m.clone(), *q))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_validate() {
        assert!(OrderLine::new("M1", 3.0).validate().is_ok());
        assert!(OrderLine::new(" ", 3.0).validate().is_err());
        assert!(OrderLine::new("M1", -1.0).validate().is_err());
    }

    #[test]
    fn test_unknown_material_has_no_demand() {
        let demand = Demand::from_lines(&[OrderLine::new("M1", 1.0)]);
        assert_relative_eq!(demand.outstanding("M9"), 0.0);
        assert!(!demand.contains("M9"));
        assert!(!demand.needs("M9"));
    }

    #[test]
    fn test_overconsumption_clamps_outstanding() {
        let mut demand = Demand::from_lines(&[OrderLine::new("M1", 2.0)]);
        demand.consume("M1", 5.0);
        assert_relative_eq!(demand.outstanding("M1"), 0.0);
        assert!(demand.is_satisfied());
        assert!(demand.unmet().is_empty());
    }

    #[test]
    fn test_zero_quantity_line_is_satisfied() {
        let demand = Demand::from_lines(&[OrderLine::new("M1", 0.0)]);
        assert!(demand.contains("M1"));
        assert!(demand.is_satisfied());
    }

    #[test]
    fn test_unmet_lists_residuals() {
        let mut demand = Demand::from_lines(&[OrderLine::new("A", 4.0), OrderLine::new("B", 1.0)]);
        demand.consume("A", 1.5);
        demand.consume("B", 1.0);
        let unmet = demand.unmet();
        assert_eq!(unmet.len(), 1);
        assert_relative_eq!(unmet["A"], 2.5);
    }
}
