//! Order-level stock shortage check.
//!
//! Independent of bin coordinates and of route generation: it compares the
//! ordered quantity of each material with all stock on hand.

use std::collections::BTreeMap;

use pick_types::{Demand, OrderLine, QTY_EPSILON, StockRecord};

/// Ordered and available amounts of one material.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaterialSupply {
    /// Total ordered quantity.
    pub ordered: f64,
    /// Total quantity in stock.
    pub available: f64,
}

impl MaterialSupply {
    /// Returns `true` if the stock cannot cover the order.
    #[must_use]
    pub fn is_short(&self) -> bool {
        self.available + QTY_EPSILON < self.ordered
    }

    /// Quantity the stock falls short by (zero when covered).
    #[must_use]
    pub fn missing(&self) -> f64 {
        (self.ordered - self.available).max(0.0)
    }
}

/// Supply overview per ordered material.
///
/// # Example
///
/// ```
/// use pick_optimize::ShortageReport;
/// use pick_types::{OrderLine, StockRecord};
///
/// let orders = vec![OrderLine::new("M1", 5.0), OrderLine::new("M2", 1.0)];
/// let stock = vec![
///     StockRecord::new("M1", "A", 2.0),
///     StockRecord::new("M1", "B", 2.0),
///     StockRecord::new("M2", "A", 1.0),
/// ];
///
/// let report = ShortageReport::new(&orders, &stock);
/// assert!(report.is_short("M1"));
/// assert!(!report.is_short("M2"));
/// assert_eq!(report.get("M1").unwrap().missing(), 1.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShortageReport {
    materials: BTreeMap<String, MaterialSupply>,
}

impl ShortageReport {
    /// Sums stock per ordered material.
    #[must_use]
    pub fn new(orders: &[OrderLine], stock: &[StockRecord]) -> Self {
        let demand = Demand::from_lines(orders);
        let mut materials: BTreeMap<String, MaterialSupply> = demand
            .materials()
            .map(|m| {
                let supply = MaterialSupply {
                    ordered: demand.outstanding(m),
                    available: 0.0,
                };
                (m.to_owned(), supply)
            })
            .collect();

        for record in stock {
            if let Some(supply) = materials.get_mut(&record.material) {
                supply.available += record.qty_available.max(0.0);
            }
        }
        Self { materials }
    }

    /// Supply figures of one material.
    #[must_use]
    pub fn get(&self, material: &str) -> Option<&MaterialSupply> {
        self.materials.get(material)
    }

    /// Returns `true` if the material is ordered and short.
    #[must_use]
    pub fn is_short(&self, material: &str) -> bool {
        self.get(material).is_some_and(MaterialSupply::is_short)
    }

    /// Iterates materials in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MaterialSupply)> {
        self.materials.iter().map(|(m, s)| (m.as_str(), s))
    }

    /// Materials that are short, ascending.
    pub fn short_materials(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|(_, s)| s.is_short()).map(|(m, _)| m)
    }

    /// Shortage flag per ordered material.
    #[must_use]
    pub fn flags(&self) -> BTreeMap<String, bool> {
        self.iter()
            .map(|(m, s)| (m.to_owned(), s.is_short()))
            .collect()
    }
}

/// Flags each ordered material whose total stock is below the ordered
/// quantity.
///
/// # Example
///
/// ```
/// use pick_optimize::shortages;
/// use pick_types::{OrderLine, StockRecord};
///
/// let flags = shortages(
///     &[OrderLine::new("M1", 3.0), OrderLine::new("M9", 1.0)],
///     &[StockRecord::new("M1", "A", 3.0)],
/// );
/// assert!(!flags["M1"]);
/// assert!(flags["M9"]);
/// ```
#[must_use]
pub fn shortages(orders: &[OrderLine], stock: &[StockRecord]) -> BTreeMap<String, bool> {
    ShortageReport::new(orders, stock).flags()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_duplicate_order_lines_are_summed() {
        let orders = vec![OrderLine::new("M1", 2.0), OrderLine::new("M1", 2.0)];
        let stock = vec![StockRecord::new("M1", "A", 3.0)];
        let report = ShortageReport::new(&orders, &stock);
        assert!(report.is_short("M1"));
        assert_relative_eq!(report.get("M1").unwrap().missing(), 1.0);
    }

    #[test]
    fn test_unordered_stock_ignored() {
        let report = ShortageReport::new(&[], &[StockRecord::new("M1", "A", 3.0)]);
        assert!(report.get("M1").is_none());
        assert!(!report.is_short("M1"));
    }

    #[test]
    fn test_exact_cover_is_not_short() {
        let orders = vec![OrderLine::new("M1", 0.3)];
        let stock = vec![
            StockRecord::new("M1", "A", 0.1),
            StockRecord::new("M1", "B", 0.2),
        ];
        assert!(!shortages(&orders, &stock)["M1"]);
    }

    #[test]
    fn test_short_materials_listed() {
        let orders = vec![
            OrderLine::new("M1", 1.0),
            OrderLine::new("M2", 1.0),
            OrderLine::new("M3", 1.0),
        ];
        let stock = vec![StockRecord::new("M2", "A", 1.0)];
        let report = ShortageReport::new(&orders, &stock);
        let short: Vec<_> = report.short_materials().collect();
        assert_eq!(short, vec!["M1", "M3"]);
    }
}
