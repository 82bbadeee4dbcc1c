//! Stock snapshot records.

use crate::error::{PickingError, PickingResult};
use crate::quantity::check_quantity;

/// Available quantity of one material in one bin.
///
/// Records are an immutable snapshot: allocation works on a private working
/// copy and never decrements `qty_available` here.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StockRecord {
    /// Material identifier.
    pub material: String,
    /// Bin (storage location) identifier.
    pub bin: String,
    /// Quantity available in the bin.
    pub qty_available: f64,
    /// Free-text material description.
    pub description: String,
}

impl StockRecord {
    /// Creates a stock record with an empty description.
    #[must_use]
    pub fn new(material: impl Into<String>, bin: impl Into<String>, qty_available: f64) -> Self {
        Self {
            material: material.into(),
            bin: bin.into(),
            qty_available,
            description: String::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Checks that the record names a material and bin and has a usable
    /// quantity.
    ///
    /// # Errors
    ///
    /// Returns an error for missing identifiers or an invalid quantity.
    pub fn validate(&self) -> PickingResult<()> {
        if self.material.trim().is_empty() {
            return Err(PickingError::MissingIdentifier("stock material".into()));
        }
        if self.bin.trim().is_empty() {
            return Err(PickingError::MissingIdentifier(format!(
                "bin for material {}",
                self.material
            )));
        }
        check_quantity(&self.material, self.qty_available)
    }
}
