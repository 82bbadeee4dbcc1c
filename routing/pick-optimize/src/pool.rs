//! Working copy of the stock that can still be allocated.

use pick_types::{BinMap, Demand, Location, StockRecord, is_positive};

/// One allocatable stock record.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolEntry {
    /// Material identifier.
    pub material: String,
    /// Bin identifier.
    pub bin: String,
    /// Where the bin is.
    pub location: Location,
    /// Quantity not yet allocated.
    pub remaining: f64,
}

/// Stock eligible for allocation, in the order the records were supplied.
///
/// Holds at most one entry per material and bin; records for the same pair
/// are summed into the entry of the first one. Built from a snapshot of the caller's stock table; allocating from the
/// pool never touches the original records. Records are only eligible when
/// their material is ordered, their bin has a usable coordinate and they
/// hold a positive quantity.
///
/// # Example
///
/// ```
/// use pick_optimize::StockPool;
/// use pick_types::{BinCoordinate, BinMap, Demand, OrderLine, StockRecord};
///
/// let demand = Demand::from_lines(&[OrderLine::new("M1", 4.0)]);
/// let stock = vec![
///     StockRecord::new("M1", "A-01", 3.0),
///     StockRecord::new("M1", "LOST", 9.0), // no coordinate
///     StockRecord::new("M2", "A-01", 1.0), // not ordered
/// ];
/// let bins = BinMap::new(vec![BinCoordinate::new("A-01", 0.0, 0.0, 1.0)]);
///
/// let pool = StockPool::new(&stock, &bins, &demand);
/// assert_eq!(pool.len(), 1);
/// assert_eq!(pool.available("M1"), 3.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StockPool {
    entries: Vec<PoolEntry>,
}

impl StockPool {
    /// Builds the pool from a stock snapshot.
    #[must_use]
    pub fn new(stock: &[StockRecord], bins: &BinMap, demand: &Demand) -> Self {
        let mut entries: Vec<PoolEntry> = Vec::new();
        for record in stock
            .iter()
            .filter(|r| demand.contains(&r.material) && is_positive(r.qty_available))
        {
            // Records sharing a bin are pooled, keeping first-seen order.
            if let Some(entry) = entries
                .iter_mut()
                .find(|e| e.material == record.material && e.bin == record.bin)
            {
                entry.remaining += record.qty_available;
                continue;
            }
            if let Some(location) = bins.locate(&record.bin) {
                entries.push(PoolEntry {
                    material: record.material.clone(),
                    bin: record.bin.clone(),
                    location,
                    remaining: record.qty_available,
                });
            }
        }
        Self { entries }
    }

    /// Eligible entries in supply order.
    #[must_use]
    pub fn entries(&self) -> &[PoolEntry] {
        &self.entries
    }

    /// Number of entries with stock left.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is left to allocate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total unallocated quantity of a material.
    #[must_use]
    pub fn available(&self, material: &str) -> f64 {
        self.entries
            .iter()
            .filter(|e| e.material == material)
            .map(|e| e.remaining)
            .sum()
    }

    /// Allocates up to `qty` from the entry at `index`.
    ///
    /// Returns the quantity actually taken. Exhausted entries are removed, so
    /// indices past `index` shift down by one when that happens.
    pub fn take(&mut self, index: usize, qty: f64) -> f64 {
        let Some(entry) = self.entries.get_mut(index) else {
            return 0.0;
        };
        let taken = qty.clamp(0.0, entry.remaining);
        entry.remaining -= taken;
        if !is_positive(entry.remaining) {
            self.entries.remove(index);
        }
        taken
    }
}
