//! Picking tasks.

use nalgebra::Point3;
use pick_spatial::FloorId;

use crate::error::{PickingError, PickingResult};
use crate::location::Location;
use crate::quantity::check_quantity;

/// Lifecycle state of a picking task.
///
/// A task moves from `Pending` to `Picked` exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TaskStatus {
    /// Waiting to be picked.
    #[default]
    Pending,
    /// Confirmed by the worker.
    Picked,
}

/// One instruction: pick `qty_to_pick` of `material` from `bin`.
///
/// `sequence` is a display/ordering field that is reassigned whenever the
/// list is re-sequenced; `(material, bin)` identifies a task within one
/// planning epoch.
///
/// # Example
///
/// ```
/// use pick_types::{Location, PickingTask, TaskStatus};
/// use nalgebra::Point3;
///
/// let mut task = PickingTask::new("M1", "A-01", 5.0, Location::new(Point3::new(2.0, 0.0, 3.0), 1));
/// assert_eq!(task.status, TaskStatus::Pending);
///
/// task.confirm(3.0).unwrap();
/// assert!(task.is_picked());
/// assert_eq!(task.confirmed_qty(), 3.0);
/// assert!(task.confirm(1.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PickingTask {
    /// Position in the route, starting at 1. Zero until sequenced.
    pub sequence: u32,
    /// Material identifier.
    pub material: String,
    /// Bin identifier.
    pub bin: String,
    /// Planned quantity; always greater than zero.
    pub qty_to_pick: f64,
    /// Quantity actually confirmed by the worker.
    pub picked_qty: Option<f64>,
    /// Bin position.
    pub coordinates: Point3<f64>,
    /// Travel distance from the previous stop.
    pub distance_from_last: f64,
    /// Floor the bin is on.
    pub floor: FloorId,
    /// `true` when this task is the first on a new floor.
    pub start_new_section: bool,
    /// Lifecycle state.
    pub status: TaskStatus,
}

/// Identity of a task within one planning epoch.
///
/// Sequence numbers change on every replan; the `(material, bin)` pair does
/// not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskKey {
    /// Material identifier.
    pub material: String,
    /// Bin identifier.
    pub bin: String,
}

impl TaskKey {
    /// Creates a key.
    #[must_use]
    pub fn new(material: impl Into<String>, bin: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            bin: bin.into(),
        }
    }
}

impl std::fmt::Display for TaskKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.material, self.bin)
    }
}

impl PickingTask {
    /// Creates an unsequenced pending task.
    #[must_use]
    pub fn new(
        material: impl Into<String>,
        bin: impl Into<String>,
        qty_to_pick: f64,
        location: Location,
    ) -> Self {
        Self {
            sequence: 0,
            material: material.into(),
            bin: bin.into(),
            qty_to_pick,
            picked_qty: None,
            coordinates: location.point,
            distance_from_last: 0.0,
            floor: location.floor,
            start_new_section: false,
            status: TaskStatus::Pending,
        }
    }

    /// Where the task is picked.
    #[must_use]
    pub const fn location(&self) -> Location {
        Location::new(self.coordinates, self.floor)
    }

    /// Returns `true` while the task waits to be picked.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }

    /// Returns `true` once the task is confirmed.
    #[must_use]
    pub fn is_picked(&self) -> bool {
        self.status == TaskStatus::Picked
    }

    /// Returns `true` if the task is for this material in this bin.
    #[must_use]
    pub fn targets(&self, material: &str, bin: &str) -> bool {
        self.material == material && self.bin == bin
    }

    /// The `(material, bin)` identity of this task.
    #[must_use]
    pub fn key(&self) -> TaskKey {
        TaskKey::new(self.material.clone(), self.bin.clone())
    }

    /// Quantity counted as picked: the confirmed quantity when recorded,
    /// the planned quantity otherwise.
    #[must_use]
    pub fn confirmed_qty(&self) -> f64 {
        self.picked_qty.unwrap_or(self.qty_to_pick)
    }

    /// Confirms the pick at the planned bin.
    ///
    /// # Errors
    ///
    /// Fails if the task was already picked or the quantity is invalid.
    pub fn confirm(&mut self, picked_qty: f64) -> PickingResult<()> {
        self.ensure_pending()?;
        check_quantity(&self.material, picked_qty)?;
        self.picked_qty = Some(picked_qty);
        self.status = TaskStatus::Picked;
        Ok(())
    }

    /// Confirms the pick at a substitute bin.
    ///
    /// # Errors
    ///
    /// Fails if the task was already picked or the quantity is invalid.
    pub fn confirm_at(
        &mut self,
        bin: impl Into<String>,
        location: Location,
        picked_qty: f64,
    ) -> PickingResult<()> {
        self.ensure_pending()?;
        check_quantity(&self.material, picked_qty)?;
        self.bin = bin.into();
        self.coordinates = location.point;
        self.floor = location.floor;
        self.picked_qty = Some(picked_qty);
        self.status = TaskStatus::Picked;
        Ok(())
    }

    fn ensure_pending(&self) -> PickingResult<()> {
        if self.is_pending() {
            Ok(())
        } else {
            Err(PickingError::InvalidTransition {
                material: self.material.clone(),
                bin: self.bin.clone(),
                status: self.status,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn task() -> PickingTask {
        PickingTask::new(
            "M1",
            "A-01",
            5.0,
            Location::new(Point3::new(1.0, 0.0, 1.0), 1),
        )
    }

    #[test]
    fn test_new_task_is_unsequenced_pending() {
        let t = task();
        assert_eq!(t.sequence, 0);
        assert!(t.is_pending());
        assert!(!t.start_new_section);
        assert!(t.picked_qty.is_none());
        assert_relative_eq!(t.confirmed_qty(), 5.0);
    }

    #[test]
    fn test_confirm_at_substitute_bin() {
        let mut t = task();
        t.confirm_at("B-02", Location::new(Point3::new(7.0, 0.0, 2.0), 2), 4.0)
            .unwrap();
        assert_eq!(t.bin, "B-02");
        assert_eq!(t.floor, 2);
        assert_relative_eq!(t.coordinates.x, 7.0);
        assert_relative_eq!(t.confirmed_qty(), 4.0);
        assert!(t.targets("M1", "B-02"));
    }

    #[test]
    fn test_confirm_rejects_invalid_quantity() {
        let mut t = task();
        assert!(matches!(
            t.confirm(-1.0),
            Err(PickingError::InvalidQuantity { .. })
        ));
        assert!(t.is_pending());
    }

    #[test]
    fn test_confirm_zero_is_allowed() {
        let mut t = task();
        t.confirm(0.0).unwrap();
        assert!(t.is_picked());
        assert_relative_eq!(t.confirmed_qty(), 0.0);
    }

    #[test]
    fn test_key_follows_substitution() {
        let mut t = task();
        assert_eq!(t.key(), TaskKey::new("M1", "A-01"));
        t.confirm_at("B-02", Location::new(Point3::new(7.0, 0.0, 2.0), 1), 5.0)
            .unwrap();
        assert_eq!(t.key().to_string(), "M1@B-02");
    }

    #[test]
    fn test_double_confirm_fails() {
        let mut t = task();
        t.confirm(5.0).unwrap();
        let err = t.confirm(5.0).unwrap_err();
        assert!(matches!(
            err,
            PickingError::InvalidTransition {
                status: TaskStatus::Picked,
                ..
            }
        ));
    }
}
