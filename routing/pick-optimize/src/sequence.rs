//! Ordering and numbering of task lists.

use pick_types::{Location, PickingTask};

use crate::travel::TravelMetric;

/// Orders tasks by repeatedly visiting the nearest remaining one.
///
/// Starts at `from`. Ties go to the task that came first in the input, so
/// the result is deterministic. Sequence numbers and travel annotations are
/// left untouched; see [`renumber`] and [`annotate_travel`].
///
/// # Example
///
/// ```
/// use pick_optimize::{StraightLine, sequence::nearest_neighbor_order};
/// use pick_types::{Location, PickingTask};
/// use nalgebra::Point3;
///
/// let at = |x: f64| Location::new(Point3::new(x, 0.0, 0.0), 1);
/// let tasks = vec![
///     PickingTask::new("M1", "far", 1.0, at(9.0)),
///     PickingTask::new("M2", "near", 1.0, at(2.0)),
///     PickingTask::new("M3", "mid", 1.0, at(5.0)),
/// ];
///
/// let ordered = nearest_neighbor_order(tasks, &at(0.0), &StraightLine);
/// let bins: Vec<_> = ordered.iter().map(|t| t.bin.as_str()).collect();
/// assert_eq!(bins, ["near", "mid", "far"]);
/// ```
#[must_use]
pub fn nearest_neighbor_order<M: TravelMetric + ?Sized>(
    mut tasks: Vec<PickingTask>,
    from: &Location,
    metric: &M,
) -> Vec<PickingTask> {
    let mut ordered = Vec::with_capacity(tasks.len());
    let mut current = *from;

    while let Some(index) = nearest(&tasks, &current, metric) {
        let task = tasks.remove(index);
        current = task.location();
        ordered.push(task);
    }
    ordered
}

/// Index of the task closest to `from`, preferring earlier tasks on ties.
fn nearest<M: TravelMetric + ?Sized>(
    tasks: &[PickingTask],
    from: &Location,
    metric: &M,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, task) in tasks.iter().enumerate() {
        let d = metric.distance(from, &task.location());
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((index, d));
        }
    }
    best.map(|(index, _)| index)
}

/// Assigns contiguous sequence numbers starting at `first`.
pub fn renumber(tasks: &mut [PickingTask], first: u32) {
    let mut sequence = first;
    for task in tasks {
        task.sequence = sequence;
        sequence = sequence.saturating_add(1);
    }
}

/// Recomputes `distance_from_last` and `start_new_section` along the list,
/// starting from `from`.
pub fn annotate_travel<M: TravelMetric + ?Sized>(
    tasks: &mut [PickingTask],
    from: &Location,
    metric: &M,
) {
    let mut previous = *from;
    for task in tasks {
        let here = task.location();
        task.distance_from_last = metric.distance(&previous, &here);
        task.start_new_section = here.floor != previous.floor;
        previous = here;
    }
}

/// Sum of `distance_from_last` over the list.
#[must_use]
pub fn total_distance(tasks: &[PickingTask]) -> f64 {
    tasks.iter().map(|t| t.distance_from_last).sum()
}

/// Returns `true` if the tasks are numbered `first`, `first + 1`, ... with
/// no gaps.
#[must_use]
pub fn is_contiguous(tasks: &[PickingTask], first: u32) -> bool {
    tasks
        .iter()
        .zip(first..)
        .all(|(task, expected)| task.sequence == expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::travel::StraightLine;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn at(x: f64, z: f64, floor: u32) -> Location {
        Location::new(Point3::new(x, 0.0, z), floor)
    }

    fn task(bin: &str, location: Location) -> PickingTask {
        PickingTask::new("M1", bin, 1.0, location)
    }

    #[test]
    fn test_ties_keep_input_order() {
        let tasks = vec![task("left", at(-1.0, 0.0, 1)), task("right", at(1.0, 0.0, 1))];
        let ordered = nearest_neighbor_order(tasks, &at(0.0, 0.0, 1), &StraightLine);
        assert_eq!(ordered[0].bin, "left");
    }

    #[test]
    fn test_empty_input() {
        let ordered = nearest_neighbor_order(Vec::new(), &at(0.0, 0.0, 1), &StraightLine);
        assert!(ordered.is_empty());
    }

    #[test]
    fn test_annotate_sets_sections_and_distances() {
        let mut tasks = vec![
            task("a", at(3.0, 4.0, 1)),
            task("b", at(3.0, 4.0, 2)),
            task("c", at(3.0, 10.0, 2)),
        ];
        annotate_travel(&mut tasks, &at(0.0, 0.0, 1), &StraightLine);

        assert_relative_eq!(tasks[0].distance_from_last, 5.0);
        assert!(!tasks[0].start_new_section);
        assert_relative_eq!(tasks[1].distance_from_last, 0.0);
        assert!(tasks[1].start_new_section);
        assert_relative_eq!(tasks[2].distance_from_last, 6.0);
        assert!(!tasks[2].start_new_section);
        assert_relative_eq!(total_distance(&tasks), 11.0);
    }

    #[test]
    fn test_first_task_section_compares_with_start_floor() {
        let mut tasks = vec![task("a", at(0.0, 0.0, 3))];
        annotate_travel(&mut tasks, &at(0.0, 0.0, 1), &StraightLine);
        assert!(tasks[0].start_new_section);
    }

    #[test]
    fn test_renumber_contiguous() {
        let mut tasks = vec![task("a", at(0.0, 0.0, 1)), task("b", at(1.0, 0.0, 1))];
        renumber(&mut tasks, 4);
        assert_eq!(tasks[0].sequence, 4);
        assert_eq!(tasks[1].sequence, 5);
        assert!(is_contiguous(&tasks, 4));
        assert!(!is_contiguous(&tasks, 1));
    }
}
