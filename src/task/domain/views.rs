//! Pure projections from a task sequence into list, board and chart shapes.

use super::{ParseTaskStatusError, Task, TaskStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status selector for the list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    /// Every task.
    #[default]
    All,
    /// Only tasks with the given status.
    Only(TaskStatus),
}

impl StatusFilter {
    /// Returns `true` when the task passes the filter.
    #[must_use]
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => task.status() == status,
        }
    }
}

impl From<TaskStatus> for StatusFilter {
    fn from(status: TaskStatus) -> Self {
        Self::Only(status)
    }
}

impl TryFrom<&str> for StatusFilter {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        TaskStatus::try_from(value).map(Self::Only)
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = ParseTaskStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("ALL"),
            Self::Only(status) => status.fmt(f),
        }
    }
}

/// Three-way partition of tasks by status, each group in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusGroups {
    todo: Vec<Task>,
    in_progress: Vec<Task>,
    completed: Vec<Task>,
}

impl StatusGroups {
    /// Returns the group for a status.
    #[must_use]
    pub fn group(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Completed => &self.completed,
        }
    }

    /// Iterates over `(status, group)` pairs in column order.
    pub fn columns(&self) -> impl Iterator<Item = (TaskStatus, &[Task])> {
        TaskStatus::ALL
            .into_iter()
            .map(move |status| (status, self.group(status)))
    }

    /// Returns the total number of grouped tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.completed.len()
    }

    /// Returns `true` when every group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Concatenates the groups in `TODO, IN_PROGRESS, COMPLETED` order.
    #[must_use]
    pub fn into_concatenated(self) -> Vec<Task> {
        let mut tasks = self.todo;
        tasks.extend(self.in_progress);
        tasks.extend(self.completed);
        tasks
    }

    fn group_mut(&mut self, status: TaskStatus) -> &mut Vec<Task> {
        match status {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Completed => &mut self.completed,
        }
    }
}

/// Per-status task counts.
///
/// Server-reported counts are decoded into this type as well; use
/// [`TaskCounts::is_consistent`] to check them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCounts {
    /// Tasks in `TODO`.
    pub todo: u64,
    /// Tasks in `IN_PROGRESS`.
    pub in_progress: u64,
    /// Tasks in `COMPLETED`.
    pub completed: u64,
    /// All tasks.
    pub total: u64,
}

impl TaskCounts {
    /// Returns the count for a status.
    #[must_use]
    pub const fn count(&self, status: TaskStatus) -> u64 {
        match status {
            TaskStatus::Todo => self.todo,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Completed => self.completed,
        }
    }

    /// Returns `true` when `total` equals the sum of the per-status counts.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.todo
            .checked_add(self.in_progress)
            .and_then(|sum| sum.checked_add(self.completed))
            .is_some_and(|sum| sum == self.total)
    }

    /// Returns the whole-number percentage of tasks in `status`, rounded
    /// down, or zero when there are no tasks.
    #[must_use]
    pub fn share(&self, status: TaskStatus) -> u64 {
        self.count(status)
            .saturating_mul(100)
            .checked_div(self.total)
            .unwrap_or(0)
    }
}

/// Returns the tasks matching `filter`, in source order.
#[must_use]
pub fn filter_by_status(tasks: &[Task], filter: StatusFilter) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| filter.matches(task))
        .cloned()
        .collect()
}

/// Partitions tasks by status, preserving relative order within each group.
#[must_use]
pub fn group_by_status(tasks: &[Task]) -> StatusGroups {
    let mut groups = StatusGroups::default();
    for task in tasks {
        groups.group_mut(task.status()).push(task.clone());
    }
    groups
}

/// Counts tasks per status; `total` is the sum of the three counts.
#[must_use]
pub fn aggregate_counts(tasks: &[Task]) -> TaskCounts {
    let mut counts = TaskCounts::default();
    for task in tasks {
        match task.status() {
            TaskStatus::Todo => counts.todo += 1,
            TaskStatus::InProgress => counts.in_progress += 1,
            TaskStatus::Completed => counts.completed += 1,
        }
    }
    counts.total = counts.todo + counts.in_progress + counts.completed;
    counts
}
