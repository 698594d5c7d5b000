//! Ordered in-memory task collection.

use super::{CollectionError, Task, TaskId, TaskStatus};
use std::collections::HashSet;

/// Ordered sequence of tasks with unique identifiers.
///
/// Order is significant: the list view shows tasks front to back, and new
/// tasks are prepended. The board view derives its columns from this order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskCollection {
    tasks: Vec<Task>,
}

impl TaskCollection {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Builds a collection from tasks in display order.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::DuplicateId`] when two tasks share an id.
    pub fn from_tasks(tasks: Vec<Task>) -> Result<Self, CollectionError> {
        let mut seen = HashSet::with_capacity(tasks.len());
        for task in &tasks {
            if !seen.insert(task.id()) {
                return Err(CollectionError::DuplicateId(task.id()));
            }
        }
        Ok(Self { tasks })
    }

    /// Returns the tasks in display order.
    #[must_use]
    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    /// Iterates over the tasks in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Returns the number of held tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when no tasks are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the task with the given id.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns the display position of the task with the given id.
    #[must_use]
    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == id)
    }

    /// Returns `true` when a task with the given id is held.
    #[must_use]
    pub fn contains(&self, id: TaskId) -> bool {
        self.position(id).is_some()
    }

    /// Prepends a task.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::DuplicateId`] if the id is already held.
    pub fn insert(&mut self, task: Task) -> Result<(), CollectionError> {
        self.insert_at(0, task)
    }

    /// Inserts a task at `index`, clamped to the collection length.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::DuplicateId`] if the id is already held.
    pub fn insert_at(&mut self, index: usize, task: Task) -> Result<(), CollectionError> {
        if self.contains(task.id()) {
            return Err(CollectionError::DuplicateId(task.id()));
        }
        let target = index.min(self.tasks.len());
        self.tasks.insert(target, task);
        Ok(())
    }

    /// Replaces the stored record for `id`, keeping its position.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`] if `id` is absent, or
    /// [`CollectionError::DuplicateId`] if the replacement carries a
    /// different id that is already held.
    pub fn replace_by_id(&mut self, id: TaskId, task: Task) -> Result<(), CollectionError> {
        if task.id() != id && self.contains(task.id()) {
            return Err(CollectionError::DuplicateId(task.id()));
        }
        let slot = self
            .tasks
            .iter_mut()
            .find(|held| held.id() == id)
            .ok_or(CollectionError::NotFound(id))?;
        *slot = task;
        Ok(())
    }

    /// Removes and returns the task with the given id.
    ///
    /// Removal is strict: an absent id is reported rather than ignored, and
    /// the collection is left untouched, so repeating a removal has no
    /// further observable effect.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`] if `id` is absent.
    pub fn remove_by_id(&mut self, id: TaskId) -> Result<Task, CollectionError> {
        let index = self.position(id).ok_or(CollectionError::NotFound(id))?;
        Ok(self.tasks.remove(index))
    }

    /// Replaces the entire contents, e.g. with a fresh store listing.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::DuplicateId`] when the listing repeats an
    /// id; the current contents are kept in that case.
    pub fn replace_all(&mut self, tasks: Vec<Task>) -> Result<(), CollectionError> {
        *self = Self::from_tasks(tasks)?;
        Ok(())
    }

    /// Moves a task so it appears at `dest_index` within the `dest_status`
    /// group, giving it that status.
    ///
    /// `dest_index` counts positions in the destination group after the
    /// task has been taken out of its source position, and is clamped to
    /// the group length. When the destination group is empty the task keeps
    /// its flat position. Returns the moved task.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`] if `id` is absent.
    pub fn move_within_group(
        &mut self,
        id: TaskId,
        dest_status: TaskStatus,
        dest_index: usize,
    ) -> Result<Task, CollectionError> {
        let source = self.position(id).ok_or(CollectionError::NotFound(id))?;
        let moved = self.tasks.remove(source).with_status(dest_status);

        let group_positions: Vec<usize> = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.status() == dest_status)
            .map(|(position, _)| position)
            .collect();

        let target = match (group_positions.get(dest_index), group_positions.last()) {
            (Some(position), _) => *position,
            (None, Some(last)) => last + 1,
            (None, None) => source.min(self.tasks.len()),
        };

        self.tasks.insert(target, moved.clone());
        Ok(moved)
    }
}

impl<'a> IntoIterator for &'a TaskCollection {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
