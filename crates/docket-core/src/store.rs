use std::collections::BTreeSet;

use tracing::debug;

use crate::task::{
  Task,
  normalize_title
};

/// Result of committing an edit.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum EditOutcome {
  Renamed,
  Removed,
  Missing
}

/// The ordered, in-memory task list.
///
/// Operations never fail on caller
/// mistakes: an unknown id or a blank
/// title is a no-op (or a delete, for
/// edits). Each one reports whether the
/// list changed so the caller can decide
/// whether to persist and re-render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskStore {
  tasks: Vec<Task>
}

impl TaskStore {
  pub fn from_tasks(
    tasks: Vec<Task>
  ) -> Self {
    Self { tasks }
  }

  pub fn tasks(&self) -> &[Task] {
    &self.tasks
  }

  pub fn get(
    &self,
    id: &str
  ) -> Option<&Task> {
    self
      .tasks
      .iter()
      .find(|task| task.id == id)
  }

  fn position(
    &self,
    id: &str
  ) -> Option<usize> {
    self
      .tasks
      .iter()
      .position(|task| task.id == id)
  }

  /// Inserts a new pending task at the
  /// front and returns it.
  #[tracing::instrument(skip(self))]
  pub fn add(
    &mut self,
    title: &str
  ) -> Option<&Task> {
    let Some(task) =
      Task::new_pending(title)
    else {
      debug!("ignoring blank title");
      return None;
    };
    debug!(id = %task.id, "adding task");
    self.tasks.insert(0, task);
    self.tasks.first()
  }

  #[tracing::instrument(skip(self))]
  pub fn toggle(
    &mut self,
    id: &str
  ) -> bool {
    match self
      .tasks
      .iter_mut()
      .find(|task| task.id == id)
    {
      | Some(task) => {
        task.completed = !task.completed;
        true
      }
      | None => false
    }
  }

  /// Replaces the title, or removes the
  /// task when the new title is blank.
  #[tracing::instrument(skip(self))]
  pub fn edit(
    &mut self,
    id: &str,
    title: &str
  ) -> EditOutcome {
    let Some(idx) = self.position(id)
    else {
      return EditOutcome::Missing;
    };

    match normalize_title(title) {
      | Some(title) => {
        self.tasks[idx].title = title;
        EditOutcome::Renamed
      }
      | None => {
        self.tasks.remove(idx);
        EditOutcome::Removed
      }
    }
  }

  #[tracing::instrument(skip(self))]
  pub fn delete(
    &mut self,
    id: &str
  ) -> bool {
    match self.position(id) {
      | Some(idx) => {
        self.tasks.remove(idx);
        true
      }
      | None => false
    }
  }

  /// Drops every completed task and
  /// returns how many went away.
  #[tracing::instrument(skip(self))]
  pub fn clear_completed(
    &mut self
  ) -> usize {
    let before = self.tasks.len();
    self
      .tasks
      .retain(|task| !task.completed);
    before - self.tasks.len()
  }

  /// Applies a new visual order.
  ///
  /// Listed ids take the slots their
  /// tasks occupied before, in the listed
  /// order; unlisted tasks stay where
  /// they are. Unknown and repeated ids
  /// are ignored.
  #[tracing::instrument(skip(self, order), fields(listed = order.len()))]
  pub fn reorder<S: AsRef<str>>(
    &mut self,
    order: &[S]
  ) -> bool {
    let mut seen = BTreeSet::new();
    let listed: Vec<usize> = order
      .iter()
      .filter_map(|id| {
        let id = id.as_ref();
        if !seen.insert(id) {
          return None;
        }
        self.position(id)
      })
      .collect();

    let mut slots = listed.clone();
    slots.sort_unstable();

    if slots == listed {
      return false;
    }

    let moved: Vec<Task> = listed
      .iter()
      .map(|&idx| self.tasks[idx].clone())
      .collect();
    for (slot, task) in
      slots.into_iter().zip(moved)
    {
      self.tasks[slot] = task;
    }
    true
  }
}
