use crate::task::Task;

/// Which subset of the list is visible.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub enum Filter {
  #[default]
  All,
  Active,
  Completed
}

impl Filter {
  pub const ALL: [Filter; 3] = [
    Filter::All,
    Filter::Active,
    Filter::Completed
  ];

  pub fn as_key(self) -> &'static str {
    match self {
      | Self::All => "all",
      | Self::Active => "active",
      | Self::Completed => "completed"
    }
  }

  pub fn from_key(
    key: &str
  ) -> Option<Self> {
    match key.trim() {
      | "all" => Some(Self::All),
      | "active" => Some(Self::Active),
      | "completed" => {
        Some(Self::Completed)
      }
      | _ => None
    }
  }

  pub fn matches(
    self,
    task: &Task
  ) -> bool {
    match self {
      | Self::All => true,
      | Self::Active => !task.completed,
      | Self::Completed => task.completed
    }
  }
}

/// Visible tasks for `filter`, in store
/// order. The iterator is lazy and can be
/// cloned to walk the view again.
pub fn project<'a>(
  tasks: &'a [Task],
  filter: Filter
) -> impl Iterator<Item = &'a Task>
+ Clone
+ 'a {
  tasks
    .iter()
    .filter(move |task| {
      filter.matches(task)
    })
}

pub fn active_count(
  tasks: &[Task]
) -> usize {
  project(tasks, Filter::Active).count()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn task(
    id: &str,
    completed: bool
  ) -> Task {
    Task {
      id: id.to_string(),
      title: format!("task {id}"),
      completed
    }
  }

  fn ids<'a>(
    view: impl Iterator<Item = &'a Task>
  ) -> Vec<&'a str> {
    view.map(|task| task.id.as_str()).collect()
  }

  #[test]
  fn active_and_completed_partition_all()
  {
    let tasks = vec![
      task("a", false),
      task("b", true),
      task("c", false),
      task("d", true),
    ];

    assert_eq!(
      ids(project(&tasks, Filter::All)),
      vec!["a", "b", "c", "d"]
    );
    assert_eq!(
      ids(project(
        &tasks,
        Filter::Active
      )),
      vec!["a", "c"]
    );
    assert_eq!(
      ids(project(
        &tasks,
        Filter::Completed
      )),
      vec!["b", "d"]
    );

    let active =
      project(&tasks, Filter::Active)
        .count();
    let completed =
      project(&tasks, Filter::Completed)
        .count();
    assert_eq!(
      active + completed,
      tasks.len()
    );
    assert!(
      project(&tasks, Filter::Active)
        .all(|task| !Filter::Completed
          .matches(task))
    );
  }

  #[test]
  fn projection_is_restartable() {
    let tasks = vec![
      task("a", false),
      task("b", true),
    ];
    let view =
      project(&tasks, Filter::Active);
    let first: Vec<_> =
      view.clone().collect();
    let second: Vec<_> = view.collect();
    assert_eq!(first, second);
    assert_eq!(active_count(&tasks), 1);
  }

  #[test]
  fn keys_round_trip() {
    for filter in Filter::ALL {
      assert_eq!(
        Filter::from_key(
          filter.as_key()
        ),
        Some(filter)
      );
    }
    assert_eq!(
      Filter::from_key("done"),
      None
    );
  }
}
