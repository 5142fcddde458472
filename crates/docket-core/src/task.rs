use serde::Serialize;
use uuid::Uuid;

/// A single entry of the task list.
#[derive(
  Debug,
  Clone,
  Serialize,
  PartialEq,
  Eq,
)]
pub struct Task {
  pub id:        String,
  pub title:     String,
  pub completed: bool
}

impl Task {
  /// Builds a pending task with a fresh
  /// id, or `None` when the title is
  /// blank once trimmed.
  pub fn new_pending(
    title: &str
  ) -> Option<Self> {
    let title = normalize_title(title)?;
    Some(Self {
      id: fresh_id(),
      title,
      completed: false
    })
  }
}

pub fn fresh_id() -> String {
  Uuid::new_v4().to_string()
}

/// Trims surrounding whitespace; blank
/// titles are rejected.
pub fn normalize_title(
  raw: &str
) -> Option<String> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    None
  } else {
    Some(trimmed.to_string())
  }
}
