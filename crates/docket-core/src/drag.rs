//! Insert-point math for drag reordering.
//!
//! The presentation layer measures each
//! row and asks where the dragged row
//! belongs; geometry stays out of the
//! store.

/// Vertical extent of one rendered row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowBox {
  pub id:     String,
  pub top:    f64,
  pub height: f64
}

impl RowBox {
  pub fn midpoint(&self) -> f64 {
    self.top + self.height / 2.0
  }
}

/// The row the dragged one should be
/// inserted before: among rows whose
/// midpoint lies below the pointer, the
/// nearest one. `None` means append.
pub fn insert_before<'a>(
  rows: &'a [RowBox],
  dragging: &str,
  pointer_y: f64
) -> Option<&'a str> {
  rows
    .iter()
    .filter(|row| row.id != dragging)
    .map(|row| {
      (pointer_y - row.midpoint(), row)
    })
    .filter(|(offset, _)| *offset < 0.0)
    .max_by(|(a, _), (b, _)| {
      a.total_cmp(b)
    })
    .map(|(_, row)| row.id.as_str())
}

/// `order` with `dragging` moved in front
/// of `before`, or to the end.
pub fn move_before(
  order: &[String],
  dragging: &str,
  before: Option<&str>
) -> Vec<String> {
  if !order.iter().any(|id| id == dragging)
  {
    return order.to_vec();
  }

  let mut next: Vec<String> = order
    .iter()
    .filter(|id| *id != dragging)
    .cloned()
    .collect();

  let at = before
    .and_then(|target| {
      next
        .iter()
        .position(|id| id == target)
    })
    .unwrap_or(next.len());
  next.insert(at, dragging.to_string());
  next
}
