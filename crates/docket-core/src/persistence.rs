use std::collections::{
  BTreeMap,
  BTreeSet
};

use anyhow::{
  Context,
  anyhow
};
use serde_json::Value;
use tracing::{
  debug,
  error,
  warn
};

use crate::config::StorageKeys;
use crate::prefs::{
  CustomPalette,
  Language,
  PaletteChannel,
  Theme
};
use crate::task::{
  Task,
  fresh_id,
  normalize_title
};

/// A durable string key-value store, such
/// as the browser's `localStorage`.
pub trait KeyValueStore {
  fn get_item(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>>;

  fn set_item(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()>;
}

/// In-process store. Counts successful
/// writes and can be switched to reject
/// them.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  items:       BTreeMap<String, String>,
  writes:      usize,
  fail_writes: bool
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_item(
    mut self,
    key: &str,
    value: &str
  ) -> Self {
    self
      .items
      .insert(key.to_string(), value.to_string());
    self
  }

  pub fn writes(&self) -> usize {
    self.writes
  }

  pub fn raw(
    &self,
    key: &str
  ) -> Option<&str> {
    self.items.get(key).map(String::as_str)
  }

  pub fn set_fail_writes(
    &mut self,
    fail: bool
  ) {
    self.fail_writes = fail;
  }
}

impl KeyValueStore for MemoryStore {
  fn get_item(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    Ok(self.items.get(key).cloned())
  }

  fn set_item(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    if self.fail_writes {
      return Err(anyhow!(
        "memory store rejected write to \
         {key}"
      ));
    }
    self
      .items
      .insert(key.to_string(), value.to_string());
    self.writes += 1;
    Ok(())
  }
}

/// Reads and writes the persisted slots.
///
/// Reads never fail: missing or corrupt
/// data yields the slot's default. Writes
/// are best-effort and report success so
/// callers can log, but nothing depends on
/// them.
#[derive(Debug)]
pub struct Persistence<S> {
  store: S,
  keys:  StorageKeys
}

impl<S: KeyValueStore> Persistence<S> {
  pub fn new(
    store: S,
    keys: StorageKeys
  ) -> Self {
    Self { store, keys }
  }

  pub fn store(&self) -> &S {
    &self.store
  }

  pub fn store_mut(&mut self) -> &mut S {
    &mut self.store
  }

  fn read(
    &self,
    key: &str
  ) -> Option<String> {
    match self.store.get_item(key) {
      | Ok(value) => value,
      | Err(err) => {
        error!(
          key,
          error = %err,
          "failed reading from storage"
        );
        None
      }
    }
  }

  fn write(
    &mut self,
    key: &str,
    value: &str
  ) -> bool {
    match self.store.set_item(key, value) {
      | Ok(()) => {
        debug!(key, "persisted slot");
        true
      }
      | Err(err) => {
        warn!(
          key,
          error = %err,
          "storage write failed; keeping \
           in-memory state"
        );
        false
      }
    }
  }

  #[tracing::instrument(skip(self))]
  pub fn load_tasks(&self) -> Vec<Task> {
    let Some(raw) =
      self.read(&self.keys.tasks)
    else {
      return Vec::new();
    };

    match decode_tasks(&raw) {
      | Ok(tasks) => {
        debug!(
          count = tasks.len(),
          "loaded tasks"
        );
        tasks
      }
      | Err(err) => {
        error!(
          error = %err,
          "failed parsing tasks from \
           storage"
        );
        Vec::new()
      }
    }
  }

  pub fn save_tasks(
    &mut self,
    tasks: &[Task]
  ) -> bool {
    match serde_json::to_string(tasks) {
      | Ok(json) => {
        let key = self.keys.tasks.clone();
        self.write(&key, &json)
      }
      | Err(err) => {
        warn!(
          error = %err,
          "failed encoding tasks"
        );
        false
      }
    }
  }

  pub fn load_theme(&self) -> Theme {
    self
      .read(&self.keys.theme)
      .map(|raw| {
        Theme::from_key_or_default(&raw)
      })
      .unwrap_or_default()
  }

  pub fn save_theme(
    &mut self,
    theme: Theme
  ) -> bool {
    let key = self.keys.theme.clone();
    self.write(&key, theme.as_key())
  }

  pub fn load_palette(
    &self
  ) -> CustomPalette {
    let Some(raw) =
      self.read(&self.keys.palette)
    else {
      return CustomPalette::default();
    };

    match decode_palette(&raw) {
      | Ok(palette) => palette,
      | Err(err) => {
        error!(
          error = %err,
          "failed parsing custom palette \
           from storage"
        );
        CustomPalette::default()
      }
    }
  }

  pub fn save_palette(
    &mut self,
    palette: &CustomPalette
  ) -> bool {
    let object: serde_json::Map<
      String,
      Value
    > = palette
      .iter()
      .map(|(channel, value)| {
        (
          channel.as_key().to_string(),
          Value::String(value.to_string())
        )
      })
      .collect();
    let json =
      Value::Object(object).to_string();
    let key = self.keys.palette.clone();
    self.write(&key, &json)
  }

  /// Stored code first, then the
  /// environment locale, then `fallback`.
  pub fn load_language(
    &self,
    env_locale: Option<&str>,
    fallback: Language
  ) -> Language {
    self
      .read(&self.keys.language)
      .and_then(|code| {
        Language::from_code(&code)
      })
      .or_else(|| {
        env_locale
          .and_then(Language::from_locale)
      })
      .unwrap_or(fallback)
  }

  pub fn save_language(
    &mut self,
    language: Language
  ) -> bool {
    let key =
      self.keys.language.clone();
    self.write(&key, language.code())
  }
}

fn decode_tasks(
  raw: &str
) -> anyhow::Result<Vec<Task>> {
  let parsed: Value =
    serde_json::from_str(raw)
      .context("tasks are not JSON")?;
  let Value::Array(entries) = parsed
  else {
    return Err(anyhow!(
      "tasks are not a JSON array"
    ));
  };

  let mut seen = BTreeSet::new();
  let mut tasks =
    Vec::with_capacity(entries.len());
  for entry in &entries {
    if !is_truthy(entry) {
      continue;
    }
    let Some(mut task) = coerce_task(entry)
    else {
      continue;
    };
    if !seen.insert(task.id.clone()) {
      warn!(
        id = %task.id,
        "duplicate task id in storage; \
         assigning a fresh one"
      );
      task.id = fresh_id();
      seen.insert(task.id.clone());
    }
    tasks.push(task);
  }

  Ok(tasks)
}

fn coerce_task(
  entry: &Value
) -> Option<Task> {
  let Value::Object(fields) = entry else {
    return None;
  };

  let id = match fields.get("id") {
    | None | Some(Value::Null) => {
      fresh_id()
    }
    | Some(Value::String(id))
      if !id.trim().is_empty() =>
    {
      id.clone()
    }
    | Some(Value::String(_)) => fresh_id(),
    | Some(other) => other.to_string()
  };

  let title = match fields.get("title") {
    | Some(Value::String(title)) => {
      title.clone()
    }
    | None | Some(Value::Null) => {
      String::new()
    }
    | Some(other) => other.to_string()
  };
  let title = normalize_title(&title)?;

  let completed = fields
    .get("completed")
    .is_some_and(is_truthy);

  Some(Task {
    id,
    title,
    completed
  })
}

/// JavaScript truthiness of a JSON value.
fn is_truthy(value: &Value) -> bool {
  match value {
    | Value::Null => false,
    | Value::Bool(flag) => *flag,
    | Value::Number(number) => number
      .as_f64()
      .is_some_and(|n| n != 0.0),
    | Value::String(text) => {
      !text.is_empty()
    }
    | Value::Array(_)
    | Value::Object(_) => true
  }
}

fn decode_palette(
  raw: &str
) -> anyhow::Result<CustomPalette> {
  let parsed: Value =
    serde_json::from_str(raw)
      .context("palette is not JSON")?;
  let Value::Object(fields) = parsed
  else {
    return Err(anyhow!(
      "palette is not a JSON object"
    ));
  };

  let mut palette =
    CustomPalette::default();
  for (key, value) in &fields {
    let Some(channel) =
      PaletteChannel::from_key(key)
    else {
      continue;
    };
    if let Value::String(color) = value {
      palette.set(channel, color.clone());
    }
  }
  Ok(palette)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::AppConfig;

  fn persistence(
    store: MemoryStore
  ) -> Persistence<MemoryStore> {
    Persistence::new(
      store,
      AppConfig::default().storage
    )
  }

  fn tasks_key() -> String {
    AppConfig::default().storage.tasks
  }

  #[test]
  fn tasks_round_trip() {
    let mut p =
      persistence(MemoryStore::new());
    let tasks = vec![
      Task {
        id:        "a".to_string(),
        title:     "first".to_string(),
        completed: true
      },
      Task {
        id:        "b".to_string(),
        title:     "second".to_string(),
        completed: false
      },
    ];
    assert!(p.save_tasks(&tasks));
    assert_eq!(p.load_tasks(), tasks);
  }

  #[test]
  fn corrupt_tasks_fall_back_to_empty() {
    for raw in
      ["{not json", "{\"id\":1}", "42"]
    {
      let p = persistence(
        MemoryStore::new()
          .with_item(&tasks_key(), raw)
      );
      assert!(p.load_tasks().is_empty());
    }
  }

  #[test]
  fn loose_task_records_are_coerced() {
    let raw = r#"[
      null,
      false,
      {"id": 7, "title": "  numeric id ", "completed": 1},
      {"title": "no id"},
      {"id": "x", "title": "   "},
      {"id": "dup", "title": "one"},
      {"id": "dup", "title": "two", "completed": "yes"},
      "stray"
    ]"#;
    let p = persistence(
      MemoryStore::new()
        .with_item(&tasks_key(), raw)
    );
    let tasks = p.load_tasks();

    assert_eq!(tasks.len(), 4);
    assert_eq!(tasks[0].id, "7");
    assert_eq!(
      tasks[0].title,
      "numeric id"
    );
    assert!(tasks[0].completed);
    assert_eq!(tasks[1].title, "no id");
    assert!(!tasks[1].id.is_empty());
    assert!(!tasks[1].completed);
    assert_eq!(tasks[2].id, "dup");
    assert_ne!(tasks[3].id, "dup");
    assert!(tasks[3].completed);
  }

  #[test]
  fn theme_defaults_to_system() {
    let keys = AppConfig::default().storage;
    let p = persistence(
      MemoryStore::new()
        .with_item(&keys.theme, "neon")
    );
    assert_eq!(p.load_theme(), Theme::System);

    let mut p =
      persistence(MemoryStore::new());
    assert_eq!(p.load_theme(), Theme::System);
    p.save_theme(Theme::Pink);
    assert_eq!(p.load_theme(), Theme::Pink);
  }

  #[test]
  fn palette_round_trip_and_corruption() {
    let keys = AppConfig::default().storage;
    let mut p =
      persistence(MemoryStore::new());
    let mut palette =
      CustomPalette::default();
    palette.set(PaletteChannel::Bg, "#101010");
    palette.set(
      PaletteChannel::Primary,
      "#abcdef"
    );
    assert!(p.save_palette(&palette));
    assert_eq!(p.load_palette(), palette);

    let p = persistence(
      MemoryStore::new().with_item(
        &keys.palette,
        r##"{"bg": 12, "text": "#fff", "glow": "#000"}"##
      )
    );
    let loaded = p.load_palette();
    assert_eq!(
      loaded.raw(PaletteChannel::Bg),
      None
    );
    assert_eq!(
      loaded.raw(PaletteChannel::Text),
      Some("#fff")
    );

    let p = persistence(
      MemoryStore::new()
        .with_item(&keys.palette, "[]")
    );
    assert!(p.load_palette().is_empty());
  }

  #[test]
  fn language_resolution_order() {
    let keys = AppConfig::default().storage;
    let p =
      persistence(MemoryStore::new());
    assert_eq!(
      p.load_language(
        Some("de-AT"),
        Language::En
      ),
      Language::De
    );
    assert_eq!(
      p.load_language(
        Some("ja-JP"),
        Language::En
      ),
      Language::En
    );
    assert_eq!(
      p.load_language(None, Language::En),
      Language::En
    );

    let p = persistence(
      MemoryStore::new()
        .with_item(&keys.language, "fr")
    );
    assert_eq!(
      p.load_language(
        Some("de-AT"),
        Language::En
      ),
      Language::Fr
    );

    let p = persistence(
      MemoryStore::new()
        .with_item(&keys.language, "xx")
    );
    assert_eq!(
      p.load_language(
        Some("es"),
        Language::En
      ),
      Language::Es
    );
  }

  #[test]
  fn failed_writes_are_swallowed() {
    let mut store = MemoryStore::new();
    store.set_fail_writes(true);
    let mut p = persistence(store);
    assert!(!p.save_theme(Theme::Dark));
    assert_eq!(p.load_theme(), Theme::System);
    assert_eq!(p.store().writes(), 0);
  }
}
