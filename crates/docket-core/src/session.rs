use tracing::{
  debug,
  info
};

use crate::config::AppConfig;
use crate::filter::{
  Filter,
  active_count,
  project
};
use crate::i18n::{
  Catalog,
  Labels
};
use crate::persistence::{
  KeyValueStore,
  Persistence
};
use crate::prefs::{
  ColorScheme,
  CustomPalette,
  CustomizerModal,
  Language,
  PaletteChannel,
  Theme,
  ThemePlan
};
use crate::store::{
  EditOutcome,
  TaskStore
};
use crate::task::Task;

/// Everything a user can do.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
  Add(String),
  Toggle(String),
  Edit {
    id:    String,
    title: String
  },
  Delete(String),
  Reorder(Vec<String>),
  ClearCompleted,
  SetFilter(Filter),
  SetTheme(String),
  SetCustomChannel {
    channel: PaletteChannel,
    value:   String
  },
  SetLanguage(String),
  OpenCustomizer,
  CloseCustomizer,
  SystemSchemeChanged(ColorScheme)
}

impl Action {
  fn name(&self) -> &'static str {
    match self {
      | Self::Add(_) => "add",
      | Self::Toggle(_) => "toggle",
      | Self::Edit { .. } => "edit",
      | Self::Delete(_) => "delete",
      | Self::Reorder(_) => "reorder",
      | Self::ClearCompleted => {
        "clear_completed"
      }
      | Self::SetFilter(_) => "set_filter",
      | Self::SetTheme(_) => "set_theme",
      | Self::SetCustomChannel {
        ..
      } => "set_custom_channel",
      | Self::SetLanguage(_) => {
        "set_language"
      }
      | Self::OpenCustomizer => {
        "open_customizer"
      }
      | Self::CloseCustomizer => {
        "close_customizer"
      }
      | Self::SystemSchemeChanged(_) => {
        "system_scheme_changed"
      }
    }
  }
}

/// A persisted slot of the durable store.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Slot {
  Tasks,
  Theme,
  Palette,
  Language
}

/// Side effects produced by one action.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct Outcome {
  pub rerender:  bool,
  pub persisted: Vec<Slot>
}

impl Outcome {
  fn unchanged() -> Self {
    Self::default()
  }

  fn render_only() -> Self {
    Self {
      rerender:  true,
      persisted: Vec::new()
    }
  }

  /// Re-render, naming `slot` only when
  /// its write went through.
  fn saved(
    slot: Slot,
    written: bool
  ) -> Self {
    Self {
      rerender:  true,
      persisted: written_slots(
        slot, written
      )
    }
  }

  pub fn is_noop(&self) -> bool {
    !self.rerender
      && self.persisted.is_empty()
  }
}

/// The app's whole state plus the store
/// it persists into. One `handle` call per
/// user or environment event.
#[derive(Debug)]
pub struct Session<S> {
  persistence:   Persistence<S>,
  catalog:       Catalog,
  tasks:         TaskStore,
  filter:        Filter,
  theme:         Theme,
  palette:       CustomPalette,
  language:      Language,
  modal:         CustomizerModal,
  system_scheme: ColorScheme
}

impl<S: KeyValueStore> Session<S> {
  /// Loads every slot, substituting
  /// defaults for anything missing or
  /// corrupt.
  #[tracing::instrument(skip(store, config))]
  pub fn bootstrap(
    store: S,
    config: &AppConfig,
    env_locale: Option<&str>,
    system_scheme: ColorScheme
  ) -> Self {
    let default_language =
      config.default_language();
    let persistence = Persistence::new(
      store,
      config.storage.clone()
    );
    let tasks = TaskStore::from_tasks(
      persistence.load_tasks()
    );
    let theme = persistence.load_theme();
    let palette =
      persistence.load_palette();
    let language = persistence
      .load_language(
        env_locale,
        default_language
      );

    info!(
      tasks = tasks.tasks().len(),
      theme = theme.as_key(),
      language = language.code(),
      "session started"
    );

    Self {
      persistence,
      catalog: Catalog::embedded(
        default_language
      ),
      tasks,
      filter: Filter::default(),
      theme,
      palette,
      language,
      modal: CustomizerModal::default(),
      system_scheme
    }
  }

  pub fn tasks(&self) -> &[Task] {
    self.tasks.tasks()
  }

  pub fn filter(&self) -> Filter {
    self.filter
  }

  pub fn theme(&self) -> Theme {
    self.theme
  }

  pub fn palette(&self) -> &CustomPalette {
    &self.palette
  }

  pub fn language(&self) -> Language {
    self.language
  }

  pub fn modal(&self) -> CustomizerModal {
    self.modal
  }

  pub fn system_scheme(
    &self
  ) -> ColorScheme {
    self.system_scheme
  }

  pub fn catalog(&self) -> &Catalog {
    &self.catalog
  }

  pub fn persistence(
    &self
  ) -> &Persistence<S> {
    &self.persistence
  }

  pub fn persistence_mut(
    &mut self
  ) -> &mut Persistence<S> {
    &mut self.persistence
  }

  /// Tasks visible under the current
  /// filter.
  pub fn visible(
    &self
  ) -> impl Iterator<Item = &Task> + Clone
  {
    project(self.tasks.tasks(), self.filter)
  }

  pub fn active_count(&self) -> usize {
    active_count(self.tasks.tasks())
  }

  /// Dragging is only meaningful when the
  /// view shows the whole sequence.
  pub fn reorder_enabled(&self) -> bool {
    self.filter == Filter::All
  }

  pub fn labels(&self) -> Labels {
    self.catalog.labels(self.language)
  }

  pub fn items_left_text(&self) -> String {
    self
      .catalog
      .items_left(
        self.language,
        self.active_count()
      )
  }

  pub fn theme_plan(&self) -> ThemePlan {
    ThemePlan::build(
      self.theme,
      &self.palette,
      self.system_scheme
    )
  }

  #[tracing::instrument(skip(self, action), fields(action = action.name()))]
  pub fn handle(
    &mut self,
    action: Action
  ) -> Outcome {
    let outcome = match action {
      | Action::Add(title) => {
        if self.tasks.add(&title).is_some()
        {
          self.persist_tasks()
        } else {
          Outcome::unchanged()
        }
      }
      | Action::Toggle(id) => {
        if self.tasks.toggle(&id) {
          self.persist_tasks()
        } else {
          Outcome::unchanged()
        }
      }
      | Action::Edit { id, title } => {
        match self.tasks.edit(&id, &title)
        {
          | EditOutcome::Renamed
          | EditOutcome::Removed => {
            self.persist_tasks()
          }
          | EditOutcome::Missing => {
            Outcome::unchanged()
          }
        }
      }
      | Action::Delete(id) => {
        if self.tasks.delete(&id) {
          self.persist_tasks()
        } else {
          Outcome::unchanged()
        }
      }
      | Action::Reorder(order) => {
        if !self.reorder_enabled() {
          debug!(
            filter = self.filter.as_key(),
            "reorder rejected while \
             filtered"
          );
          Outcome::unchanged()
        } else if self
          .tasks
          .reorder(order.as_slice())
        {
          self.persist_tasks()
        } else {
          Outcome::unchanged()
        }
      }
      | Action::ClearCompleted => {
        if self.tasks.clear_completed() > 0
        {
          self.persist_tasks()
        } else {
          Outcome::unchanged()
        }
      }
      | Action::SetFilter(filter) => {
        if self.filter == filter {
          Outcome::unchanged()
        } else {
          self.filter = filter;
          Outcome::render_only()
        }
      }
      | Action::SetTheme(key) => {
        self.set_theme(
          Theme::from_key_or_default(&key)
        )
      }
      | Action::SetCustomChannel {
        channel,
        value
      } => {
        self.palette.set(channel, value);
        let written = self
          .persistence
          .save_palette(&self.palette);
        Outcome {
          rerender:  self.theme
            == Theme::Custom,
          persisted: written_slots(
            Slot::Palette,
            written
          )
        }
      }
      | Action::SetLanguage(code) => {
        let language =
          Language::from_code(&code)
            .unwrap_or(
              self
                .catalog
                .default_language()
            );
        self.language = language;
        let written = self
          .persistence
          .save_language(language);
        Outcome::saved(
          Slot::Language,
          written
        )
      }
      | Action::OpenCustomizer => {
        if self.theme == Theme::Custom
          && !self.modal.is_open()
        {
          self.modal = CustomizerModal::Open;
          Outcome::render_only()
        } else {
          Outcome::unchanged()
        }
      }
      | Action::CloseCustomizer => {
        if self.modal.is_open() {
          self.modal =
            CustomizerModal::Closed;
          Outcome::render_only()
        } else {
          Outcome::unchanged()
        }
      }
      | Action::SystemSchemeChanged(
        scheme
      ) => {
        let changed =
          self.system_scheme != scheme;
        self.system_scheme = scheme;
        Outcome {
          rerender:  changed
            && self.theme == Theme::System,
          persisted: Vec::new()
        }
      }
    };

    debug!(
      rerender = outcome.rerender,
      persisted = ?outcome.persisted,
      "handled action"
    );
    outcome
  }

  fn persist_tasks(&mut self) -> Outcome {
    let written = self
      .persistence
      .save_tasks(self.tasks.tasks());
    Outcome::saved(Slot::Tasks, written)
  }

  fn set_theme(
    &mut self,
    theme: Theme
  ) -> Outcome {
    self.theme = theme;
    if theme != Theme::Custom {
      self.modal = CustomizerModal::Closed;
    }
    let written =
      self.persistence.save_theme(theme);
    Outcome::saved(Slot::Theme, written)
  }
}

fn written_slots(
  slot: Slot,
  written: bool
) -> Vec<Slot> {
  if written {
    vec![slot]
  } else {
    Vec::new()
  }
}
