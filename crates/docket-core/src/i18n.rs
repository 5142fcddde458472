use std::collections::BTreeMap;

use anyhow::{
  Context,
  anyhow
};
use tracing::{
  error,
  info,
  warn
};

use crate::filter::Filter;
use crate::prefs::{
  Language,
  PaletteChannel,
  Theme
};

const LOCALES_TOML: &str =
  include_str!("../assets/locales.toml");

const ITEMS_LEFT_KEY: &str = "items_left";

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum PluralCategory {
  One,
  Few,
  Many,
  Other
}

impl PluralCategory {
  pub fn as_key(self) -> &'static str {
    match self {
      | Self::One => "one",
      | Self::Few => "few",
      | Self::Many => "many",
      | Self::Other => "other"
    }
  }

  pub fn for_count(
    language: Language,
    count: usize
  ) -> Self {
    match language {
      | Language::Ru => {
        let tens = count % 100;
        match count % 10 {
          | 1 if tens != 11 => Self::One,
          | 2..=4
            if !(12..=14)
              .contains(&tens) =>
          {
            Self::Few
          }
          | _ => Self::Many
        }
      }
      | Language::Fr => {
        if count <= 1 {
          Self::One
        } else {
          Self::Other
        }
      }
      | Language::En
      | Language::Es
      | Language::De => {
        if count == 1 {
          Self::One
        } else {
          Self::Other
        }
      }
    }
  }
}

/// Translation tables keyed by language
/// code and dotted semantic key.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
  tables:           BTreeMap<
    String,
    BTreeMap<String, String>
  >,
  default_language: Language
}

impl Catalog {
  pub fn from_toml_str(
    raw: &str,
    default_language: Language
  ) -> anyhow::Result<Self> {
    let root: toml::Table =
      toml::from_str(raw).context(
        "failed to parse locale catalog"
      )?;

    let mut tables = BTreeMap::new();
    for (code, value) in root {
      let toml::Value::Table(table) =
        value
      else {
        return Err(anyhow!(
          "locale `{code}` is not a table"
        ));
      };
      let mut entries = BTreeMap::new();
      flatten_into(
        &mut entries,
        "",
        &table
      );
      tables.insert(code, entries);
    }

    if !tables
      .contains_key(default_language.code())
    {
      return Err(anyhow!(
        "catalog has no table for the \
         default language `{}`",
        default_language.code()
      ));
    }

    Ok(Self {
      tables,
      default_language
    })
  }

  /// The catalog compiled into the
  /// binary. A broken catalog leaves an
  /// empty one, so labels show their
  /// keys.
  pub fn embedded(
    default_language: Language
  ) -> Self {
    match Self::from_toml_str(
      LOCALES_TOML,
      default_language
    ) {
      | Ok(catalog) => {
        info!(
          locales = catalog.tables.len(),
          "loaded locale catalog"
        );
        catalog
      }
      | Err(error) => {
        error!(
          %error,
          "failed loading locale catalog; \
           labels fall back to keys"
        );
        Self {
          tables: BTreeMap::new(),
          default_language
        }
      }
    }
  }

  pub fn default_language(
    &self
  ) -> Language {
    self.default_language
  }

  pub fn has_language(
    &self,
    language: Language
  ) -> bool {
    self
      .tables
      .contains_key(language.code())
  }

  fn lookup(
    &self,
    language: Language,
    key: &str
  ) -> Option<&str> {
    self
      .tables
      .get(language.code())
      .and_then(|table| table.get(key))
      .map(String::as_str)
  }

  /// The phrase for `key`, falling back
  /// to the default language and finally
  /// to the key itself.
  pub fn text(
    &self,
    language: Language,
    key: &str
  ) -> String {
    self
      .lookup(language, key)
      .or_else(|| {
        self.lookup(
          self.default_language,
          key
        )
      })
      .unwrap_or(key)
      .to_string()
  }

  fn plural_form(
    &self,
    language: Language,
    key: &str,
    count: usize
  ) -> Option<&str> {
    let category =
      PluralCategory::for_count(
        language, count
      );
    self
      .lookup(
        language,
        &format!(
          "plural.{key}.{}",
          category.as_key()
        )
      )
      .or_else(|| {
        self.lookup(
          language,
          &format!("plural.{key}.other")
        )
      })
  }

  /// A count-dependent phrase with
  /// `{count}` substituted.
  pub fn plural(
    &self,
    language: Language,
    key: &str,
    count: usize
  ) -> String {
    let template = self
      .plural_form(language, key, count)
      .or_else(|| {
        self.plural_form(
          self.default_language,
          key,
          count
        )
      });

    match template {
      | Some(template) => template
        .replace(
          "{count}",
          &count.to_string()
        ),
      | None => {
        warn!(
          key,
          language = language.code(),
          "missing plural phrase"
        );
        count.to_string()
      }
    }
  }

  pub fn items_left(
    &self,
    language: Language,
    count: usize
  ) -> String {
    self.plural(
      language,
      ITEMS_LEFT_KEY,
      count
    )
  }

  /// Every static label of the UI in one
  /// language.
  pub fn labels(
    &self,
    language: Language
  ) -> Labels {
    let text =
      |key: &str| self.text(language, key);

    Labels {
      language,
      title: text("title"),
      add: text("add"),
      placeholder: text("placeholder"),
      clear_completed: text(
        "clear_completed"
      ),
      theme_label: text("theme_label"),
      lang_label: text("lang_label"),
      modal_title: text("modal_title"),
      customize: text("customize"),
      close: text("close"),
      delete: text("delete"),
      edit_hint: text("edit_hint"),
      filters: Filter::ALL
        .into_iter()
        .map(|filter| {
          (
            filter,
            text(&format!(
              "filters.{}",
              filter.as_key()
            ))
          )
        })
        .collect(),
      themes: Theme::ALL
        .into_iter()
        .map(|theme| {
          (
            theme,
            text(&format!(
              "theme.{}",
              theme.as_key()
            ))
          )
        })
        .collect(),
      palette: PaletteChannel::ALL
        .into_iter()
        .map(|channel| {
          (
            channel,
            text(&format!(
              "palette.{}",
              channel.as_key()
            ))
          )
        })
        .collect()
    }
  }
}

fn flatten_into(
  out: &mut BTreeMap<String, String>,
  prefix: &str,
  table: &toml::Table
) {
  for (key, value) in table {
    let path = if prefix.is_empty() {
      key.clone()
    } else {
      format!("{prefix}.{key}")
    };
    match value {
      | toml::Value::String(text) => {
        out.insert(path, text.clone());
      }
      | toml::Value::Table(nested) => {
        flatten_into(out, &path, nested);
      }
      | _ => {
        warn!(
          key = %path,
          "ignoring non-string locale \
           entry"
        );
      }
    }
  }
}

/// Resolved UI text for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
  pub language:        Language,
  pub title:           String,
  pub add:             String,
  pub placeholder:     String,
  pub clear_completed: String,
  pub theme_label:     String,
  pub lang_label:      String,
  pub modal_title:     String,
  pub customize:       String,
  pub close:           String,
  pub delete:          String,
  pub edit_hint:       String,
  pub filters:         Vec<(Filter, String)>,
  pub themes:          Vec<(Theme, String)>,
  pub palette:
    Vec<(PaletteChannel, String)>
}

impl Labels {
  pub fn filter(
    &self,
    filter: Filter
  ) -> &str {
    self
      .filters
      .iter()
      .find(|(f, _)| *f == filter)
      .map(|(_, label)| label.as_str())
      .unwrap_or(filter.as_key())
  }

  pub fn theme(&self, theme: Theme) -> &str {
    self
      .themes
      .iter()
      .find(|(t, _)| *t == theme)
      .map(|(_, label)| label.as_str())
      .unwrap_or(theme.as_key())
  }
}
