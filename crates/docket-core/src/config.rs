use anyhow::Context;
use serde::Deserialize;
use tracing::{
  error,
  info,
  warn
};

use crate::prefs::Language;

const EMBEDDED_CONFIG_TOML: &str =
  include_str!("../assets/docket.toml");

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
pub struct AppConfig {
  #[serde(default = "default_version")]
  pub version: u32,
  #[serde(default)]
  pub storage: StorageKeys,
  #[serde(default)]
  pub i18n:    I18nConfig
}

/// Keys of the persisted slots in the
/// durable store.
#[derive(
  Debug, Clone, PartialEq, Eq, Deserialize,
)]
#[serde(default)]
pub struct StorageKeys {
  pub tasks:    String,
  pub theme:    String,
  pub palette:  String,
  pub language: String
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct I18nConfig {
  pub default_language: String
}

fn default_version() -> u32 {
  1
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      version: default_version(),
      storage: StorageKeys::default(),
      i18n:    I18nConfig::default()
    }
  }
}

impl Default for StorageKeys {
  fn default() -> Self {
    Self {
      tasks:    "docket.tasks.v1"
        .to_string(),
      theme:    "docket.theme.v1"
        .to_string(),
      palette:  "docket.theme.custom.v1"
        .to_string(),
      language: "docket.lang.v1"
        .to_string()
    }
  }
}

impl Default for I18nConfig {
  fn default() -> Self {
    Self {
      default_language: Language::default()
        .code()
        .to_string()
    }
  }
}

impl AppConfig {
  pub fn from_toml_str(
    raw: &str
  ) -> anyhow::Result<Self> {
    let mut cfg: AppConfig =
      toml::from_str(raw).context(
        "failed to parse docket config"
      )?;
    cfg.sanitize();
    Ok(cfg)
  }

  /// The configuration compiled into the
  /// binary, or the built-in defaults if
  /// it does not parse.
  pub fn embedded() -> Self {
    match Self::from_toml_str(
      EMBEDDED_CONFIG_TOML
    ) {
      | Ok(cfg) => {
        info!(
          version = cfg.version,
          default_language =
            %cfg.i18n.default_language,
          "loaded docket config"
        );
        cfg
      }
      | Err(error) => {
        error!(
          %error,
          "failed parsing docket config; \
           using defaults"
        );
        Self::default()
      }
    }
  }

  pub fn default_language(
    &self
  ) -> Language {
    Language::from_code(
      &self.i18n.default_language
    )
    .unwrap_or_default()
  }

  fn sanitize(&mut self) {
    let defaults = StorageKeys::default();
    let keys = &mut self.storage;
    for (slot, fallback) in [
      (&mut keys.tasks, defaults.tasks),
      (&mut keys.theme, defaults.theme),
      (
        &mut keys.palette,
        defaults.palette
      ),
      (
        &mut keys.language,
        defaults.language
      ),
    ] {
      if slot.trim().is_empty() {
        warn!(
          fallback = %fallback,
          "blank storage key in config; \
           using default"
        );
        *slot = fallback;
      }
    }

    if Language::from_code(
      &self.i18n.default_language
    )
    .is_none()
    {
      warn!(
        code = %self.i18n.default_language,
        "unsupported default language; \
         using en"
      );
      self.i18n.default_language =
        Language::default()
          .code()
          .to_string();
    }
  }
}
