use std::collections::BTreeMap;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub enum Theme {
  #[default]
  System,
  Light,
  Dark,
  Pink,
  Custom
}

impl Theme {
  pub const ALL: [Theme; 5] = [
    Theme::System,
    Theme::Light,
    Theme::Dark,
    Theme::Pink,
    Theme::Custom
  ];

  pub fn as_key(self) -> &'static str {
    match self {
      | Self::System => "system",
      | Self::Light => "light",
      | Self::Dark => "dark",
      | Self::Pink => "pink",
      | Self::Custom => "custom"
    }
  }

  pub fn as_class(self) -> &'static str {
    match self {
      | Self::System => "theme-system",
      | Self::Light => "theme-light",
      | Self::Dark => "theme-dark",
      | Self::Pink => "theme-pink",
      | Self::Custom => "theme-custom"
    }
  }

  pub fn from_key(
    key: &str
  ) -> Option<Self> {
    Self::ALL.into_iter().find(|theme| {
      theme.as_key() == key.trim()
    })
  }

  /// Unknown keys resolve to `system`.
  pub fn from_key_or_default(
    key: &str
  ) -> Self {
    Self::from_key(key).unwrap_or_default()
  }
}

/// The OS-level light/dark preference.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub enum ColorScheme {
  #[default]
  Light,
  Dark
}

impl ColorScheme {
  pub fn as_key(self) -> &'static str {
    match self {
      | Self::Light => "light",
      | Self::Dark => "dark"
    }
  }

  pub fn from_dark_flag(
    prefers_dark: bool
  ) -> Self {
    if prefers_dark {
      Self::Dark
    } else {
      Self::Light
    }
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
)]
pub enum PaletteChannel {
  Bg,
  Panel,
  Text,
  Muted,
  Primary,
  Border
}

impl PaletteChannel {
  pub const ALL: [PaletteChannel; 6] = [
    PaletteChannel::Bg,
    PaletteChannel::Panel,
    PaletteChannel::Text,
    PaletteChannel::Muted,
    PaletteChannel::Primary,
    PaletteChannel::Border
  ];

  pub fn as_key(self) -> &'static str {
    match self {
      | Self::Bg => "bg",
      | Self::Panel => "panel",
      | Self::Text => "text",
      | Self::Muted => "muted",
      | Self::Primary => "primary",
      | Self::Border => "border"
    }
  }

  pub fn from_key(
    key: &str
  ) -> Option<Self> {
    Self::ALL.into_iter().find(
      |channel| {
        channel.as_key() == key.trim()
      }
    )
  }

  /// Name of the style variable set on
  /// the document root.
  pub fn css_var(self) -> &'static str {
    match self {
      | Self::Bg => "--bg",
      | Self::Panel => "--panel",
      | Self::Text => "--text",
      | Self::Muted => "--muted",
      | Self::Primary => "--primary",
      | Self::Border => "--border"
    }
  }

  pub fn fallback_color(
    self
  ) -> &'static str {
    match self {
      | Self::Bg => "#0f172a",
      | Self::Panel => "#111827",
      | Self::Text => "#e5e7eb",
      | Self::Muted => "#9ca3af",
      | Self::Primary => "#22d3ee",
      | Self::Border => "#1f2937"
    }
  }
}

/// User-chosen colors for the `custom`
/// theme. Channels are optional and keep
/// whatever string was stored; resolving
/// validates them.
#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
)]
pub struct CustomPalette {
  channels: BTreeMap<PaletteChannel, String>
}

impl CustomPalette {
  pub fn raw(
    &self,
    channel: PaletteChannel
  ) -> Option<&str> {
    self
      .channels
      .get(&channel)
      .map(String::as_str)
  }

  pub fn set(
    &mut self,
    channel: PaletteChannel,
    value: impl Into<String>
  ) {
    self
      .channels
      .insert(channel, value.into());
  }

  pub fn is_empty(&self) -> bool {
    self.channels.is_empty()
  }

  pub fn iter(
    &self
  ) -> impl Iterator<
    Item = (PaletteChannel, &str)
  > {
    self.channels.iter().map(
      |(channel, value)| {
        (*channel, value.as_str())
      }
    )
  }

  /// A usable `#rrggbb` color for the
  /// channel, falling back when the
  /// stored value is missing or
  /// malformed.
  pub fn resolve(
    &self,
    channel: PaletteChannel
  ) -> String {
    self
      .raw(channel)
      .and_then(normalize_hex_color)
      .unwrap_or_else(|| {
        channel
          .fallback_color()
          .to_string()
      })
  }

  pub fn resolved(
    &self
  ) -> Vec<(PaletteChannel, String)> {
    PaletteChannel::ALL
      .into_iter()
      .map(|channel| {
        (channel, self.resolve(channel))
      })
      .collect()
  }
}

/// Accepts `#rgb` and `#rrggbb`, returning
/// the lowercase six-digit form.
pub fn normalize_hex_color(
  value: &str
) -> Option<String> {
  let raw = value.trim().strip_prefix('#')?;
  if !raw
    .chars()
    .all(|ch| ch.is_ascii_hexdigit())
  {
    return None;
  }

  match raw.len() {
    | 3 => {
      let mut expanded =
        String::with_capacity(7);
      expanded.push('#');
      for ch in raw.chars() {
        expanded.push(ch);
        expanded.push(ch);
      }
      Some(expanded.to_ascii_lowercase())
    }
    | 6 => Some(format!(
      "#{}",
      raw.to_ascii_lowercase()
    )),
    | _ => None
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub enum Language {
  #[default]
  En,
  Ru,
  Es,
  De,
  Fr
}

impl Language {
  pub const ALL: [Language; 5] = [
    Language::En,
    Language::Ru,
    Language::Es,
    Language::De,
    Language::Fr
  ];

  pub fn code(self) -> &'static str {
    match self {
      | Self::En => "en",
      | Self::Ru => "ru",
      | Self::Es => "es",
      | Self::De => "de",
      | Self::Fr => "fr"
    }
  }

  pub fn native_name(
    self
  ) -> &'static str {
    match self {
      | Self::En => "English",
      | Self::Ru => "Русский",
      | Self::Es => "Español",
      | Self::De => "Deutsch",
      | Self::Fr => "Français"
    }
  }

  pub fn from_code(
    code: &str
  ) -> Option<Self> {
    let code =
      code.trim().to_ascii_lowercase();
    Self::ALL
      .into_iter()
      .find(|lang| lang.code() == code)
  }

  /// Resolves a locale tag such as
  /// `es-MX` or `pt_BR` by its primary
  /// subtag.
  pub fn from_locale(
    locale: &str
  ) -> Option<Self> {
    let primary = locale
      .trim()
      .split(['-', '_'])
      .next()
      .unwrap_or_default();
    Self::from_code(primary)
  }
}

/// What the presentation layer must do to
/// show a theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemePlan {
  pub theme:                Theme,
  pub class:                &'static str,
  pub color_scheme:         ColorScheme,
  pub variables:
    Vec<(&'static str, String)>,
  pub clear_variables:      bool,
  pub customizer_available: bool
}

impl ThemePlan {
  pub fn build(
    theme: Theme,
    palette: &CustomPalette,
    system_scheme: ColorScheme
  ) -> Self {
    let color_scheme = match theme {
      | Theme::System => system_scheme,
      | Theme::Light | Theme::Pink => {
        ColorScheme::Light
      }
      | Theme::Dark | Theme::Custom => {
        ColorScheme::Dark
      }
    };

    let variables = if theme == Theme::Custom
    {
      palette
        .resolved()
        .into_iter()
        .map(|(channel, color)| {
          (channel.css_var(), color)
        })
        .collect()
    } else {
      Vec::new()
    };

    Self {
      theme,
      class: theme.as_class(),
      color_scheme,
      variables,
      clear_variables: theme
        != Theme::Custom,
      customizer_available: theme
        == Theme::Custom
    }
  }

  /// Every variable a custom palette may
  /// have set, for clearing.
  pub fn all_variable_names()
  -> impl Iterator<Item = &'static str> {
    PaletteChannel::ALL
      .into_iter()
      .map(PaletteChannel::css_var)
  }
}

/// Theme customizer modal.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub enum CustomizerModal {
  #[default]
  Closed,
  Open
}

impl CustomizerModal {
  pub fn is_open(self) -> bool {
    self == Self::Open
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn theme_keys_default_to_system() {
    assert_eq!(
      Theme::from_key_or_default("pink"),
      Theme::Pink
    );
    assert_eq!(
      Theme::from_key_or_default("neon"),
      Theme::System
    );
    assert_eq!(
      Theme::from_key_or_default(""),
      Theme::System
    );
  }

  #[test]
  fn hex_colors_are_normalized() {
    assert_eq!(
      normalize_hex_color("#ABC")
        .as_deref(),
      Some("#aabbcc")
    );
    assert_eq!(
      normalize_hex_color(" #12aBef ")
        .as_deref(),
      Some("#12abef")
    );
    assert_eq!(
      normalize_hex_color("12abef"),
      None
    );
    assert_eq!(
      normalize_hex_color("#12ab"),
      None
    );
    assert_eq!(
      normalize_hex_color("#ggg"),
      None
    );
  }

  #[test]
  fn palette_falls_back_per_channel() {
    let mut palette =
      CustomPalette::default();
    palette
      .set(PaletteChannel::Bg, "#ff0000");
    palette
      .set(PaletteChannel::Text, "red");

    assert_eq!(
      palette.resolve(PaletteChannel::Bg),
      "#ff0000"
    );
    assert_eq!(
      palette
        .resolve(PaletteChannel::Text),
      "#e5e7eb"
    );
    assert_eq!(
      palette
        .resolve(PaletteChannel::Border),
      "#1f2937"
    );
    assert_eq!(palette.resolved().len(), 6);
  }

  #[test]
  fn locale_primary_subtag() {
    assert_eq!(
      Language::from_locale("es-MX"),
      Some(Language::Es)
    );
    assert_eq!(
      Language::from_locale("RU_ru"),
      Some(Language::Ru)
    );
    assert_eq!(
      Language::from_locale("pt-BR"),
      None
    );
    assert_eq!(
      Language::from_locale(""),
      None
    );
  }

  #[test]
  fn plan_sets_variables_only_for_custom()
  {
    let mut palette =
      CustomPalette::default();
    palette.set(
      PaletteChannel::Primary,
      "#00ff00"
    );

    let custom = ThemePlan::build(
      Theme::Custom,
      &palette,
      ColorScheme::Light
    );
    assert_eq!(custom.class, "theme-custom");
    assert!(custom.customizer_available);
    assert!(!custom.clear_variables);
    assert_eq!(custom.variables.len(), 6);
    assert!(custom.variables.contains(&(
      "--primary",
      "#00ff00".to_string()
    )));

    let dark = ThemePlan::build(
      Theme::Dark,
      &palette,
      ColorScheme::Light
    );
    assert!(dark.variables.is_empty());
    assert!(dark.clear_variables);
    assert!(!dark.customizer_available);
  }

  #[test]
  fn system_plan_follows_os_scheme() {
    let palette = CustomPalette::default();
    let plan = ThemePlan::build(
      Theme::System,
      &palette,
      ColorScheme::Dark
    );
    assert_eq!(
      plan.color_scheme,
      ColorScheme::Dark
    );
    assert_eq!(plan.class, "theme-system");
  }
}
