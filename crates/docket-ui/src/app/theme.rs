use docket_core::prefs::{
  ColorScheme,
  Theme,
  ThemePlan
};
use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{
  HtmlElement,
  MediaQueryList
};
use yew::Callback;

const DARK_SCHEME_QUERY: &str =
  "(prefers-color-scheme: dark)";

fn root_element() -> Option<HtmlElement> {
  web_sys::window()
    .and_then(|window| window.document())
    .and_then(|document| {
      document.document_element()
    })
    .and_then(|root| {
      root.dyn_into::<HtmlElement>().ok()
    })
}

fn dark_scheme_query()
-> Option<MediaQueryList> {
  web_sys::window()
    .and_then(|window| {
      window
        .match_media(DARK_SCHEME_QUERY)
        .ok()
        .flatten()
    })
}

/// Pushes a theme plan onto the document
/// root: theme class, resolved scheme and
/// the custom palette variables.
pub fn apply_plan(plan: &ThemePlan) {
  let Some(root) = root_element() else {
    tracing::warn!(
      "no document root; skipping theme"
    );
    return;
  };

  let classes = root.class_list();
  for theme in Theme::ALL {
    let _ = classes.remove_1(theme.as_class());
  }
  let _ = classes.add_1(plan.class);
  let _ = root.set_attribute(
    "data-color-scheme",
    plan.color_scheme.as_key()
  );

  let style = root.style();
  if plan.clear_variables {
    for name in
      ThemePlan::all_variable_names()
    {
      let _ = style.remove_property(name);
    }
  }
  for (name, value) in &plan.variables {
    if let Err(error) =
      style.set_property(name, value)
    {
      tracing::warn!(
        name,
        ?error,
        "failed setting style variable"
      );
    }
  }

  tracing::debug!(
    theme = plan.theme.as_key(),
    scheme = plan.color_scheme.as_key(),
    variables = plan.variables.len(),
    "applied theme"
  );
}

pub fn system_scheme() -> ColorScheme {
  ColorScheme::from_dark_flag(
    dark_scheme_query()
      .is_some_and(|query| query.matches())
  )
}

/// Reports OS light/dark changes until the
/// returned listener is dropped.
pub fn watch_system_scheme(
  on_change: Callback<ColorScheme>
) -> Option<EventListener> {
  let query = dark_scheme_query()?;
  let target = query.clone();
  Some(EventListener::new(
    &target,
    "change",
    move |_| {
      on_change.emit(
        ColorScheme::from_dark_flag(
          query.matches()
        )
      );
    }
  ))
}
