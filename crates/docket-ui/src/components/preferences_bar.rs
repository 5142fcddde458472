use docket_core::i18n::Labels;
use docket_core::prefs::{
  Language,
  Theme
};
use web_sys::{
  Event,
  HtmlSelectElement
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct PreferencesBarProps {
  pub theme:        Theme,
  pub language:     Language,
  pub labels:       Labels,
  pub on_theme:     Callback<String>,
  pub on_language:  Callback<String>,
  pub on_customize: Callback<()>
}

#[function_component(PreferencesBar)]
pub fn preferences_bar(
  props: &PreferencesBarProps
) -> Html {
  let on_theme_change = {
    let on_theme = props.on_theme.clone();
    Callback::from(move |event: Event| {
      let select: HtmlSelectElement =
        event.target_unchecked_into();
      on_theme.emit(select.value());
    })
  };

  let on_language_change = {
    let on_language =
      props.on_language.clone();
    Callback::from(move |event: Event| {
      let select: HtmlSelectElement =
        event.target_unchecked_into();
      on_language.emit(select.value());
    })
  };

  let on_customize = {
    let on_customize =
      props.on_customize.clone();
    Callback::from(move |_: MouseEvent| {
      on_customize.emit(());
    })
  };

  let labels = &props.labels;

  html! {
      <div class="preferences">
          <label class="theme-picker">
              <span id="theme-label">{ &labels.theme_label }</span>
              <select id="theme-select" onchange={on_theme_change}>
                  {
                      for labels.themes.iter().map(|(theme, label)| html! {
                          <option
                              value={theme.as_key()}
                              selected={*theme == props.theme}
                          >
                              { label }
                          </option>
                      })
                  }
              </select>
          </label>
          <button
              type="button"
              id="open-theme-customizer"
              class="btn"
              hidden={props.theme != Theme::Custom}
              onclick={on_customize}
          >
              { &labels.customize }
          </button>
          <label class="lang-picker">
              <span id="lang-label">{ &labels.lang_label }</span>
              <select id="lang-select" onchange={on_language_change}>
                  {
                      for Language::ALL.into_iter().map(|language| html! {
                          <option
                              value={language.code()}
                              selected={language == props.language}
                          >
                              { language.native_name() }
                          </option>
                      })
                  }
              </select>
          </label>
      </div>
  }
}
