use docket_core::prefs::PaletteChannel;
use web_sys::{
  HtmlInputElement,
  InputEvent
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

/// One color input of the customizer.
#[derive(Clone, PartialEq)]
pub struct ChannelField {
  pub channel: PaletteChannel,
  pub label:   String,
  pub color:   String
}

#[derive(Properties, PartialEq)]
pub struct ThemeModalProps {
  pub open:        bool,
  pub title:       String,
  pub close_label: String,
  pub fields:      Vec<ChannelField>,
  pub on_close:    Callback<()>,
  pub on_channel:
    Callback<(PaletteChannel, String)>
}

#[function_component(ThemeModal)]
pub fn theme_modal(
  props: &ThemeModalProps
) -> Html {
  if !props.open {
    return html! {};
  }

  let on_close = {
    let on_close = props.on_close.clone();
    Callback::from(move |_: MouseEvent| {
      on_close.emit(());
    })
  };

  html! {
      <div class="modal-backdrop" onclick={on_close.clone()}>
          <div
              id="theme-modal"
              class="modal"
              role="dialog"
              aria-modal="true"
              aria-labelledby="theme-modal-title"
              onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}
          >
              <div class="header">
                  <span id="theme-modal-title">{ &props.title }</span>
                  <button
                      type="button"
                      id="close-theme-modal"
                      class="btn"
                      aria-label={props.close_label.clone()}
                      onclick={on_close}
                  >
                      { &props.close_label }
                  </button>
              </div>
              <div class="content theme-customizer">
                  {
                      for props.fields.iter().cloned().map(|field| {
                          let on_channel = props.on_channel.clone();
                          let channel = field.channel;
                          html! {
                              <label class="field">
                                  <span>{ field.label }</span>
                                  <input
                                      type="color"
                                      id={format!("color-{}", channel.as_key())}
                                      value={field.color}
                                      oninput={move |event: InputEvent| {
                                          let input: HtmlInputElement = event.target_unchecked_into();
                                          on_channel.emit((channel, input.value()));
                                      }}
                                  />
                              </label>
                          }
                      })
                  }
              </div>
          </div>
      </div>
  }
}
