use docket_core::filter::Filter;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct FilterBarProps {
  pub active:        Filter,
  pub labels:        Vec<(Filter, String)>,
  pub items_left:    String,
  pub clear_label:   String,
  pub has_completed: bool,
  pub on_select:     Callback<Filter>,
  pub on_clear:      Callback<()>
}

#[function_component(FilterBar)]
pub fn filter_bar(
  props: &FilterBarProps
) -> Html {
  let on_clear = {
    let on_clear = props.on_clear.clone();
    Callback::from(move |_: MouseEvent| {
      on_clear.emit(());
    })
  };

  html! {
      <footer class="footer">
          <span id="items-left" class="items-left">{ &props.items_left }</span>
          <div class="filters" role="tablist">
              {
                  for props.labels.iter().cloned().map(|(filter, label)| {
                      let active = props.active == filter;
                      let on_select = props.on_select.clone();
                      html! {
                          <button
                              type="button"
                              role="tab"
                              class={classes!("filter", active.then_some("is-active"))}
                              data-filter={filter.as_key()}
                              aria-selected={active.to_string()}
                              onclick={move |_| on_select.emit(filter)}
                          >
                              { label }
                          </button>
                      }
                  })
              }
          </div>
          <button
              type="button"
              id="clear-completed"
              class="clear-completed"
              disabled={!props.has_completed}
              onclick={on_clear}
          >
              { &props.clear_label }
          </button>
      </footer>
  }
}
