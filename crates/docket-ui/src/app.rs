mod storage;
mod theme;

use docket_core::drag::{
  RowBox,
  insert_before,
  move_before
};
use docket_core::prefs::{
  PaletteChannel,
  Theme
};
use docket_core::task::Task;
use docket_core::{
  Action,
  AppConfig,
  Session
};
use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{
  DragEvent,
  Element,
  HtmlInputElement,
  InputEvent,
  KeyboardEvent,
  SubmitEvent
};
use yew::{
  Callback,
  Html,
  NodeRef,
  TargetCast,
  function_component,
  html,
  use_effect_with,
  use_force_update,
  use_mut_ref,
  use_node_ref,
  use_state
};

use self::storage::{
  BrowserStorage,
  browser_locale
};
use crate::components::{
  ChannelField,
  FilterBar,
  PreferencesBar,
  TaskList,
  ThemeModal
};

/// Order shown while a row is being
/// dragged, committed on dragend.
#[derive(Clone, PartialEq)]
struct DragPreview {
  dragging: String,
  order:    Vec<String>
}

fn measure_rows(
  list_ref: &NodeRef
) -> Vec<RowBox> {
  let Some(list) =
    list_ref.cast::<Element>()
  else {
    return Vec::new();
  };
  let Ok(nodes) = list.query_selector_all(
    ".task:not(.dragging)"
  ) else {
    return Vec::new();
  };

  (0..nodes.length())
    .filter_map(|idx| nodes.item(idx))
    .filter_map(|node| {
      node.dyn_into::<Element>().ok()
    })
    .filter_map(|row| {
      let id =
        row.get_attribute("data-id")?;
      let rect =
        row.get_bounding_client_rect();
      Some(RowBox {
        id,
        top: rect.top(),
        height: rect.height()
      })
    })
    .collect()
}

fn preview_tasks(
  visible: Vec<Task>,
  preview: Option<&DragPreview>
) -> Vec<Task> {
  let Some(preview) = preview else {
    return visible;
  };
  let mut remaining = visible;
  let mut ordered =
    Vec::with_capacity(remaining.len());
  for id in &preview.order {
    if let Some(idx) = remaining
      .iter()
      .position(|task| &task.id == id)
    {
      ordered.push(remaining.remove(idx));
    }
  }
  ordered.extend(remaining);
  ordered
}

#[function_component(App)]
pub fn app() -> Html {
  let session = use_mut_ref(|| {
    let config = AppConfig::embedded();
    Session::bootstrap(
      BrowserStorage,
      &config,
      browser_locale().as_deref(),
      theme::system_scheme()
    )
  });
  let force_update = use_force_update();
  let draft = use_state(String::new);
  let drag =
    use_state(|| None::<DragPreview>);
  let list_ref = use_node_ref();

  let dispatch = {
    let session = session.clone();
    let force_update = force_update.clone();
    Callback::from(move |action: Action| {
      let outcome =
        session.borrow_mut().handle(action);
      if outcome.rerender {
        force_update.force_update();
      }
    })
  };

  let (
    tasks,
    filter,
    theme,
    language,
    labels,
    items_left,
    plan,
    modal_open,
    reorder_enabled,
    has_completed,
    fields
  ) = {
    let s = session.borrow();
    let labels = s.labels();
    let fields: Vec<ChannelField> = labels
      .palette
      .iter()
      .map(|(channel, label)| {
        ChannelField {
          channel: *channel,
          label:   label.clone(),
          color:   s
            .palette()
            .resolve(*channel)
        }
      })
      .collect();
    (
      s.visible().cloned().collect::<Vec<_>>(),
      s.filter(),
      s.theme(),
      s.language(),
      labels,
      s.items_left_text(),
      s.theme_plan(),
      s.modal().is_open(),
      s.reorder_enabled(),
      s.tasks().iter().any(|task| task.completed),
      fields
    )
  };

  {
    use_effect_with(plan, move |plan| {
      theme::apply_plan(plan);
      || ()
    });
  }

  {
    let dispatch = dispatch.clone();
    use_effect_with(
      theme,
      move |theme| {
        let listener = if *theme
          == Theme::System
        {
          theme::watch_system_scheme(
            dispatch.reform(
              Action::SystemSchemeChanged
            )
          )
        } else {
          None
        };
        tracing::debug!(
          watching = listener.is_some(),
          "system color scheme listener"
        );
        move || drop(listener)
      }
    );
  }

  {
    let dispatch = dispatch.clone();
    use_effect_with(
      modal_open,
      move |open| {
        let listener = open
          .then(|| {
            web_sys::window()
              .and_then(|window| {
                window.document()
              })
          })
          .flatten()
          .map(|document| {
            EventListener::new(
              &document,
              "keydown",
              move |event| {
                let is_escape = event
                  .dyn_ref::<KeyboardEvent>()
                  .is_some_and(|event| {
                    event.key() == "Escape"
                  });
                if is_escape {
                  dispatch.emit(
                    Action::CloseCustomizer
                  );
                }
              }
            )
          });
        move || drop(listener)
      }
    );
  }

  {
    use_effect_with(
      language,
      move |language| {
        if let Some(root) = web_sys::window()
          .and_then(|window| window.document())
          .and_then(|document| {
            document.document_element()
          })
        {
          let _ = root.set_attribute(
            "lang",
            language.code()
          );
        }
        || ()
      }
    );
  }

  let on_submit = {
    let dispatch = dispatch.clone();
    let draft = draft.clone();
    Callback::from(
      move |event: SubmitEvent| {
        event.prevent_default();
        let title = (*draft).clone();
        if !title.trim().is_empty() {
          draft.set(String::new());
        }
        dispatch.emit(Action::Add(title));
      }
    )
  };

  let on_draft_input = {
    let draft = draft.clone();
    Callback::from(
      move |event: InputEvent| {
        let input: HtmlInputElement =
          event.target_unchecked_into();
        draft.set(input.value());
      }
    )
  };

  let on_drag_start = {
    let drag = drag.clone();
    let order: Vec<String> = tasks
      .iter()
      .map(|task| task.id.clone())
      .collect();
    Callback::from(move |id: String| {
      tracing::debug!(%id, "drag started");
      drag.set(Some(DragPreview {
        dragging: id,
        order:    order.clone()
      }));
    })
  };

  let on_drag_over = {
    let drag = drag.clone();
    let list_ref = list_ref.clone();
    Callback::from(
      move |event: DragEvent| {
        let Some(preview) = (*drag).clone()
        else {
          return;
        };
        let rows = measure_rows(&list_ref);
        let before = insert_before(
          &rows,
          &preview.dragging,
          f64::from(event.client_y())
        );
        let order = move_before(
          &preview.order,
          &preview.dragging,
          before
        );
        if order != preview.order {
          drag.set(Some(DragPreview {
            order,
            ..preview
          }));
        }
      }
    )
  };

  let on_drag_end = {
    let drag = drag.clone();
    let dispatch = dispatch.clone();
    Callback::from(move |()| {
      if let Some(preview) = (*drag).clone() {
        dispatch.emit(Action::Reorder(
          preview.order
        ));
      }
      drag.set(None);
    })
  };

  let visible =
    preview_tasks(tasks, (*drag).as_ref());
  let dragging = (*drag)
    .as_ref()
    .map(|preview| preview.dragging.clone());

  html! {
      <main class="app">
          <header class="app-header">
              <h1 id="i18n-title">{ &labels.title }</h1>
              <PreferencesBar
                  theme={theme}
                  language={language}
                  labels={labels.clone()}
                  on_theme={dispatch.reform(Action::SetTheme)}
                  on_language={dispatch.reform(Action::SetLanguage)}
                  on_customize={dispatch.reform(|()| Action::OpenCustomizer)}
              />
          </header>
          <form id="new-task-form" class="new-task" onsubmit={on_submit}>
              <input
                  id="new-task-input"
                  type="text"
                  autocomplete="off"
                  placeholder={labels.placeholder.clone()}
                  aria-label={labels.add.clone()}
                  value={(*draft).clone()}
                  oninput={on_draft_input}
              />
              <button type="submit" id="add-task-btn" class="btn">{ &labels.add }</button>
          </form>
          <TaskList
              tasks={visible}
              list_ref={list_ref}
              reorder_enabled={reorder_enabled}
              dragging={dragging}
              delete_label={labels.delete.clone()}
              edit_hint={labels.edit_hint.clone()}
              on_toggle={dispatch.reform(Action::Toggle)}
              on_edit={dispatch.reform(|(id, title): (String, String)| Action::Edit { id, title })}
              on_delete={dispatch.reform(Action::Delete)}
              on_drag_start={on_drag_start}
              on_drag_over={on_drag_over}
              on_drag_end={on_drag_end}
          />
          <FilterBar
              active={filter}
              labels={labels.filters.clone()}
              items_left={items_left}
              clear_label={labels.clear_completed.clone()}
              has_completed={has_completed}
              on_select={dispatch.reform(Action::SetFilter)}
              on_clear={dispatch.reform(|()| Action::ClearCompleted)}
          />
          <ThemeModal
              open={modal_open}
              title={labels.modal_title.clone()}
              close_label={labels.close.clone()}
              fields={fields}
              on_close={dispatch.reform(|()| Action::CloseCustomizer)}
              on_channel={dispatch.reform(|(channel, value): (PaletteChannel, String)| Action::SetCustomChannel { channel, value })}
          />
      </main>
  }
}
