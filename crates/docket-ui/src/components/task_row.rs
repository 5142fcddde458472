use docket_core::task::Task;
use web_sys::{
  DragEvent,
  Event,
  FocusEvent,
  HtmlInputElement,
  KeyboardEvent,
  MouseEvent
};
use yew::{
  Callback,
  Html,
  NodeRef,
  Properties,
  TargetCast,
  classes,
  function_component,
  html,
  use_effect_with,
  use_mut_ref,
  use_node_ref,
  use_state
};

#[derive(Properties, PartialEq)]
pub struct TaskRowProps {
  pub task:          Task,
  pub draggable:     bool,
  pub dragging:      bool,
  pub delete_label:  String,
  pub edit_hint:     String,
  pub on_toggle:     Callback<String>,
  pub on_edit:
    Callback<(String, String)>,
  pub on_delete:     Callback<String>,
  pub on_drag_start: Callback<String>,
  pub on_drag_end:   Callback<()>
}

fn focus_at_end(input_ref: &NodeRef) {
  let Some(input) =
    input_ref.cast::<HtmlInputElement>()
  else {
    return;
  };
  let _ = input.focus();
  let end =
    input.value().encode_utf16().count()
      as u32;
  let _ =
    input.set_selection_range(end, end);
}

#[function_component(TaskRow)]
pub fn task_row(
  props: &TaskRowProps
) -> Html {
  let editing = use_state(|| false);
  // Enter and Escape remove the input,
  // which may fire a trailing blur.
  let finished = use_mut_ref(|| false);
  let input_ref = use_node_ref();
  let id = props.task.id.clone();

  {
    let input_ref = input_ref.clone();
    use_effect_with(
      *editing,
      move |editing| {
        if *editing {
          focus_at_end(&input_ref);
        }
        || ()
      }
    );
  }

  let finish = {
    let editing = editing.clone();
    let finished = finished.clone();
    let on_edit = props.on_edit.clone();
    let id = id.clone();
    Callback::from(
      move |commit: Option<String>| {
        if *finished.borrow() {
          return;
        }
        *finished.borrow_mut() = true;
        if let Some(title) = commit {
          on_edit.emit((id.clone(), title));
        }
        editing.set(false);
      }
    )
  };

  let start_edit = {
    let editing = editing.clone();
    let finished = finished.clone();
    Callback::from(move |_: MouseEvent| {
      *finished.borrow_mut() = false;
      editing.set(true);
    })
  };

  let onkeydown = {
    let finish = finish.clone();
    Callback::from(
      move |event: KeyboardEvent| {
        match event.key().as_str() {
          | "Enter" => {
            event.prevent_default();
            let input: HtmlInputElement =
              event.target_unchecked_into();
            finish.emit(Some(input.value()));
          }
          | "Escape" => {
            event.prevent_default();
            finish.emit(None);
          }
          | _ => {}
        }
      }
    )
  };

  let onblur = {
    let finish = finish.clone();
    Callback::from(
      move |event: FocusEvent| {
        let input: HtmlInputElement =
          event.target_unchecked_into();
        finish.emit(Some(input.value()));
      }
    )
  };

  let onchange = {
    let on_toggle =
      props.on_toggle.clone();
    let id = id.clone();
    Callback::from(move |_: Event| {
      on_toggle.emit(id.clone());
    })
  };

  let on_delete_click = {
    let on_delete =
      props.on_delete.clone();
    let id = id.clone();
    Callback::from(move |_: MouseEvent| {
      on_delete.emit(id.clone());
    })
  };

  let ondragstart = {
    let on_drag_start =
      props.on_drag_start.clone();
    let id = id.clone();
    Callback::from(
      move |event: DragEvent| {
        if let Some(data_transfer) =
          event.data_transfer()
        {
          let _ = data_transfer
            .set_data("text/plain", &id);
          data_transfer
            .set_effect_allowed("move");
        }
        on_drag_start.emit(id.clone());
      }
    )
  };

  let ondragend = {
    let on_drag_end =
      props.on_drag_end.clone();
    Callback::from(move |_: DragEvent| {
      on_drag_end.emit(());
    })
  };

  let draggable = props.draggable && !*editing;

  html! {
      <li
          class={classes!(
              "task",
              props.task.completed.then_some("completed"),
              props.dragging.then_some("dragging")
          )}
          data-id={id.clone()}
          draggable={if draggable { "true" } else { "false" }}
          ondragstart={draggable.then_some(ondragstart)}
          ondragend={draggable.then_some(ondragend)}
      >
          <input
              type="checkbox"
              class="toggle"
              checked={props.task.completed}
              {onchange}
          />
          {
              if *editing {
                  html! {
                      <input
                          ref={input_ref}
                          type="text"
                          class="edit-input"
                          value={props.task.title.clone()}
                          {onkeydown}
                          {onblur}
                      />
                  }
              } else {
                  html! {
                      <span
                          class="title"
                          title={format!("{} · {}", props.task.title, props.edit_hint)}
                          ondblclick={start_edit}
                      >
                          { &props.task.title }
                      </span>
                  }
              }
          }
          <button
              type="button"
              class="destroy"
              aria-label={props.delete_label.clone()}
              onclick={on_delete_click}
          >
              { &props.delete_label }
          </button>
      </li>
  }
}
