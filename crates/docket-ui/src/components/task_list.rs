use docket_core::task::Task;
use web_sys::DragEvent;
use yew::{
  Callback,
  Html,
  NodeRef,
  Properties,
  function_component,
  html
};

use super::TaskRow;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub tasks:           Vec<Task>,
  pub list_ref:        NodeRef,
  pub reorder_enabled: bool,
  pub dragging:        Option<String>,
  pub delete_label:    String,
  pub edit_hint:       String,
  pub on_toggle:       Callback<String>,
  pub on_edit:
    Callback<(String, String)>,
  pub on_delete:       Callback<String>,
  pub on_drag_start:   Callback<String>,
  pub on_drag_over:    Callback<DragEvent>,
  pub on_drag_end:     Callback<()>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  let ondragover = {
    let on_drag_over =
      props.on_drag_over.clone();
    let enabled = props.reorder_enabled;
    Callback::from(
      move |event: DragEvent| {
        if !enabled {
          return;
        }
        event.prevent_default();
        on_drag_over.emit(event);
      }
    )
  };

  html! {
      <ul class="task-list" ref={props.list_ref.clone()} {ondragover}>
          {
              for props.tasks.iter().cloned().map(|task| {
                  let dragging = props.dragging.as_deref() == Some(task.id.as_str());
                  let key = task.id.clone();
                  html! {
                      <TaskRow
                          key={key}
                          task={task}
                          draggable={props.reorder_enabled}
                          dragging={dragging}
                          delete_label={props.delete_label.clone()}
                          edit_hint={props.edit_hint.clone()}
                          on_toggle={props.on_toggle.clone()}
                          on_edit={props.on_edit.clone()}
                          on_delete={props.on_delete.clone()}
                          on_drag_start={props.on_drag_start.clone()}
                          on_drag_end={props.on_drag_end.clone()}
                      />
                  }
              })
          }
      </ul>
  }
}
