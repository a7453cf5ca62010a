use datapulse_core::format::table_placeholder;
use datapulse_core::{
  DataTask,
  TaskId
};
use datapulse_gui_shared::TaskFields;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html,
  use_state
};

use super::{
  ConfirmDeleteModal,
  TaskModal
};

#[derive(Clone, PartialEq)]
enum Dialog {
  Add,
  Edit(DataTask),
  Delete(DataTask)
}

#[derive(Properties, PartialEq)]
pub struct ManagementPageProps {
  pub tasks:     Vec<DataTask>,
  pub on_add:    Callback<TaskFields>,
  pub on_update:
    Callback<(TaskId, TaskFields)>,
  pub on_delete: Callback<TaskId>
}

#[function_component(ManagementPage)]
pub fn management_page(
  props: &ManagementPageProps
) -> Html {
  let dialog = use_state(|| None::<Dialog>);

  let on_open_add = {
    let dialog = dialog.clone();
    Callback::from(move |_| {
      dialog.set(Some(Dialog::Add))
    })
  };

  let on_close = {
    let dialog = dialog.clone();
    Callback::from(move |()| {
      dialog.set(None)
    })
  };

  let dialog_html = match (*dialog).clone()
  {
    | None => html! {},
    | Some(Dialog::Add) => {
      let on_save = {
        let dialog = dialog.clone();
        let on_add = props.on_add.clone();
        Callback::from(
          move |fields: TaskFields| {
            dialog.set(None);
            on_add.emit(fields);
          }
        )
      };
      html! {
          <TaskModal editing={None::<DataTask>} {on_save} on_close={on_close.clone()} />
      }
    }
    | Some(Dialog::Edit(task)) => {
      let on_save = {
        let dialog = dialog.clone();
        let on_update =
          props.on_update.clone();
        let id = task.id.clone();
        Callback::from(
          move |fields: TaskFields| {
            dialog.set(None);
            on_update
              .emit((id.clone(), fields));
          }
        )
      };
      html! {
          <TaskModal editing={Some(task)} {on_save} on_close={on_close.clone()} />
      }
    }
    | Some(Dialog::Delete(task)) => {
      let on_confirm = {
        let dialog = dialog.clone();
        let on_delete =
          props.on_delete.clone();
        let id = task.id.clone();
        Callback::from(move |()| {
          dialog.set(None);
          on_delete.emit(id.clone());
        })
      };
      html! {
          <ConfirmDeleteModal title={task.title.clone()} {on_confirm} on_close={on_close.clone()} />
      }
    }
  };

  html! {
      <div class="management">
          <div class="management-toolbar">
              <button class="btn primary" type="button" onclick={on_open_add}>{ "+ Add data source" }</button>
          </div>
          <table class="task-table">
              <thead>
                  <tr>
                      <th>{ "Data source" }</th>
                      <th>{ "SQL Query (source)" }</th>
                      <th><span class="sr-only">{ "Actions" }</span></th>
                  </tr>
              </thead>
              <tbody>
                  {
                      for props.tasks.iter().map(|task| {
                          let on_edit = {
                              let dialog = dialog.clone();
                              let task = task.clone();
                              Callback::from(move |_| dialog.set(Some(Dialog::Edit(task.clone()))))
                          };
                          let on_delete = {
                              let dialog = dialog.clone();
                              let task = task.clone();
                              Callback::from(move |_| dialog.set(Some(Dialog::Delete(task.clone()))))
                          };
                          html! {
                              <tr key={task.id.as_str().to_string()}>
                                  <td>{ &task.title }</td>
                                  <td><code>{ &task.sql_query }</code></td>
                                  <td>
                                      <div class="actions">
                                          <button class="btn" type="button" title="Edit" onclick={on_edit}>{ "Edit" }</button>
                                          <button class="btn danger" type="button" title="Delete" onclick={on_delete}>{ "Delete" }</button>
                                      </div>
                                  </td>
                              </tr>
                          }
                      })
                  }
                  {
                      if let Some(hint) = table_placeholder(&props.tasks) {
                          html! {
                              <tr>
                                  <td colspan="3" class="empty-hint">{ hint }</td>
                              </tr>
                          }
                      } else {
                          html! {}
                      }
                  }
              </tbody>
          </table>
          { dialog_html }
      </div>
  }
}
