use datapulse_core::{
  DataTask,
  TaskDraft
};
use datapulse_gui_shared::TaskFields;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  SubmitEvent,
  TargetCast,
  function_component,
  html,
  use_state
};

#[derive(Properties, PartialEq)]
pub struct TaskModalProps {
  /// `None` opens a blank add form.
  pub editing:  Option<DataTask>,
  pub on_save:  Callback<TaskFields>,
  pub on_close: Callback<()>
}

#[function_component(TaskModal)]
pub fn task_modal(
  props: &TaskModalProps
) -> Html {
  let title = {
    let initial = props
      .editing
      .as_ref()
      .map(|task| task.title.clone())
      .unwrap_or_default();
    use_state(move || initial)
  };
  let sql_query = {
    let initial = props
      .editing
      .as_ref()
      .map(|task| task.sql_query.clone())
      .unwrap_or_default();
    use_state(move || initial)
  };

  let on_title_input = {
    let title = title.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        title.set(input.value());
      }
    )
  };

  let on_sql_input = {
    let sql_query = sql_query.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlTextAreaElement =
          e.target_unchecked_into();
        sql_query.set(input.value());
      }
    )
  };

  let on_submit = {
    let title = title.clone();
    let sql_query = sql_query.clone();
    let on_save = props.on_save.clone();
    Callback::from(move |e: SubmitEvent| {
      e.prevent_default();
      match TaskDraft::parse(
        &title, &sql_query
      ) {
        | Ok(draft) => {
          on_save.emit(draft.to_fields())
        }
        | Err(err) => {
          tracing::warn!(
            error = %err,
            "rejected task form"
          );
          gloo::dialogs::alert(
            &err.alert_text(
              "save the data source"
            )
          );
        }
      }
    })
  };

  let on_backdrop = {
    let on_close = props.on_close.clone();
    Callback::from(move |_: MouseEvent| {
      on_close.emit(())
    })
  };
  let on_cancel = on_backdrop.clone();

  let heading = if props.editing.is_some()
  {
    "Edit data source"
  } else {
    "Add data source"
  };

  html! {
      <div class="modal-backdrop" onclick={on_backdrop}>
          <div class="modal" onclick={|e: MouseEvent| e.stop_propagation()}>
              <div class="header">{ heading }</div>
              <form onsubmit={on_submit}>
                  <div class="content">
                      <div class="field">
                          <label for="task-title">{ "Data source name" }</label>
                          <input
                              id="task-title"
                              type="text"
                              required=true
                              value={(*title).clone()}
                              oninput={on_title_input}
                          />
                      </div>
                      <div class="field">
                          <label for="task-sql">{ "SQL Query" }</label>
                          <textarea
                              id="task-sql"
                              rows="5"
                              required=true
                              placeholder="e.g., SELECT MAX(update_date) FROM my_table;"
                              value={(*sql_query).clone()}
                              oninput={on_sql_input}
                          />
                      </div>
                  </div>
                  <div class="footer">
                      <button class="btn" type="button" onclick={on_cancel}>{ "Cancel" }</button>
                      <button class="btn primary" type="submit">{ "Save" }</button>
                  </div>
              </form>
          </div>
      </div>
  }
}
