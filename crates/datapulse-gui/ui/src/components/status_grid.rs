use std::collections::BTreeSet;

use datapulse_core::{
  DataTask,
  TaskId
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::StatusCard;

#[derive(Properties, PartialEq)]
pub struct StatusGridProps {
  pub tasks:      Vec<DataTask>,
  pub refreshing: BTreeSet<TaskId>,
  pub on_refresh: Callback<TaskId>
}

#[function_component(StatusGrid)]
pub fn status_grid(
  props: &StatusGridProps
) -> Html {
  if props.tasks.is_empty() {
    return html! {
        <div class="empty-hint">
            { "No data sources to monitor yet. Open \"Manage data sources\" to add one." }
        </div>
    };
  }

  html! {
      <div class="status-grid">
          {
              for props.tasks.iter().map(|task| html! {
                  <StatusCard
                      key={task.id.as_str().to_string()}
                      task={task.clone()}
                      refreshing={props.refreshing.contains(&task.id)}
                      on_refresh={props.on_refresh.clone()}
                  />
              })
          }
      </div>
  }
}
