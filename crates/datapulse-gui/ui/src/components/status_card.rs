use chrono::Local;
use datapulse_core::format::card_view;
use datapulse_core::{
  DataTask,
  TaskId
};
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct StatusCardProps {
  pub task:       DataTask,
  pub refreshing: bool,
  pub on_refresh: Callback<TaskId>
}

#[function_component(StatusCard)]
pub fn status_card(
  props: &StatusCardProps
) -> Html {
  let view = card_view(
    &props.task,
    props.refreshing,
    &Local
  );

  let on_refresh =
    props.on_refresh.clone();
  let id = props.task.id.clone();

  html! {
      <div class="status-card">
          <h2>{ &view.title }</h2>
          <div class="label">{ "Last updated on" }</div>
          <div class={classes!("date", (!view.stamped).then_some("placeholder"))}>{ &view.date }</div>
          <div class="time">{ &view.time }</div>
          <div style="display:flex;justify-content:flex-end;margin-top:12px;">
              <button
                  class="btn primary"
                  type="button"
                  disabled={view.disabled}
                  aria-label={format!("Refresh {}", view.title)}
                  onclick={move |_| on_refresh.emit(id.clone())}
              >
                  {
                      if view.disabled {
                          html! { <span class="spinner"></span> }
                      } else {
                          html! { { "\u{21bb}" } }
                      }
                  }
                  { " " }
                  { view.button_label }
              </button>
          </div>
      </div>
  }
}
