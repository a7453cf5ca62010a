use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct AppHeaderProps {
  /// `None` hides the view toggle.
  pub view_label:      Option<&'static str>,
  pub theme_label:     &'static str,
  pub on_toggle_view:  Callback<MouseEvent>,
  pub on_toggle_theme: Callback<MouseEvent>
}

#[function_component(AppHeader)]
pub fn app_header(
  props: &AppHeaderProps
) -> Html {
  html! {
      <header class="app-header">
          <div>
              <h1>{ "Data Status Dashboard" }</h1>
              <div class="subtitle">{ "Check and manage the latest data status of each source" }</div>
          </div>
          <div class="header-actions">
              {
                  if let Some(label) = props.view_label {
                      html! {
                          <button class="btn primary" type="button" onclick={props.on_toggle_view.clone()}>{ label }</button>
                      }
                  } else {
                      html! {}
                  }
              }
              <button
                  class="btn"
                  type="button"
                  onclick={props.on_toggle_theme.clone()}
                  title={props.theme_label}
                  aria-label={props.theme_label}
              >
                  { props.theme_label }
              </button>
          </div>
      </header>
  }
}
