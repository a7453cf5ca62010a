use yew::{
  Html,
  function_component,
  html
};

#[function_component(LoadingPanel)]
pub fn loading_panel() -> Html {
  html! {
      <div class="loading" aria-busy="true">
          <span class="spinner large"></span>
      </div>
  }
}
