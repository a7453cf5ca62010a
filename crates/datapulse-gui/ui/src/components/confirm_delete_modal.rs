use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ConfirmDeleteModalProps {
  pub title:      String,
  pub on_confirm: Callback<()>,
  pub on_close:   Callback<()>
}

#[function_component(ConfirmDeleteModal)]
pub fn confirm_delete_modal(
  props: &ConfirmDeleteModalProps
) -> Html {
  let on_backdrop = {
    let on_close = props.on_close.clone();
    Callback::from(move |_: MouseEvent| {
      on_close.emit(())
    })
  };
  let on_cancel = on_backdrop.clone();
  let on_confirm = {
    let on_confirm =
      props.on_confirm.clone();
    Callback::from(move |_: MouseEvent| {
      on_confirm.emit(())
    })
  };

  html! {
      <div class="modal-backdrop" onclick={on_backdrop}>
          <div class="modal" onclick={|e: MouseEvent| e.stop_propagation()}>
              <div class="header">{ "Confirm deletion" }</div>
              <div class="content">
                  <p>
                      { "Delete the data source " }
                      <strong>{ &props.title }</strong>
                      { "? This cannot be undone." }
                  </p>
              </div>
              <div class="footer">
                  <button class="btn" type="button" onclick={on_cancel}>{ "Cancel" }</button>
                  <button class="btn danger" type="button" onclick={on_confirm}>{ "Delete" }</button>
              </div>
          </div>
      </div>
  }
}
