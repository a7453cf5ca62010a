use yew::{
  Html,
  function_component,
  html
};

#[function_component(NotConfigured)]
pub fn not_configured() -> Html {
  html! {
      <div class="not-configured">
          <h2>{ "Data store not configured" }</h2>
          <p>
              { "Set " }
              <code>{ "DATAPULSE_STORE_URL" }</code>
              { " and " }
              <code>{ "DATAPULSE_STORE_KEY" }</code>
              { " (or the " }
              <code>{ "[store]" }</code>
              { " table of " }
              <code>{ "datapulse.toml" }</code>
              { ") to the project URL and access key of your data store, then restart the app." }
          </p>
      </div>
  }
}
