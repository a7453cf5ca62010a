use tracing_subscriber::prelude::*;
use tracing_subscriber::{
  EnvFilter,
  fmt
};

pub const DEFAULT_DIRECTIVES: &str =
  "info,datapulse_gui_tauri=debug,\
   datapulse_core=debug";

/// `RUST_LOG` when it parses, otherwise
/// the dashboard defaults.
fn filter_from(
  raw: Option<&str>
) -> EnvFilter {
  raw
    .map(str::trim)
    .filter(|raw| !raw.is_empty())
    .and_then(|raw| {
      EnvFilter::try_new(raw)
        .inspect_err(|err| {
          eprintln!(
            "ignoring RUST_LOG={raw:?}: \
             {err}"
          );
        })
        .ok()
    })
    .unwrap_or_else(|| {
      EnvFilter::new(DEFAULT_DIRECTIVES)
    })
}

pub fn init() {
  let raw = std::env::var("RUST_LOG").ok();
  let layer = fmt::layer()
    .with_target(true)
    .with_line_number(true);

  if tracing_subscriber::registry()
    .with(filter_from(raw.as_deref()))
    .with(layer)
    .try_init()
    .is_err()
  {
    tracing::debug!(
      "global subscriber already set"
    );
  }
}
