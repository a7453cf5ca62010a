mod commands;
mod logging;
mod shutdown;
mod state;

use anyhow::Context;
use tracing::{
  error,
  info
};

fn run() -> anyhow::Result<()> {
  let state = state::AppState::new()
    .context(
      "failed to initialize app state"
    )?;

  tauri::Builder::default()
    .setup(|app| {
      shutdown::watch(
        app.handle().clone()
      );
      Ok(())
    })
    .manage(state)
    .invoke_handler(
      tauri::generate_handler![
        commands::tasks::store_status,
        commands::tasks::tasks_list,
        commands::tasks::task_add,
        commands::tasks::task_update,
        commands::tasks::task_delete,
        commands::telemetry::ui_log,
      ]
    )
    .run(tauri::generate_context!())
    .context(
      "error while running dashboard \
       backend"
    )
}

fn main() {
  logging::init();
  info!(
    default_filter =
      logging::DEFAULT_DIRECTIVES,
    "starting data status dashboard \
     backend"
  );

  if let Err(err) = run() {
    error!(error = %format!("{err:#}"), "dashboard backend stopped");
    std::process::exit(1);
  }
}
