use datapulse_gui_shared::UiLogArg;
use tracing::{
  info,
  instrument
};

#[tauri::command]
#[instrument(fields(request_id = ?request_id, event = %args.event))]
pub async fn ui_log(
  args: UiLogArg,
  request_id: Option<String>
) -> Result<(), String> {
  info!(request_id = ?request_id, event = %args.event, detail = %args.detail, "ui interaction");
  Ok(())
}
