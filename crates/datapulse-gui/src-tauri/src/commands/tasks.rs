use datapulse_gui_shared::{
  StoreStatusDto,
  TaskDto,
  TaskFields,
  TaskIdArg,
  TaskUpdateArgs
};
use tauri::State;
use tracing::{
  error,
  info,
  instrument
};

use super::err_to_string;
use crate::state::AppState;

#[tauri::command]
#[instrument(skip(state), fields(request_id = ?request_id))]
pub async fn store_status(
  state: State<'_, AppState>,
  request_id: Option<String>
) -> Result<StoreStatusDto, String> {
  let status = state.status();
  info!(
    request_id = ?request_id,
    configured = status.configured,
    table = ?status.table,
    "store_status command invoked"
  );
  Ok(status)
}

#[tauri::command]
#[instrument(skip(state), fields(request_id = ?request_id))]
pub async fn tasks_list(
  state: State<'_, AppState>,
  request_id: Option<String>
) -> Result<Vec<TaskDto>, String> {
  info!(request_id = ?request_id, "tasks_list command invoked");
  let result = state.list().await;
  if let Err(err) = result.as_ref() {
    error!(request_id = ?request_id, error = %err, "tasks_list command failed");
  }
  result.map_err(err_to_string)
}

#[tauri::command]
#[instrument(skip(state, args), fields(request_id = ?request_id, title_len = args.title.len(), sql_len = args.sql_query.len()))]
pub async fn task_add(
  state: State<'_, AppState>,
  args: TaskFields,
  request_id: Option<String>
) -> Result<TaskDto, String> {
  info!(
    request_id = ?request_id,
    title_len = args.title.len(),
    sql_len = args.sql_query.len(),
    "task_add command invoked"
  );
  let result = state.add(args).await;
  if let Err(err) = result.as_ref() {
    error!(request_id = ?request_id, error = %err, "task_add command failed");
  }
  result.map_err(err_to_string)
}

#[tauri::command]
#[instrument(skip(state, args), fields(request_id = ?request_id, id = %args.id))]
pub async fn task_update(
  state: State<'_, AppState>,
  args: TaskUpdateArgs,
  request_id: Option<String>
) -> Result<(), String> {
  info!(request_id = ?request_id, id = %args.id, "task_update command invoked");
  let result = state.update(args).await;
  if let Err(err) = result.as_ref() {
    error!(request_id = ?request_id, error = %err, "task_update command failed");
  }
  result.map_err(err_to_string)
}

#[tauri::command]
#[instrument(skip(state), fields(request_id = ?request_id, id = %args.id))]
pub async fn task_delete(
  state: State<'_, AppState>,
  args: TaskIdArg,
  request_id: Option<String>
) -> Result<(), String> {
  info!(request_id = ?request_id, id = %args.id, "task_delete command invoked");
  let result = state.delete(args.id).await;
  if let Err(err) = result.as_ref() {
    error!(request_id = ?request_id, error = %err, "task_delete command failed");
  }
  result.map_err(err_to_string)
}
