use std::time::Duration;

use datapulse_core::ops::{
  RefreshPacer,
  refresh_delay
};
use datapulse_core::{
  StoreError,
  StoredTask,
  TaskDraft,
  TaskId,
  TaskStore
};
use datapulse_gui_shared::{
  StoreStatusDto,
  TaskDto,
  TaskIdArg,
  TaskUpdateArgs,
  UiLogArg
};
use gloo::timers::future::TimeoutFuture;
use serde::{
  Serialize,
  de::DeserializeOwned
};
use tauri_wasm::{
  args,
  invoke
};
use uuid::Uuid;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CommandPayload<'a, A> {
  args:       &'a A,
  request_id: String
}

pub async fn invoke_tauri<R, A>(
  cmd: &str,
  args_payload: &A
) -> Result<R, String>
where
  R: DeserializeOwned,
  A: Serialize
{
  let request_id =
    Uuid::new_v4().to_string();
  tracing::debug!(
    cmd,
    request_id = %request_id,
    "invoking backend command"
  );

  let payload = args(&CommandPayload {
    args: args_payload,
    request_id
  })
  .map_err(|e| {
    format!("failed to encode args: {e}")
  })?;
  let value = invoke(cmd)
    .with_args(payload)
    .await
    .map_err(|e| {
      ipc_error_text(&format!("{e:?}"))
    })?;

  serde_wasm_bindgen::from_value(value)
    .map_err(|e| {
      format!("decode error: {e}")
    })
}

/// Pulls the backend's error string out of
/// a debug-printed promise rejection. Tauri
/// rejects with the command's `Err` string,
/// which wasm-bindgen prints unescaped as
/// `JsValue("...")`. Anything else is kept
/// whole.
fn ipc_error_text(raw: &str) -> String {
  const OPEN: &str = "JsValue(\"";
  const CLOSE: &str = "\")";

  raw
    .find(OPEN)
    .map(|start| &raw[start + OPEN.len()..])
    .and_then(|rest| {
      rest
        .rfind(CLOSE)
        .map(|end| rest[..end].to_string())
    })
    .unwrap_or_else(|| raw.to_string())
}

pub async fn store_status()
-> Result<StoreStatusDto, String> {
  invoke_tauri("store_status", &()).await
}

/// Forwards a UI interaction to the backend
/// log. Failures are only traced locally.
pub fn ui_log(event: &str, detail: &str) {
  let arg = UiLogArg {
    event:  event.to_string(),
    detail: detail.to_string()
  };
  wasm_bindgen_futures::spawn_local(
    async move {
      if let Err(err) =
        invoke_tauri::<(), _>(
          "ui_log", &arg
        )
        .await
      {
        tracing::warn!(
          error = %err,
          "ui_log forwarding failed"
        );
      }
    }
  );
}

/// Task store backed by the desktop
/// backend's IPC commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct TauriTaskStore;

impl TaskStore for TauriTaskStore {
  async fn list_tasks(
    &self
  ) -> Result<Vec<StoredTask>, StoreError>
  {
    let rows = invoke_tauri::<
      Vec<TaskDto>,
      _
    >("tasks_list", &())
    .await
    .map_err(StoreError::new)?;
    Ok(
      rows
        .into_iter()
        .map(StoredTask::from_dto)
        .collect()
    )
  }

  async fn insert_task(
    &self,
    draft: &TaskDraft
  ) -> Result<StoredTask, StoreError> {
    invoke_tauri::<TaskDto, _>(
      "task_add",
      &draft.to_fields()
    )
    .await
    .map(StoredTask::from_dto)
    .map_err(StoreError::new)
  }

  async fn update_task(
    &self,
    id: &TaskId,
    draft: &TaskDraft
  ) -> Result<(), StoreError> {
    let args = TaskUpdateArgs {
      id:     id.as_str().to_string(),
      fields: draft.to_fields()
    };
    invoke_tauri::<(), _>(
      "task_update",
      &args
    )
    .await
    .map_err(StoreError::new)
  }

  async fn delete_task(
    &self,
    id: &TaskId
  ) -> Result<(), StoreError> {
    let args = TaskIdArg {
      id: id.as_str().to_string()
    };
    invoke_tauri::<(), _>(
      "task_delete",
      &args
    )
    .await
    .map_err(StoreError::new)
  }
}

/// Refresh pacing on the browser event
/// loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserPacer;

impl RefreshPacer for BrowserPacer {
  fn next_delay(&self) -> Duration {
    refresh_delay(js_sys::Math::random())
  }

  async fn pause(
    &self,
    delay: Duration
  ) {
    let millis =
      u32::try_from(delay.as_millis())
        .unwrap_or(u32::MAX);
    TimeoutFuture::new(millis).await;
  }
}
