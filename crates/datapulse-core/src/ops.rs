//! Store-backed operations on the board.
//!
//! Every mutation writes to the store
//! first and dispatches the matching
//! [`BoardAction`] only after the store
//! confirmed it. Nothing here touches
//! the board directly; the caller supplies
//! `dispatch`.

use std::time::Duration;

use chrono::{
  DateTime,
  Utc
};
use tracing::{
  debug,
  error,
  info,
  instrument
};

use crate::board::BoardAction;
use crate::error::DashboardError;
use crate::store::TaskStore;
use crate::task::{
  DataTask,
  TaskDraft,
  TaskId
};

pub const REFRESH_DELAY_MIN: Duration =
  Duration::from_millis(500);
pub const REFRESH_DELAY_SPAN: Duration =
  Duration::from_millis(1_000);

/// Maps a uniform sample from `[0, 1)`
/// onto the refresh delay window
/// `[500ms, 1500ms)`. Out-of-range samples
/// are clamped into the window.
pub fn refresh_delay(
  unit: f64
) -> Duration {
  let unit = if unit.is_finite() {
    unit.clamp(0.0, 1.0)
  } else {
    0.0
  };
  let delay = REFRESH_DELAY_MIN
    + REFRESH_DELAY_SPAN.mul_f64(unit);
  delay.min(
    REFRESH_DELAY_MIN
      + REFRESH_DELAY_SPAN
      - Duration::from_millis(1)
  )
}

/// Source of the simulated refresh delay.
#[allow(async_fn_in_trait)]
pub trait RefreshPacer {
  fn next_delay(&self) -> Duration;

  async fn pause(&self, delay: Duration);
}

/// Initial bulk load. Without a store the
/// board is marked unavailable and nothing
/// is called. A failed listing is logged
/// and leaves the board empty.
#[instrument(skip_all)]
pub async fn load_tasks<S>(
  store: Option<&S>,
  dispatch: impl Fn(BoardAction)
) where
  S: TaskStore
{
  let Some(store) = store else {
    info!(
      "data store not configured; \
       skipping initial load"
    );
    dispatch(
      BoardAction::StoreUnavailable
    );
    return;
  };

  dispatch(BoardAction::LoadStarted);
  match store.list_tasks().await {
    | Ok(rows) => {
      info!(
        tasks = rows.len(),
        "loaded tasks from store"
      );
      dispatch(BoardAction::Loaded(rows));
    }
    | Err(err) => {
      // Silent to the operator; only the
      // log records it.
      error!(
        error = %err,
        "failed loading tasks; showing \
         an empty board"
      );
      dispatch(BoardAction::LoadFailed);
    }
  }
}

/// Simulated refresh: waits out a random
/// delay and stamps the task with the time
/// read from `clock` afterwards. No query
/// is executed.
#[instrument(skip_all, fields(id = %task.id))]
pub async fn refresh_task<P>(
  task: &DataTask,
  pacer: &P,
  clock: impl Fn() -> DateTime<Utc>,
  dispatch: impl Fn(BoardAction)
) where
  P: RefreshPacer
{
  let id = task.id.clone();
  dispatch(BoardAction::RefreshStarted(
    id.clone()
  ));

  debug!(
    query = %task.sql_query,
    "simulating query for refresh"
  );
  let delay = pacer.next_delay();
  pacer.pause(delay).await;

  let at = clock();
  debug!(
    delay_ms = delay.as_millis() as u64,
    at = %at,
    "refresh finished"
  );
  dispatch(BoardAction::RefreshFinished {
    id,
    at
  });
}

#[instrument(skip_all)]
pub async fn add_task<S>(
  store: Option<&S>,
  title: &str,
  sql_query: &str,
  dispatch: impl Fn(BoardAction)
) -> Result<(), DashboardError>
where
  S: TaskStore
{
  let draft =
    TaskDraft::parse(title, sql_query)?;
  let store = store.ok_or(
    DashboardError::ConfigurationMissing
  )?;

  let created =
    store.insert_task(&draft).await?;
  info!(id = %created.id, "task added");
  dispatch(BoardAction::Added(created));
  Ok(())
}

#[instrument(skip_all, fields(id = %id))]
pub async fn update_task<S>(
  store: Option<&S>,
  id: &TaskId,
  title: &str,
  sql_query: &str,
  dispatch: impl Fn(BoardAction)
) -> Result<(), DashboardError>
where
  S: TaskStore
{
  let draft =
    TaskDraft::parse(title, sql_query)?;
  let store = store.ok_or(
    DashboardError::ConfigurationMissing
  )?;

  store.update_task(id, &draft).await?;
  info!("task updated");
  dispatch(BoardAction::Updated {
    id: id.clone(),
    draft
  });
  Ok(())
}

#[instrument(skip_all, fields(id = %id))]
pub async fn delete_task<S>(
  store: Option<&S>,
  id: &TaskId,
  dispatch: impl Fn(BoardAction)
) -> Result<(), DashboardError>
where
  S: TaskStore
{
  let store = store.ok_or(
    DashboardError::ConfigurationMissing
  )?;

  store.delete_task(id).await?;
  info!("task deleted");
  dispatch(BoardAction::Deleted(
    id.clone()
  ));
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn delay_window_is_half_open() {
    assert_eq!(
      refresh_delay(0.0),
      Duration::from_millis(500)
    );
    assert_eq!(
      refresh_delay(0.5),
      Duration::from_millis(1_000)
    );
    assert!(
      refresh_delay(1.0)
        < Duration::from_millis(1_500)
    );
    assert!(
      refresh_delay(0.999_999)
        < Duration::from_millis(1_500)
    );
  }

  #[test]
  fn bad_samples_are_clamped() {
    assert_eq!(
      refresh_delay(-3.0),
      Duration::from_millis(500)
    );
    assert_eq!(
      refresh_delay(f64::NAN),
      Duration::from_millis(500)
    );
    assert!(
      refresh_delay(7.0)
        < Duration::from_millis(1_500)
    );
  }
}
