use crate::error::StoreError;
use crate::task::{
  StoredTask,
  TaskDraft,
  TaskId
};

/// Row-level access to the monitored task
/// table.
///
/// Implemented by the PostgREST client in
/// the desktop backend and by the IPC
/// bridge in the frontend. Futures are not
/// required to be `Send`: the frontend runs
/// on a single-threaded event loop.
#[allow(async_fn_in_trait)]
pub trait TaskStore {
  /// All tasks, oldest `createdAt` first.
  async fn list_tasks(
    &self
  ) -> Result<Vec<StoredTask>, StoreError>;

  /// Inserts a row and returns it with
  /// the store-assigned id and
  /// `createdAt`.
  async fn insert_task(
    &self,
    draft: &TaskDraft
  ) -> Result<StoredTask, StoreError>;

  async fn update_task(
    &self,
    id: &TaskId,
    draft: &TaskDraft
  ) -> Result<(), StoreError>;

  async fn delete_task(
    &self,
    id: &TaskId
  ) -> Result<(), StoreError>;
}
