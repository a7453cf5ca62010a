//! Domain model and state container for
//! the data status dashboard.
//!
//! Everything here is free of UI and
//! transport concerns so the same logic
//! drives the wasm frontend and the host
//! tests. The `remote` feature adds the
//! configuration loader and the PostgREST
//! client used by the desktop backend.

pub mod board;
pub mod error;
pub mod format;
pub mod ops;
pub mod store;
pub mod task;
pub mod theme;

#[cfg(feature = "remote")]
pub mod config;
#[cfg(feature = "remote")]
pub mod remote;

pub use board::{
  Board,
  BoardAction,
  MainContent,
  ViewMode
};
pub use error::{
  DashboardError,
  StoreError
};
pub use store::TaskStore;
pub use task::{
  DataTask,
  StoredTask,
  TaskDraft,
  TaskId
};
pub use theme::Theme;
