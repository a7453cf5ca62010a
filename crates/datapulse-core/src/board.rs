//! The dashboard's state container.
//!
//! [`Board`] is owned by the root shell
//! and changes only through
//! [`Board::apply`]; each action is one
//! whole step, so interleaved async work
//! never observes a half-applied change.

use std::collections::BTreeSet;

use chrono::{
  DateTime,
  Utc
};
use tracing::{
  debug,
  warn
};

use crate::task::{
  DataTask,
  StoredTask,
  TaskDraft,
  TaskId
};
use crate::theme::Theme;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub enum ViewMode {
  #[default]
  Dashboard,
  Management
}

impl ViewMode {
  pub fn toggled(self) -> Self {
    match self {
      | Self::Dashboard => {
        Self::Management
      }
      | Self::Management => {
        Self::Dashboard
      }
    }
  }

  /// Label of the header button that
  /// leaves this view.
  pub fn toggle_label(
    self
  ) -> &'static str {
    match self {
      | Self::Dashboard => {
        "Manage data sources"
      }
      | Self::Management => {
        "Back to dashboard"
      }
    }
  }
}

/// What the main area shows.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum MainContent {
  NotConfigured,
  Loading,
  Dashboard,
  Management
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoardAction {
  /// The store has no credentials; stay
  /// empty for the rest of the session.
  StoreUnavailable,
  LoadStarted,
  Loaded(Vec<StoredTask>),
  LoadFailed,
  RefreshStarted(TaskId),
  RefreshFinished {
    id: TaskId,
    at: DateTime<Utc>
  },
  Added(StoredTask),
  Updated {
    id:    TaskId,
    draft: TaskDraft
  },
  Deleted(TaskId),
  ToggleTheme,
  ToggleView
}

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
  configured: bool,
  loading:    bool,
  tasks:      Vec<DataTask>,
  refreshing: BTreeSet<TaskId>,
  view:       ViewMode,
  theme:      Theme
}

impl Board {
  /// A board waiting for the store
  /// status. It reports `Loading` until
  /// told otherwise.
  pub fn new(theme: Theme) -> Self {
    Self {
      configured: false,
      loading: true,
      tasks: Vec::new(),
      refreshing: BTreeSet::new(),
      view: ViewMode::default(),
      theme
    }
  }

  pub fn tasks(&self) -> &[DataTask] {
    &self.tasks
  }

  pub fn task(
    &self,
    id: &TaskId
  ) -> Option<&DataTask> {
    self
      .tasks
      .iter()
      .find(|task| &task.id == id)
  }

  pub fn is_refreshing(
    &self,
    id: &TaskId
  ) -> bool {
    self.refreshing.contains(id)
  }

  pub fn refreshing_count(
    &self
  ) -> usize {
    self.refreshing.len()
  }

  pub fn refreshing_ids(
    &self
  ) -> &BTreeSet<TaskId> {
    &self.refreshing
  }

  pub fn is_loading(&self) -> bool {
    self.loading
  }

  pub fn is_configured(&self) -> bool {
    self.configured
  }

  pub fn view(&self) -> ViewMode {
    self.view
  }

  pub fn theme(&self) -> Theme {
    self.theme
  }

  /// The view toggle only makes sense
  /// once there is a store to manage.
  pub fn shows_view_toggle(
    &self
  ) -> bool {
    self.configured
  }

  pub fn main_content(
    &self
  ) -> MainContent {
    if self.loading {
      return MainContent::Loading;
    }
    if !self.configured {
      return MainContent::NotConfigured;
    }
    match self.view {
      | ViewMode::Dashboard => {
        MainContent::Dashboard
      }
      | ViewMode::Management => {
        MainContent::Management
      }
    }
  }

  pub fn apply(
    &mut self,
    action: BoardAction
  ) {
    match action {
      | BoardAction::StoreUnavailable => {
        self.configured = false;
        self.loading = false;
        self.tasks.clear();
        self.refreshing.clear();
      }
      | BoardAction::LoadStarted => {
        self.configured = true;
        self.loading = true;
      }
      | BoardAction::Loaded(rows) => {
        self.tasks =
          dedupe_rows(rows);
        self.loading = false;
        debug!(
          tasks = self.tasks.len(),
          "board loaded"
        );
      }
      | BoardAction::LoadFailed => {
        self.tasks.clear();
        self.loading = false;
      }
      | BoardAction::RefreshStarted(
        id
      ) => {
        self.refreshing.insert(id);
      }
      | BoardAction::RefreshFinished {
        id,
        at
      } => {
        if let Some(task) = self
          .tasks
          .iter_mut()
          .find(|task| task.id == id)
        {
          task.last_updated = Some(at);
        } else {
          debug!(
            id = %id,
            "refresh finished for a \
             task that is gone"
          );
        }
        self.refreshing.remove(&id);
      }
      | BoardAction::Added(stored) => {
        let task =
          DataTask::from(stored);
        if let Some(existing) = self
          .tasks
          .iter_mut()
          .find(|t| t.id == task.id)
        {
          warn!(
            id = %task.id,
            "store returned an id that \
             is already on the board"
          );
          *existing = task;
        } else {
          self.tasks.push(task);
        }
      }
      | BoardAction::Updated {
        id,
        draft
      } => {
        if let Some(task) = self
          .tasks
          .iter_mut()
          .find(|task| task.id == id)
        {
          task.title =
            draft.title().to_string();
          task.sql_query = draft
            .sql_query()
            .to_string();
        }
      }
      | BoardAction::Deleted(id) => {
        self
          .tasks
          .retain(|task| task.id != id);
        self.refreshing.remove(&id);
      }
      | BoardAction::ToggleTheme => {
        self.theme =
          self.theme.toggled();
      }
      | BoardAction::ToggleView => {
        self.view = self.view.toggled();
      }
    }
  }
}

fn dedupe_rows(
  rows: Vec<StoredTask>
) -> Vec<DataTask> {
  let mut seen = BTreeSet::new();
  let mut tasks =
    Vec::with_capacity(rows.len());
  for row in rows {
    if !seen.insert(row.id.clone()) {
      warn!(
        id = %row.id,
        "dropping duplicate task id \
         from store listing"
      );
      continue;
    }
    tasks.push(DataTask::from(row));
  }
  tasks
}
