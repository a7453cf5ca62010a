use thiserror::Error;

/// Failure reported by the remote row
/// store, carrying its human-readable
/// message.
#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
#[error("{message}")]
pub struct StoreError {
  message: String
}

impl StoreError {
  pub fn new(
    message: impl Into<String>
  ) -> Self {
    Self {
      message: message.into()
    }
  }

  pub fn message(&self) -> &str {
    &self.message
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
pub enum DashboardError {
  /// Store credentials are absent. This
  /// is a permanent operating mode, not
  /// something to retry.
  #[error(
    "data store is not configured"
  )]
  ConfigurationMissing,

  #[error(transparent)]
  Store(#[from] StoreError),

  /// A required form field was empty.
  #[error("{0}")]
  Validation(String)
}

impl DashboardError {
  /// Text for the blocking notice shown to
  /// the operator.
  pub fn alert_text(
    &self,
    action: &str
  ) -> String {
    match self {
      | Self::Validation(message) => {
        message.clone()
      }
      | Self::ConfigurationMissing => {
        format!(
          "Cannot {action}: the data \
           store is not configured."
        )
      }
      | Self::Store(err) => {
        format!(
          "Cannot {action}: {err}"
        )
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn store_error_displays_backend_message()
  {
    let err = DashboardError::from(
      StoreError::new(
        "duplicate key value"
      )
    );
    assert_eq!(
      err.to_string(),
      "duplicate key value"
    );
    assert_eq!(
      err.alert_text("add data source"),
      "Cannot add data source: \
       duplicate key value"
    );
  }

  #[test]
  fn validation_alert_is_the_bare_message()
  {
    let err = DashboardError::Validation(
      "Please fill in every field."
        .to_string()
    );
    assert_eq!(
      err.alert_text("save"),
      "Please fill in every field."
    );
  }
}
