use serde::{
  Deserialize,
  Serialize
};

/// A monitored data source as it crosses
/// the IPC boundary. The refresh stamp is
/// not part of it; that stays in the
/// frontend.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct TaskDto {
  pub id:         String,
  pub title:      String,
  pub sql_query:  String,
  #[serde(default)]
  pub created_at: Option<String>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct TaskFields {
  pub title:     String,
  pub sql_query: String
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct TaskIdArg {
  pub id: String
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct TaskUpdateArgs {
  pub id:     String,
  pub fields: TaskFields
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
pub struct StoreStatusDto {
  pub configured: bool,
  pub table:      Option<String>
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct UiLogArg {
  pub event:  String,
  pub detail: String
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn task_dto_tolerates_missing_created_at()
  {
    let dto: TaskDto =
      serde_json::from_str(
        r#"{"id":"7","title":"Sales","sql_query":"SELECT 1;"}"#
      )
      .expect("decode task dto");

    assert_eq!(dto.id, "7");
    assert_eq!(dto.created_at, None);
  }

  #[test]
  fn unconfigured_status_is_the_default()
  {
    let status =
      StoreStatusDto::default();
    assert!(!status.configured);
    assert!(status.table.is_none());
  }
}
