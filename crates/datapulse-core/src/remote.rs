//! PostgREST client for the hosted task
//! table.

use reqwest::header::{
  AUTHORIZATION,
  CONTENT_TYPE
};
use reqwest::{
  Client,
  Method,
  RequestBuilder,
  Response,
  StatusCode,
  Url
};
use serde::{
  Deserialize,
  Deserializer,
  Serialize
};
use tracing::{
  debug,
  instrument,
  warn
};

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::store::TaskStore;
use crate::task::{
  StoredTask,
  TaskDraft,
  TaskId,
  parse_store_timestamp
};

const REST_PREFIX: &str = "rest/v1";

#[derive(Debug, Clone)]
pub struct RemoteStore {
  client: Client,
  base:   String,
  table:  String,
  key:    String
}

#[derive(Debug, Deserialize)]
struct TaskRow {
  #[serde(deserialize_with = "opaque_id")]
  id:         String,
  title:      String,
  #[serde(rename = "sqlQuery")]
  sql_query:  String,
  #[serde(rename = "createdAt", default)]
  created_at: Option<String>
}

#[derive(Debug, Serialize)]
struct TaskWrite<'a> {
  title:     &'a str,
  #[serde(rename = "sqlQuery")]
  sql_query: &'a str
}

/// Error body PostgREST sends with non-2xx
/// responses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
  message: Option<String>,
  code:    Option<String>,
  details: Option<String>,
  hint:    Option<String>
}

impl RemoteStore {
  /// Builds a client for a configured
  /// store. Fails only if the store is
  /// not configured or the HTTP client
  /// cannot be built.
  pub fn new(
    config: &StoreConfig
  ) -> anyhow::Result<Self> {
    if !config.is_configured() {
      anyhow::bail!(
        "data store URL and key are \
         required"
      );
    }

    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(anyhow::Error::new)?;

    Ok(Self {
      client,
      base: config
        .url
        .trim()
        .trim_end_matches('/')
        .to_string(),
      table: config.table.clone(),
      key: config.key.clone()
    })
  }

  pub fn table(&self) -> &str {
    &self.table
  }

  fn table_url(
    &self,
    query: &[(&str, &str)]
  ) -> Result<Url, StoreError> {
    let raw = format!(
      "{}/{REST_PREFIX}/{}",
      self.base, self.table
    );
    let mut url =
      Url::parse(&raw).map_err(|err| {
        StoreError::new(format!(
          "invalid data store URL \
           {raw}: {err}"
        ))
      })?;
    if !query.is_empty() {
      let mut pairs =
        url.query_pairs_mut();
      for (key, value) in query {
        pairs.append_pair(key, value);
      }
    }
    Ok(url)
  }

  fn request(
    &self,
    method: Method,
    url: Url
  ) -> RequestBuilder {
    self
      .client
      .request(method, url)
      .header("apikey", &self.key)
      .header(
        AUTHORIZATION,
        format!("Bearer {}", self.key)
      )
  }

  #[instrument(skip(self), fields(table = %self.table))]
  pub async fn list(
    &self
  ) -> Result<Vec<StoredTask>, StoreError>
  {
    let url = self.table_url(&[
      ("select", "*"),
      ("order", "createdAt.asc")
    ])?;
    let body = send(
      self.request(Method::GET, url)
    )
    .await?;

    let rows: Vec<TaskRow> =
      decode(&body)?;
    debug!(rows = rows.len(), "listed task rows");
    Ok(rows.into_iter().map(row_to_task).collect())
  }

  #[instrument(skip(self, draft), fields(table = %self.table, title_len = draft.title().len()))]
  pub async fn insert(
    &self,
    draft: &TaskDraft
  ) -> Result<StoredTask, StoreError> {
    let url = self.table_url(&[])?;
    let payload = encode(&[TaskWrite {
      title:     draft.title(),
      sql_query: draft.sql_query()
    }])?;
    let body = send(
      self
        .request(Method::POST, url)
        .header(
          CONTENT_TYPE,
          "application/json"
        )
        .header(
          "Prefer",
          "return=representation"
        )
        .body(payload)
    )
    .await?;

    let rows: Vec<TaskRow> =
      decode(&body)?;
    rows
      .into_iter()
      .next()
      .map(row_to_task)
      .ok_or_else(|| {
        StoreError::new(
          "data store did not return \
           the created row"
        )
      })
  }

  #[instrument(skip(self, draft), fields(table = %self.table, id = %id))]
  pub async fn update(
    &self,
    id: &TaskId,
    draft: &TaskDraft
  ) -> Result<(), StoreError> {
    let filter = format!("eq.{id}");
    let url = self
      .table_url(&[("id", filter.as_str())])?;
    let payload = encode(&TaskWrite {
      title:     draft.title(),
      sql_query: draft.sql_query()
    })?;
    send(
      self
        .request(Method::PATCH, url)
        .header(
          CONTENT_TYPE,
          "application/json"
        )
        .body(payload)
    )
    .await?;
    Ok(())
  }

  #[instrument(skip(self), fields(table = %self.table, id = %id))]
  pub async fn delete(
    &self,
    id: &TaskId
  ) -> Result<(), StoreError> {
    let filter = format!("eq.{id}");
    let url = self
      .table_url(&[("id", filter.as_str())])?;
    send(
      self.request(Method::DELETE, url)
    )
    .await?;
    Ok(())
  }
}

impl TaskStore for RemoteStore {
  async fn list_tasks(
    &self
  ) -> Result<Vec<StoredTask>, StoreError>
  {
    self.list().await
  }

  async fn insert_task(
    &self,
    draft: &TaskDraft
  ) -> Result<StoredTask, StoreError> {
    self.insert(draft).await
  }

  async fn update_task(
    &self,
    id: &TaskId,
    draft: &TaskDraft
  ) -> Result<(), StoreError> {
    self.update(id, draft).await
  }

  async fn delete_task(
    &self,
    id: &TaskId
  ) -> Result<(), StoreError> {
    self.delete(id).await
  }
}

async fn send(
  request: RequestBuilder
) -> Result<String, StoreError> {
  let response: Response = request
    .send()
    .await
    .map_err(|err| {
      warn!(error = %err, "data store request failed");
      StoreError::new(format!(
        "data store request failed: {err}"
      ))
    })?;

  let status = response.status();
  let body =
    response.text().await.map_err(|err| {
      StoreError::new(format!(
        "failed reading data store \
         response: {err}"
      ))
    })?;

  if status.is_success() {
    return Ok(body);
  }

  warn!(
    status = %status,
    "data store returned non-success \
     status"
  );
  Err(error_from_body(status, &body))
}

fn error_from_body(
  status: StatusCode,
  body: &str
) -> StoreError {
  let parsed = serde_json::from_str::<
    ErrorBody,
  >(body)
  .unwrap_or_default();

  match parsed.message {
    | Some(message)
      if !message.trim().is_empty() =>
    {
      debug!(
        code = ?parsed.code,
        details = ?parsed.details,
        hint = ?parsed.hint,
        "data store error body"
      );
      StoreError::new(message)
    }
    | _ => {
      let trimmed = body.trim();
      if trimmed.is_empty() {
        StoreError::new(format!(
          "data store returned HTTP \
           {status}"
        ))
      } else {
        StoreError::new(format!(
          "data store returned HTTP \
           {status}: {trimmed}"
        ))
      }
    }
  }
}

fn encode<T: Serialize + ?Sized>(
  value: &T
) -> Result<String, StoreError> {
  serde_json::to_string(value).map_err(
    |err| {
      StoreError::new(format!(
        "failed encoding request: {err}"
      ))
    }
  )
}

fn decode<T: serde::de::DeserializeOwned>(
  body: &str
) -> Result<T, StoreError> {
  serde_json::from_str(body).map_err(
    |err| {
      StoreError::new(format!(
        "unexpected data store \
         response: {err}"
      ))
    }
  )
}

fn row_to_task(row: TaskRow) -> StoredTask {
  let created_at =
    row.created_at.as_deref().and_then(
      |raw| {
        let parsed =
          parse_store_timestamp(raw);
        if parsed.is_none() {
          warn!(id = %row.id, raw, "unparseable createdAt from store");
        }
        parsed
      }
    );

  StoredTask {
    id: TaskId::new(row.id),
    title: row.title,
    sql_query: row.sql_query,
    created_at
  }
}

/// Primary keys may be integers or uuids;
/// both are kept as text.
fn opaque_id<'de, D>(
  deserializer: D
) -> Result<String, D::Error>
where
  D: Deserializer<'de>
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum RawId {
    Text(String),
    Number(serde_json::Number)
  }

  Ok(match RawId::deserialize(deserializer)? {
    | RawId::Text(text) => text,
    | RawId::Number(number) => {
      number.to_string()
    }
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rows_accept_numeric_and_text_ids() {
    let rows: Vec<TaskRow> = decode(
      r#"[
        {"id": 12, "title": "Sales", "sqlQuery": "SELECT 1;", "createdAt": "2026-10-19T04:30:00+00:00"},
        {"id": "0b6a3c1e-7d1f-4c55-9f0e-2f1f6c2d9a10", "title": "HR", "sqlQuery": "SELECT 2;"}
      ]"#
    )
    .expect("decode rows");

    let tasks: Vec<StoredTask> = rows
      .into_iter()
      .map(row_to_task)
      .collect();
    assert_eq!(tasks[0].id, TaskId::new("12"));
    assert!(tasks[0].created_at.is_some());
    assert_eq!(
      tasks[1].id.as_str(),
      "0b6a3c1e-7d1f-4c55-9f0e-2f1f6c2d9a10"
    );
    assert_eq!(tasks[1].created_at, None);
  }

  #[test]
  fn error_message_comes_from_body() {
    let err = error_from_body(
      StatusCode::CONFLICT,
      r#"{"code":"23505","message":"duplicate key value violates unique constraint","details":null,"hint":null}"#
    );
    assert_eq!(
      err.message(),
      "duplicate key value violates \
       unique constraint"
    );
  }

  #[test]
  fn error_without_json_keeps_status_and_text()
  {
    let err = error_from_body(
      StatusCode::BAD_GATEWAY,
      "upstream down"
    );
    assert_eq!(
      err.message(),
      "data store returned HTTP 502 Bad \
       Gateway: upstream down"
    );

    let err = error_from_body(
      StatusCode::UNAUTHORIZED,
      ""
    );
    assert_eq!(
      err.message(),
      "data store returned HTTP 401 \
       Unauthorized"
    );
  }

  #[test]
  fn unconfigured_settings_build_no_client()
  {
    assert!(
      RemoteStore::new(
        &StoreConfig::default()
      )
      .is_err()
    );
  }

  #[test]
  fn table_url_trims_trailing_slash() {
    let store = RemoteStore::new(
      &StoreConfig {
        url: "https://db.example.test/"
          .to_string(),
        key: "k".to_string(),
        ..StoreConfig::default()
      }
    )
    .expect("client");

    let url = store
      .table_url(&[("id", "eq.7")])
      .expect("url");
    assert_eq!(
      url.as_str(),
      "https://db.example.test/rest/v1/data_tasks?id=eq.7"
    );
  }
}
