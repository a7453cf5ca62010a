use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use datapulse_gui_shared::{TaskDto, TaskFields};
use tracing::warn;

use crate::error::DashboardError;

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in every field.";

/// Store-assigned identifier. Kept as an opaque string whatever the
/// backing column type is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A task row exactly as the store knows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTask {
    pub id: TaskId,
    pub title: String,
    pub sql_query: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl StoredTask {
    pub fn into_dto(self) -> TaskDto {
        TaskDto {
            id: self.id.0,
            title: self.title,
            sql_query: self.sql_query,
            created_at: self.created_at.map(|at| at.to_rfc3339()),
        }
    }

    pub fn from_dto(dto: TaskDto) -> Self {
        let created_at = dto.created_at.as_deref().and_then(|raw| {
            let parsed = parse_store_timestamp(raw);
            if parsed.is_none() {
                warn!(id = %dto.id, raw, "ignoring unparseable createdAt");
            }
            parsed
        });

        Self {
            id: TaskId(dto.id),
            title: dto.title,
            sql_query: dto.sql_query,
            created_at,
        }
    }
}

/// A monitored data source together with its per-session refresh stamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTask {
    pub id: TaskId,
    pub title: String,
    pub sql_query: String,
    pub created_at: Option<DateTime<Utc>>,
    /// `None` until refreshed in this session. Never persisted.
    pub last_updated: Option<DateTime<Utc>>,
}

impl From<StoredTask> for DataTask {
    fn from(stored: StoredTask) -> Self {
        Self {
            id: stored.id,
            title: stored.title,
            sql_query: stored.sql_query,
            created_at: stored.created_at,
            last_updated: None,
        }
    }
}

/// Validated title and query for add/edit. Both must contain something
/// other than whitespace; the text itself is kept as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    sql_query: String,
}

impl TaskDraft {
    pub fn parse(title: &str, sql_query: &str) -> Result<Self, DashboardError> {
        if title.trim().is_empty() || sql_query.trim().is_empty() {
            return Err(DashboardError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
        }

        Ok(Self {
            title: title.to_string(),
            sql_query: sql_query.to_string(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sql_query(&self) -> &str {
        &self.sql_query
    }

    pub fn to_fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            sql_query: self.sql_query.clone(),
        }
    }

    pub fn from_fields(fields: &TaskFields) -> Result<Self, DashboardError> {
        Self::parse(&fields.title, &fields.sql_query)
    }
}

/// Accepts RFC 3339 (what a `timestamptz` column returns) and the bare
/// `timestamp` form, which is read as UTC.
pub fn parse_store_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
