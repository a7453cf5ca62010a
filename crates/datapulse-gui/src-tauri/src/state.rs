use anyhow::Context;
use datapulse_core::config::StoreConfig;
use datapulse_core::remote::RemoteStore;
use datapulse_core::{DashboardError, StoredTask, TaskDraft, TaskId};
use datapulse_gui_shared::{StoreStatusDto, TaskDto, TaskFields, TaskUpdateArgs};
use tracing::{debug, instrument, warn};

/// Backend state shared by every command. The store is resolved once at
/// startup; `None` means the dashboard runs in not-configured mode.
pub struct AppState {
    store: Option<RemoteStore>,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        Self::from_config(&StoreConfig::load())
    }

    pub fn from_config(config: &StoreConfig) -> anyhow::Result<Self> {
        let store = if config.is_configured() {
            let store = RemoteStore::new(config).context("failed to build data store client")?;
            Some(store)
        } else {
            warn!("data store URL or key missing; running without a store");
            None
        };
        Ok(Self { store })
    }

    pub fn status(&self) -> StoreStatusDto {
        StoreStatusDto {
            configured: self.store.is_some(),
            table: self.store.as_ref().map(|store| store.table().to_string()),
        }
    }

    fn store(&self) -> anyhow::Result<&RemoteStore> {
        self.store
            .as_ref()
            .ok_or_else(|| DashboardError::ConfigurationMissing.into())
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> anyhow::Result<Vec<TaskDto>> {
        let rows = self.store()?.list().await?;
        debug!(count = rows.len(), "loaded data sources");
        Ok(rows.into_iter().map(StoredTask::into_dto).collect())
    }

    #[instrument(skip(self, fields))]
    pub async fn add(&self, fields: TaskFields) -> anyhow::Result<TaskDto> {
        let draft = TaskDraft::from_fields(&fields)?;
        let created = self.store()?.insert(&draft).await?;
        debug!(id = %created.id, "created data source");
        Ok(created.into_dto())
    }

    #[instrument(skip(self, args), fields(id = %args.id))]
    pub async fn update(&self, args: TaskUpdateArgs) -> anyhow::Result<()> {
        let draft = TaskDraft::from_fields(&args.fields)?;
        self.store()?
            .update(&TaskId::new(args.id), &draft)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: String) -> anyhow::Result<()> {
        self.store()?.delete(&TaskId::new(id)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn unconfigured() -> AppState {
        AppState::from_config(&StoreConfig::default()).expect("state builds")
    }

    #[test]
    fn missing_credentials_report_not_configured() {
        assert_eq!(unconfigured().status(), StoreStatusDto::default());
    }

    #[test]
    fn configured_store_reports_its_table() {
        let state = AppState::from_config(&StoreConfig {
            url: "https://example.supabase.co".to_string(),
            key: "anon".to_string(),
            table: "data_tasks".to_string(),
            timeout: Duration::from_secs(3),
        })
        .expect("state builds");

        let status = state.status();
        assert!(status.configured);
        assert_eq!(status.table.as_deref(), Some("data_tasks"));
    }

    #[tokio::test]
    async fn commands_fail_without_a_store() {
        let err = unconfigured().list().await.expect_err("no store");
        assert_eq!(err.to_string(), "data store is not configured");
    }

    #[tokio::test]
    async fn blank_fields_are_rejected_before_the_store() {
        let err = unconfigured()
            .add(TaskFields {
                title: "  ".to_string(),
                sql_query: "SELECT 1;".to_string(),
            })
            .await
            .expect_err("blank title");
        assert_eq!(err.to_string(), "Please fill in every field.");
    }
}
