//! Flow persistence — completion flags and collected answers.
//!
//! Each flow owns two independent keys (`<flow>_completed` and
//! `<flow>_data`); there is no transaction across them. Completion writes
//! data before the flag, so a crash in between re-runs the flow on the
//! next launch instead of losing the gate.

use std::sync::Arc;

use tracing::warn;

use crate::error::StorageError;
use crate::flow::{CollectedData, Flow, FlowDefinition};
use crate::store::traits::SettingsStore;

/// Persisted completion flag value; the store keeps string values only.
const FLAG_TRUE: &str = "true";

/// Reads and writes a flow's persisted state on top of a [`SettingsStore`].
#[derive(Clone)]
pub struct FlowStore {
    store: Arc<dyn SettingsStore>,
}

impl FlowStore {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    /// Whether the flow was completed. Read failures count as not
    /// completed and are logged, never surfaced.
    pub async fn completed(&self, flow: Flow) -> bool {
        match self.store.get(&flow.completed_key()).await {
            Ok(Some(value)) => value == FLAG_TRUE,
            Ok(None) => false,
            Err(e) => {
                warn!(%flow, error = %e, "Completion flag read failed");
                false
            }
        }
    }

    /// Mark the flow completed. Write failures surface to the caller, who
    /// decides whether to retry.
    pub async fn set_completed(&self, flow: Flow) -> Result<(), StorageError> {
        self.store.set(&flow.completed_key(), FLAG_TRUE).await
    }

    /// Persist collected answers as JSON. Dates are written as RFC 3339
    /// strings. Fails loudly on storage errors.
    pub async fn write_data(&self, flow: Flow, data: &CollectedData) -> Result<(), StorageError> {
        let json = serde_json::to_string(&data.to_json())
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set(&flow.data_key(), &json).await
    }

    /// Read back collected answers, retyping each entry from the flow
    /// definition. A missing key or unparsable payload reads as absent.
    pub async fn read_data(&self, definition: &FlowDefinition) -> Option<CollectedData> {
        let flow = definition.flow;
        let raw = match self.store.get(&flow.data_key()).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(%flow, error = %e, "Collected data read failed");
                return None;
            }
        };
        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(json) => match CollectedData::from_json(definition, &json) {
                Some(data) => Some(data),
                None => {
                    warn!(%flow, "Collected data is not a JSON object");
                    None
                }
            },
            Err(e) => {
                warn!(%flow, error = %e, "Collected data is not valid JSON");
                None
            }
        }
    }

    /// Delete both the flag and the data key. Support/testing tool.
    pub async fn reset(&self, flow: Flow) -> Result<(), StorageError> {
        self.store.delete(&flow.data_key()).await?;
        self.store.delete(&flow.completed_key()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::flow::{FieldValue, catalog};
    use crate::store::LibSqlStore;

    async fn flow_store() -> (FlowStore, Arc<dyn SettingsStore>) {
        let store: Arc<dyn SettingsStore> = Arc::new(LibSqlStore::new_memory().await.unwrap());
        (FlowStore::new(Arc::clone(&store)), store)
    }

    #[tokio::test]
    async fn completed_defaults_to_false() {
        let (flow_store, _) = flow_store().await;
        assert!(!flow_store.completed(Flow::Onboarding).await);
        assert!(!flow_store.completed(Flow::UserInfo).await);
    }

    #[tokio::test]
    async fn set_completed_writes_the_documented_key() {
        let (flow_store, store) = flow_store().await;

        flow_store.set_completed(Flow::UserInfo).await.unwrap();

        assert!(flow_store.completed(Flow::UserInfo).await);
        assert_eq!(
            store.get("user_info_completed").await.unwrap(),
            Some("true".to_string())
        );
        // The other flow is untouched.
        assert!(!flow_store.completed(Flow::Onboarding).await);
    }

    #[tokio::test]
    async fn data_round_trips_with_dates_reconstructed() {
        let (flow_store, _) = flow_store().await;
        let definition = catalog::user_info();

        let birthday = Utc.with_ymd_and_hms(1990, 4, 2, 0, 0, 0).unwrap();
        let mut data = CollectedData::new();
        data.insert("name", FieldValue::Text("Ada".to_string()));
        data.insert("birth_date", FieldValue::Date(birthday));
        data.insert(
            "interests",
            FieldValue::Selections(vec!["sleep".to_string()]),
        );

        flow_store.write_data(Flow::UserInfo, &data).await.unwrap();
        let restored = flow_store.read_data(&definition).await.unwrap();

        assert_eq!(restored, data);
        assert!(matches!(
            restored.get("birth_date"),
            Some(FieldValue::Date(dt)) if *dt == birthday
        ));
    }

    #[tokio::test]
    async fn read_data_absent_on_missing_or_garbage() {
        let (flow_store, store) = flow_store().await;
        let definition = catalog::user_info();

        assert!(flow_store.read_data(&definition).await.is_none());

        store.set("user_info_data", "not json").await.unwrap();
        assert!(flow_store.read_data(&definition).await.is_none());

        store.set("user_info_data", "[1, 2]").await.unwrap();
        assert!(flow_store.read_data(&definition).await.is_none());
    }

    #[tokio::test]
    async fn reset_clears_flag_and_data() {
        let (flow_store, store) = flow_store().await;
        let definition = catalog::user_info();

        let mut data = CollectedData::new();
        data.insert("name", FieldValue::Text("Ada".to_string()));
        flow_store.write_data(Flow::UserInfo, &data).await.unwrap();
        flow_store.set_completed(Flow::UserInfo).await.unwrap();

        flow_store.reset(Flow::UserInfo).await.unwrap();

        assert!(!flow_store.completed(Flow::UserInfo).await);
        assert!(flow_store.read_data(&definition).await.is_none());
        assert_eq!(store.get("user_info_data").await.unwrap(), None);
    }

    #[tokio::test]
    async fn read_failures_count_as_not_completed() {
        struct FailingStore;

        #[async_trait::async_trait]
        impl SettingsStore for FailingStore {
            async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
                Err(StorageError::Backend("store unavailable".to_string()))
            }
            async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
                Err(StorageError::Backend("store unavailable".to_string()))
            }
            async fn delete(&self, _key: &str) -> Result<bool, StorageError> {
                Err(StorageError::Backend("store unavailable".to_string()))
            }
        }

        let flow_store = FlowStore::new(Arc::new(FailingStore));
        let definition = catalog::user_info();

        assert!(!flow_store.completed(Flow::UserInfo).await);
        assert!(flow_store.read_data(&definition).await.is_none());
        // Writes surface their failure.
        assert!(flow_store.set_completed(Flow::UserInfo).await.is_err());
    }
}
