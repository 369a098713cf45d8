//! Completion gate — decides whether a flow should be shown at startup.

use tokio::sync::RwLock;
use tracing::info;

use crate::error::StorageError;
use crate::flow::{CollectedData, Flow};
use crate::store::FlowStore;

/// Gate readiness: unknown until the first read resolves, then definitely
/// complete or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
    Loading,
    Complete,
    Incomplete,
}

/// Per-flow completion query consulted by the app's root router.
///
/// The feature switch is checked before any storage read: a disabled flow
/// reports complete from construction and never touches the store. Enabled
/// flows resolve once via [`load`](Self::load) and keep an in-memory
/// mirror afterwards; storage is not re-read unless the process restarts
/// or [`reset`](Self::reset) runs.
pub struct CompletionGate {
    flow: Flow,
    enabled: bool,
    store: FlowStore,
    status: RwLock<GateStatus>,
}

impl CompletionGate {
    pub fn new(flow: Flow, enabled: bool, store: FlowStore) -> Self {
        let initial = if enabled {
            GateStatus::Loading
        } else {
            GateStatus::Complete
        };
        Self {
            flow,
            enabled,
            store,
            status: RwLock::new(initial),
        }
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }

    pub async fn status(&self) -> GateStatus {
        *self.status.read().await
    }

    /// `None` until the first read resolves.
    pub async fn is_complete(&self) -> Option<bool> {
        match self.status().await {
            GateStatus::Loading => None,
            GateStatus::Complete => Some(true),
            GateStatus::Incomplete => Some(false),
        }
    }

    pub async fn is_loading(&self) -> bool {
        self.status().await == GateStatus::Loading
    }

    /// Resolve the gate from storage. Read failures count as not completed
    /// and are logged inside the store; they never surface here.
    pub async fn load(&self) -> GateStatus {
        if !self.enabled {
            return GateStatus::Complete;
        }
        let completed = self.store.completed(self.flow).await;
        let mut status = self.status.write().await;
        *status = if completed {
            GateStatus::Complete
        } else {
            GateStatus::Incomplete
        };
        *status
    }

    /// Mark the flow complete without recording answers (the skip path and
    /// flag-only flows). Write failures surface to the caller and leave
    /// the in-memory status untouched.
    pub async fn mark_complete(&self) -> Result<(), StorageError> {
        self.store.set_completed(self.flow).await?;
        *self.status.write().await = GateStatus::Complete;
        Ok(())
    }

    /// Record answers, then the completion flag. The two writes are not
    /// transactional: a failure after the data write leaves the flow
    /// gated, so it runs again on the next launch instead of losing the
    /// gate.
    pub async fn complete_with_data(&self, data: &CollectedData) -> Result<(), StorageError> {
        self.store.write_data(self.flow, data).await?;
        self.store.set_completed(self.flow).await?;
        *self.status.write().await = GateStatus::Complete;
        Ok(())
    }

    /// Clear persisted state and re-arm the gate. Support/testing tool.
    pub async fn reset(&self) -> Result<(), StorageError> {
        self.store.reset(self.flow).await?;
        let mut status = self.status.write().await;
        *status = if self.enabled {
            GateStatus::Incomplete
        } else {
            GateStatus::Complete
        };
        info!(flow = %self.flow, "Flow state reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::flow::FieldValue;
    use crate::store::{LibSqlStore, SettingsStore};

    /// Counts every storage call; used to prove the disabled-gate bypass.
    #[derive(Default)]
    struct CountingStore {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl SettingsStore for CountingStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }
        async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
        async fn delete(&self, _key: &str) -> Result<bool, StorageError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(false)
        }
    }

    async fn memory_flow_store() -> FlowStore {
        let store: Arc<dyn SettingsStore> = Arc::new(LibSqlStore::new_memory().await.unwrap());
        FlowStore::new(store)
    }

    #[tokio::test]
    async fn disabled_gate_bypasses_storage_entirely() {
        let counting = Arc::new(CountingStore::default());
        let flow_store = FlowStore::new(Arc::clone(&counting) as Arc<dyn SettingsStore>);
        let gate = CompletionGate::new(Flow::Onboarding, false, flow_store);

        assert_eq!(gate.status().await, GateStatus::Complete);
        assert_eq!(gate.is_complete().await, Some(true));
        assert!(!gate.is_loading().await);
        assert_eq!(gate.load().await, GateStatus::Complete);

        assert_eq!(counting.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn enabled_gate_starts_loading_then_resolves() {
        let flow_store = memory_flow_store().await;
        let gate = CompletionGate::new(Flow::UserInfo, true, flow_store.clone());

        assert!(gate.is_loading().await);
        assert_eq!(gate.is_complete().await, None);

        assert_eq!(gate.load().await, GateStatus::Incomplete);
        assert_eq!(gate.is_complete().await, Some(false));

        flow_store.set_completed(Flow::UserInfo).await.unwrap();
        assert_eq!(gate.load().await, GateStatus::Complete);
    }

    #[tokio::test]
    async fn complete_with_data_writes_both_keys() {
        let flow_store = memory_flow_store().await;
        let gate = CompletionGate::new(Flow::UserInfo, true, flow_store.clone());

        let mut data = CollectedData::new();
        data.insert("name", FieldValue::Text("Ada".to_string()));
        gate.complete_with_data(&data).await.unwrap();

        assert_eq!(gate.status().await, GateStatus::Complete);
        assert!(flow_store.completed(Flow::UserInfo).await);
    }

    #[tokio::test]
    async fn mark_complete_sets_only_the_flag() {
        let flow_store = memory_flow_store().await;
        let gate = CompletionGate::new(Flow::Onboarding, true, flow_store.clone());

        gate.mark_complete().await.unwrap();

        assert_eq!(gate.status().await, GateStatus::Complete);
        assert!(flow_store.completed(Flow::Onboarding).await);
    }

    #[tokio::test]
    async fn reset_rearms_an_enabled_gate() {
        let flow_store = memory_flow_store().await;
        let gate = CompletionGate::new(Flow::UserInfo, true, flow_store.clone());
        gate.mark_complete().await.unwrap();

        gate.reset().await.unwrap();

        assert_eq!(gate.status().await, GateStatus::Incomplete);
        assert!(!flow_store.completed(Flow::UserInfo).await);
    }

    #[tokio::test]
    async fn flag_write_failure_leaves_status_untouched() {
        struct FailingStore;

        #[async_trait::async_trait]
        impl SettingsStore for FailingStore {
            async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
                Ok(None)
            }
            async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
                Err(StorageError::Backend("disk full".to_string()))
            }
            async fn delete(&self, _key: &str) -> Result<bool, StorageError> {
                Ok(false)
            }
        }

        let flow_store = FlowStore::new(Arc::new(FailingStore));
        let gate = CompletionGate::new(Flow::Onboarding, true, flow_store);
        gate.load().await;

        assert!(gate.mark_complete().await.is_err());
        assert_eq!(gate.status().await, GateStatus::Incomplete);
    }
}
