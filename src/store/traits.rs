//! `SettingsStore` trait — single async interface for key-value persistence.

use async_trait::async_trait;

use crate::error::StorageError;

/// Backend-agnostic secure key-value store.
///
/// Keys are app-scoped strings, values are opaque strings. Single-key
/// operations are assumed atomic by the backend; no locking is layered on
/// top.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Returns whether a value was present.
    async fn delete(&self, key: &str) -> Result<bool, StorageError>;
}
