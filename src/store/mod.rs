//! Persistence layer — settings storage behind an async trait.

pub mod flow_store;
pub mod libsql_backend;
pub mod traits;

pub use flow_store::FlowStore;
pub use libsql_backend::LibSqlStore;
pub use traits::SettingsStore;
