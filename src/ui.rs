//! UI collaborator seams — translation and navigation handles.
//!
//! The host app supplies the real implementations; they are injected into
//! the flow controller so tests substitute fakes.

use std::collections::HashMap;
use std::sync::Mutex;

/// Resolves translation keys to display text.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> String;
}

/// Table-backed translator. Missing entries fall back to the key itself.
#[derive(Debug, Default)]
pub struct StaticTranslator {
    entries: HashMap<String, String>,
}

impl StaticTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.entries.insert(key.into(), text.into());
        self
    }
}

impl Translator for StaticTranslator {
    fn translate(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

/// Pushes a route in the host app once a flow completes.
pub trait Navigator: Send + Sync {
    fn navigate_to(&self, route: &str);
}

/// Navigator that records routes, for tests and headless runs.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().expect("Navigator mutex poisoned").clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&self, route: &str) {
        self.routes
            .lock()
            .expect("Navigator mutex poisoned")
            .push(route.to_string());
    }
}
