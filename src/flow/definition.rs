//! Static flow, step, and field definitions.
//!
//! Definitions are compiled into the binary. Step order defines pagination
//! order and is fixed at build time; step ids and field ids are unique
//! within their flow.

use serde::{Deserialize, Serialize};

/// Identifies one of the built-in collection flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    Onboarding,
    UserInfo,
}

impl Flow {
    /// Storage key for the string-encoded completion flag.
    pub fn completed_key(&self) -> String {
        format!("{self}_completed")
    }

    /// Storage key for the serialized collected data.
    pub fn data_key(&self) -> String {
        format!("{self}_data")
    }
}

impl std::fmt::Display for Flow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Onboarding => "onboarding",
            Self::UserInfo => "user_info",
        };
        write!(f, "{s}")
    }
}

/// The kind of input a field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Date,
    Radio,
    Checkbox,
    Select,
}

impl FieldKind {
    /// Whether fields of this kind carry an option list.
    pub fn has_options(&self) -> bool {
        matches!(self, Self::Radio | Self::Checkbox | Self::Select)
    }
}

/// One selectable option of a radio, checkbox, or select field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOption {
    pub value: String,
    pub label_key: String,
}

impl FieldOption {
    pub fn new(value: impl Into<String>, label_key: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label_key: label_key.into(),
        }
    }
}

/// A single typed input within a step.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    /// Unique within the flow.
    pub id: String,
    pub kind: FieldKind,
    pub label_key: String,
    pub placeholder_key: Option<String>,
    pub required: bool,
    /// Ordered; empty for text and date fields.
    pub options: Vec<FieldOption>,
    /// Checkbox only: allow more than one selection.
    pub multiple: bool,
}

impl FieldDefinition {
    fn new(
        id: impl Into<String>,
        kind: FieldKind,
        label_key: impl Into<String>,
        options: Vec<FieldOption>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            label_key: label_key.into(),
            placeholder_key: None,
            required: false,
            options,
            multiple: false,
        }
    }

    pub fn text(id: impl Into<String>, label_key: impl Into<String>) -> Self {
        Self::new(id, FieldKind::Text, label_key, Vec::new())
    }

    pub fn date(id: impl Into<String>, label_key: impl Into<String>) -> Self {
        Self::new(id, FieldKind::Date, label_key, Vec::new())
    }

    pub fn radio(
        id: impl Into<String>,
        label_key: impl Into<String>,
        options: Vec<FieldOption>,
    ) -> Self {
        Self::new(id, FieldKind::Radio, label_key, options)
    }

    pub fn checkbox(
        id: impl Into<String>,
        label_key: impl Into<String>,
        options: Vec<FieldOption>,
    ) -> Self {
        Self::new(id, FieldKind::Checkbox, label_key, options)
    }

    pub fn select(
        id: impl Into<String>,
        label_key: impl Into<String>,
        options: Vec<FieldOption>,
    ) -> Self {
        Self::new(id, FieldKind::Select, label_key, options)
    }

    /// Mark the field as required for its step's validation.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_placeholder(mut self, key: impl Into<String>) -> Self {
        self.placeholder_key = Some(key.into());
        self
    }

    /// Checkbox only: allow more than one selection.
    pub fn with_multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Look up an option by its value.
    pub fn option(&self, value: &str) -> Option<&FieldOption> {
        self.options.iter().find(|o| o.value == value)
    }
}

/// One screen in the paginated flow, bundling zero or more fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StepDefinition {
    pub id: String,
    pub title_key: String,
    pub description_key: Option<String>,
    pub emoji: Option<String>,
    pub fields: Vec<FieldDefinition>,
}

impl StepDefinition {
    pub fn new(id: impl Into<String>, title_key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title_key: title_key.into(),
            description_key: None,
            emoji: None,
            fields: Vec::new(),
        }
    }

    pub fn with_description(mut self, key: impl Into<String>) -> Self {
        self.description_key = Some(key.into());
        self
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    pub fn with_fields(mut self, fields: Vec<FieldDefinition>) -> Self {
        self.fields = fields;
        self
    }
}

/// A complete flow: ordered steps plus completion behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowDefinition {
    pub flow: Flow,
    pub steps: Vec<StepDefinition>,
    /// Whether the whole flow can be skipped without validation.
    pub skippable: bool,
    /// Whether collected answers are persisted alongside the flag.
    pub persists_data: bool,
    /// Route pushed once the flow completes.
    pub completion_route: String,
}

impl FlowDefinition {
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Look up a field definition anywhere in the flow.
    pub fn field(&self, field_id: &str) -> Option<&FieldDefinition> {
        self.steps
            .iter()
            .flat_map(|s| s.fields.iter())
            .find(|f| f.id == field_id)
    }
}
