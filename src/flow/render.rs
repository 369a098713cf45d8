//! Render models — resolved display strings for the host UI.
//!
//! The engine state is turned into plain structs with every i18n key
//! already translated, so widget code never sees keys or definitions.

use crate::ui::Translator;

use super::definition::{FieldDefinition, FieldKind, StepDefinition};
use super::value::{CollectedData, FieldValue};

/// A step resolved for display.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRender {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub emoji: Option<String>,
    /// Zero-based position in the pager.
    pub index: usize,
    pub total: usize,
    pub fields: Vec<FieldRender>,
}

/// A field resolved for display.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRender {
    pub id: String,
    pub kind: FieldKind,
    pub label: String,
    pub placeholder: Option<String>,
    pub required: bool,
    pub multiple: bool,
    pub options: Vec<OptionRender>,
    /// Current answer, if any.
    pub value: Option<FieldValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionRender {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Resolve a step and its fields through the translator.
pub fn render_step(
    step: &StepDefinition,
    data: &CollectedData,
    index: usize,
    total: usize,
    translator: &dyn Translator,
) -> StepRender {
    StepRender {
        id: step.id.clone(),
        title: translator.translate(&step.title_key),
        description: step
            .description_key
            .as_deref()
            .map(|k| translator.translate(k)),
        emoji: step.emoji.clone(),
        index,
        total,
        fields: step
            .fields
            .iter()
            .map(|f| render_field(f, data, translator))
            .collect(),
    }
}

fn render_field(
    field: &FieldDefinition,
    data: &CollectedData,
    translator: &dyn Translator,
) -> FieldRender {
    let value = data.get(&field.id).cloned();
    let options = field
        .options
        .iter()
        .map(|o| OptionRender {
            value: o.value.clone(),
            label: translator.translate(&o.label_key),
            selected: option_selected(value.as_ref(), &o.value),
        })
        .collect();
    FieldRender {
        id: field.id.clone(),
        kind: field.kind,
        label: translator.translate(&field.label_key),
        placeholder: field
            .placeholder_key
            .as_deref()
            .map(|k| translator.translate(k)),
        required: field.required,
        multiple: field.multiple,
        options,
        value,
    }
}

fn option_selected(value: Option<&FieldValue>, option: &str) -> bool {
    match value {
        Some(FieldValue::Text(chosen)) => chosen == option,
        Some(FieldValue::Selections(values)) => values.iter().any(|v| v == option),
        _ => false,
    }
}
