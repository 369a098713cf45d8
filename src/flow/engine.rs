//! Step engine — pagination, per-step validation, and field updates.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::FlowError;
use crate::ui::Translator;

use super::definition::{FieldKind, FlowDefinition, StepDefinition};
use super::render::{StepRender, render_step};
use super::value::{CollectedData, FieldValue};

/// Drives one run of a collection flow.
///
/// The engine is a pure state machine: it owns the current step index and
/// the answers collected so far, and never touches storage. Persistence and
/// navigation live in [`FlowController`](super::controller::FlowController).
///
/// States are `AtStep(i)` for `i` in `[0, N)`. Completion is the terminal
/// transition; the caller tears the instance down once navigation happens.
#[derive(Debug, Clone)]
pub struct StepEngine {
    definition: Arc<FlowDefinition>,
    step: usize,
    data: CollectedData,
}

impl StepEngine {
    /// Start at step 0 with no collected data. Definitions have at least
    /// one step.
    pub fn new(definition: Arc<FlowDefinition>) -> Self {
        debug_assert!(!definition.steps.is_empty());
        Self {
            definition,
            step: 0,
            data: CollectedData::new(),
        }
    }

    pub fn definition(&self) -> &FlowDefinition {
        &self.definition
    }

    pub fn step_index(&self) -> usize {
        self.step
    }

    pub fn current_step(&self) -> &StepDefinition {
        &self.definition.steps[self.step]
    }

    pub fn is_final_step(&self) -> bool {
        self.step + 1 == self.definition.steps.len()
    }

    pub fn data(&self) -> &CollectedData {
        &self.data
    }

    /// Unconditional value write. No validation runs at set time; the
    /// value's shape must match the field's kind.
    pub fn set_value(&mut self, field_id: &str, value: FieldValue) -> Result<(), FlowError> {
        let field = self
            .definition
            .field(field_id)
            .ok_or_else(|| FlowError::UnknownField {
                field_id: field_id.to_string(),
            })?;
        if !value.matches_kind(field.kind) {
            return Err(FlowError::KindMismatch {
                field_id: field_id.to_string(),
            });
        }
        self.data.insert(field_id, value);
        Ok(())
    }

    /// Convenience for text fields.
    pub fn set_text(&mut self, field_id: &str, text: impl Into<String>) -> Result<(), FlowError> {
        self.set_value(field_id, FieldValue::Text(text.into()))
    }

    /// Convenience for date fields.
    pub fn set_date(&mut self, field_id: &str, date: DateTime<Utc>) -> Result<(), FlowError> {
        self.set_value(field_id, FieldValue::Date(date))
    }

    /// Report a tap on an option of a radio, select, or checkbox field.
    ///
    /// Radio and select replace the choice; re-selecting keeps it. A
    /// checkbox without `multiple` toggles: the current option clears the
    /// selection, a different one replaces it outright. A checkbox with
    /// `multiple` toggles membership, preserving selection order.
    pub fn select_option(&mut self, field_id: &str, option_value: &str) -> Result<(), FlowError> {
        let field = self
            .definition
            .field(field_id)
            .ok_or_else(|| FlowError::UnknownField {
                field_id: field_id.to_string(),
            })?;
        if !field.kind.has_options() {
            return Err(FlowError::KindMismatch {
                field_id: field_id.to_string(),
            });
        }
        if field.option(option_value).is_none() {
            return Err(FlowError::UnknownOption {
                field_id: field_id.to_string(),
                value: option_value.to_string(),
            });
        }

        if field.kind == FieldKind::Checkbox {
            let mut current = match self.data.get(field_id) {
                Some(FieldValue::Selections(values)) => values.clone(),
                _ => Vec::new(),
            };
            if field.multiple {
                if let Some(pos) = current.iter().position(|v| v == option_value) {
                    current.remove(pos);
                } else {
                    current.push(option_value.to_string());
                }
            } else if current.iter().any(|v| v == option_value) {
                current.clear();
            } else {
                current = vec![option_value.to_string()];
            }
            self.data.insert(field_id, FieldValue::Selections(current));
        } else {
            self.data
                .insert(field_id, FieldValue::Text(option_value.to_string()));
        }
        Ok(())
    }

    /// Step-scoped required check: every required field of step `index`
    /// must hold an answer, and selection lists must be non-empty. Steps
    /// out of range have nothing to validate.
    pub fn validate(&self, index: usize) -> Result<(), FlowError> {
        let Some(step) = self.definition.steps.get(index) else {
            return Ok(());
        };
        let missing: Vec<String> = step
            .fields
            .iter()
            .filter(|f| f.required)
            .filter(|f| {
                !self
                    .data
                    .get(&f.id)
                    .is_some_and(FieldValue::satisfies_required)
            })
            .map(|f| f.id.clone())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(FlowError::Validation {
                step_id: step.id.clone(),
                missing,
            })
        }
    }

    /// Move to the next step if the current one validates. Returns the new
    /// step index for the pager scroll. A validation failure changes
    /// nothing.
    pub fn advance(&mut self) -> Result<usize, FlowError> {
        if self.is_final_step() {
            return Err(FlowError::AtFinalStep);
        }
        self.validate(self.step)?;
        self.step += 1;
        Ok(self.step)
    }

    /// Validate the final step and hand back the collected answers for
    /// persistence. Valid only at the final step.
    pub fn finish(&self) -> Result<&CollectedData, FlowError> {
        if !self.is_final_step() {
            return Err(FlowError::NotAtFinalStep);
        }
        self.validate(self.step)?;
        Ok(&self.data)
    }

    /// Resolve the current step for display.
    pub fn render_current(&self, translator: &dyn Translator) -> StepRender {
        render_step(
            self.current_step(),
            &self.data,
            self.step,
            self.definition.steps.len(),
            translator,
        )
    }
}
