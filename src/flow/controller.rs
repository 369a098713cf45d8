//! FlowController — wires the engine to persistence and navigation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::error::FlowError;
use crate::gate::CompletionGate;
use crate::ui::{Navigator, Translator};

use super::definition::FlowDefinition;
use super::engine::StepEngine;
use super::render::StepRender;
use super::value::FieldValue;

/// What a controller call asks the host UI to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
    /// Scroll the pager to this step index.
    ScrolledTo(usize),
    /// The flow finished and navigation was triggered.
    Finished,
}

/// One mounted flow screen: engine state plus its persistence and
/// navigation collaborators.
///
/// All handles are constructor-injected so tests substitute fakes. One
/// controller is mounted per flow per app session; nothing else touches
/// the flow's storage keys while it runs.
pub struct FlowController {
    definition: Arc<FlowDefinition>,
    engine: RwLock<StepEngine>,
    gate: Arc<CompletionGate>,
    navigator: Arc<dyn Navigator>,
    session_id: Uuid,
}

impl FlowController {
    pub fn new(
        definition: Arc<FlowDefinition>,
        gate: Arc<CompletionGate>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            engine: RwLock::new(StepEngine::new(Arc::clone(&definition))),
            definition,
            gate,
            navigator,
            session_id: Uuid::new_v4(),
        }
    }

    pub fn definition(&self) -> &FlowDefinition {
        &self.definition
    }

    pub async fn step_index(&self) -> usize {
        self.engine.read().await.step_index()
    }

    pub async fn set_value(&self, field_id: &str, value: FieldValue) -> Result<(), FlowError> {
        self.engine.write().await.set_value(field_id, value)
    }

    pub async fn set_text(
        &self,
        field_id: &str,
        text: impl Into<String>,
    ) -> Result<(), FlowError> {
        self.engine.write().await.set_text(field_id, text)
    }

    pub async fn set_date(&self, field_id: &str, date: DateTime<Utc>) -> Result<(), FlowError> {
        self.engine.write().await.set_date(field_id, date)
    }

    pub async fn select_option(&self, field_id: &str, option_value: &str) -> Result<(), FlowError> {
        self.engine.write().await.select_option(field_id, option_value)
    }

    pub async fn render_current(&self, translator: &dyn Translator) -> StepRender {
        self.engine.read().await.render_current(translator)
    }

    /// Advance the pager. Validation failures surface as
    /// [`FlowError::Validation`] and leave the engine untouched.
    pub async fn advance(&self) -> Result<FlowOutcome, FlowError> {
        let index = self.engine.write().await.advance()?;
        Ok(FlowOutcome::ScrolledTo(index))
    }

    /// Complete the flow from its final step: validate, persist answers
    /// (flag-only flows write just the flag), then navigate away.
    ///
    /// On a storage failure the engine stays on the final step and no
    /// navigation happens; the caller decides whether to retry.
    pub async fn complete(&self) -> Result<FlowOutcome, FlowError> {
        let engine = self.engine.read().await;
        let data = engine.finish()?;
        if self.definition.persists_data {
            self.gate.complete_with_data(data).await?;
        } else {
            self.gate.mark_complete().await?;
        }
        drop(engine);
        info!(flow = %self.definition.flow, session = %self.session_id, "Flow completed");
        self.navigator.navigate_to(&self.definition.completion_route);
        Ok(FlowOutcome::Finished)
    }

    /// Skip the flow: mark it complete without validating or recording
    /// answers. Only skippable flows allow this.
    pub async fn skip(&self) -> Result<FlowOutcome, FlowError> {
        if !self.definition.skippable {
            return Err(FlowError::NotSkippable {
                flow: self.definition.flow,
            });
        }
        self.gate.mark_complete().await?;
        info!(flow = %self.definition.flow, session = %self.session_id, "Flow skipped");
        self.navigator.navigate_to(&self.definition.completion_route);
        Ok(FlowOutcome::Finished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::catalog;
    use crate::flow::definition::{FieldDefinition, Flow, StepDefinition};
    use crate::gate::GateStatus;
    use crate::store::{FlowStore, LibSqlStore, SettingsStore};
    use crate::ui::RecordingNavigator;

    async fn memory_flow_store() -> FlowStore {
        let store: Arc<dyn SettingsStore> = Arc::new(LibSqlStore::new_memory().await.unwrap());
        FlowStore::new(store)
    }

    fn data_flow() -> Arc<FlowDefinition> {
        Arc::new(FlowDefinition {
            flow: Flow::UserInfo,
            skippable: false,
            persists_data: true,
            completion_route: "/home".to_string(),
            steps: vec![
                StepDefinition::new("profile", "t.profile")
                    .with_fields(vec![FieldDefinition::text("name", "l.name").required()]),
                StepDefinition::new("done", "t.done"),
            ],
        })
    }

    #[tokio::test]
    async fn skip_marks_flag_and_navigates() {
        let flow_store = memory_flow_store().await;
        let definition = Arc::new(catalog::onboarding());
        let gate = Arc::new(CompletionGate::new(
            Flow::Onboarding,
            true,
            flow_store.clone(),
        ));
        let navigator = Arc::new(RecordingNavigator::new());
        let controller = FlowController::new(definition, Arc::clone(&gate), navigator.clone());

        assert_eq!(controller.skip().await.unwrap(), FlowOutcome::Finished);

        assert!(flow_store.completed(Flow::Onboarding).await);
        assert_eq!(gate.status().await, GateStatus::Complete);
        assert_eq!(navigator.routes(), vec!["/home".to_string()]);
    }

    #[tokio::test]
    async fn skip_rejected_for_non_skippable_flow() {
        let flow_store = memory_flow_store().await;
        let gate = Arc::new(CompletionGate::new(Flow::UserInfo, true, flow_store.clone()));
        let navigator = Arc::new(RecordingNavigator::new());
        let controller = FlowController::new(data_flow(), gate, navigator.clone());

        assert!(matches!(
            controller.skip().await,
            Err(FlowError::NotSkippable { .. })
        ));
        assert!(navigator.routes().is_empty());
        assert!(!flow_store.completed(Flow::UserInfo).await);
    }

    #[tokio::test]
    async fn complete_persists_data_then_flag_then_navigates() {
        let flow_store = memory_flow_store().await;
        let definition = data_flow();
        let gate = Arc::new(CompletionGate::new(Flow::UserInfo, true, flow_store.clone()));
        let navigator = Arc::new(RecordingNavigator::new());
        let controller =
            FlowController::new(Arc::clone(&definition), Arc::clone(&gate), navigator.clone());

        controller.set_text("name", "Ada").await.unwrap();
        assert_eq!(
            controller.advance().await.unwrap(),
            FlowOutcome::ScrolledTo(1)
        );
        assert_eq!(controller.complete().await.unwrap(), FlowOutcome::Finished);

        assert!(flow_store.completed(Flow::UserInfo).await);
        let restored = flow_store.read_data(&definition).await.unwrap();
        assert_eq!(
            restored.get("name").unwrap(),
            &FieldValue::Text("Ada".to_string())
        );
        assert_eq!(navigator.routes(), vec!["/home".to_string()]);
    }

    #[tokio::test]
    async fn validation_failure_blocks_completion() {
        let flow_store = memory_flow_store().await;
        let gate = Arc::new(CompletionGate::new(Flow::UserInfo, true, flow_store.clone()));
        let navigator = Arc::new(RecordingNavigator::new());
        let controller = FlowController::new(data_flow(), gate, navigator.clone());

        assert!(matches!(
            controller.advance().await,
            Err(FlowError::Validation { .. })
        ));
        assert_eq!(controller.step_index().await, 0);
        assert!(navigator.routes().is_empty());
    }
}
