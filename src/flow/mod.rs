//! Collection flows — the onboarding tour and the user-info intake.
//!
//! A flow is an ordered sequence of steps, each bundling typed fields. The
//! engine paginates through the steps, validates required fields before an
//! advance, and hands the collected answers to the gate when the final step
//! completes. The gate's persisted flag decides whether the flow is shown
//! again on the next launch.

pub mod catalog;
pub mod controller;
pub mod definition;
pub mod engine;
pub mod render;
pub mod value;

pub use catalog::{onboarding, user_info};
pub use controller::{FlowController, FlowOutcome};
pub use definition::{
    FieldDefinition, FieldKind, FieldOption, Flow, FlowDefinition, StepDefinition,
};
pub use engine::StepEngine;
pub use render::{FieldRender, OptionRender, StepRender};
pub use value::{CollectedData, FieldValue};
