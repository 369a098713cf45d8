//! Intake — step-based collection flows with persisted completion gating.
//!
//! Two flows ship built in: a skippable onboarding tour and a user-info
//! intake. Both run on the same engine: a static step table drives a paged
//! collector that validates required fields per step, persists a
//! completion flag (plus, for user-info, the collected answers) in a local
//! settings store, and gates the app's root navigation on that flag.

pub mod config;
pub mod error;
pub mod flow;
pub mod gate;
pub mod routes;
pub mod store;
pub mod ui;
