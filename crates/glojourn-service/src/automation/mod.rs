//! Automation service and executor.

pub mod executor;
pub mod service;

pub use executor::{AutomationExecutor, ExecutionOutcome};
pub use service::{AutomationPatch, AutomationService};
