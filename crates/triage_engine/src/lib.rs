//! Triage engine: outbound classification calls and effect execution.
mod classify;
mod engine;
mod types;

pub use classify::{Classifier, ClassifySettings, HttpClassifier};
pub use engine::EngineHandle;
pub use types::{Category, ClassifyError, EngineEvent, FailureKind, RequestId};
