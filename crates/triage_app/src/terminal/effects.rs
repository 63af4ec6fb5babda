use std::thread;
use std::time::Duration;

use triage_core::{Category, Effect, Msg, SubmitFailure};
use triage_engine::{ClassifySettings, EngineEvent, EngineHandle, FailureKind};
use triage_logging::triage_info;

/// Bridges core effects to engine commands and engine settlements back to
/// core messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: ClassifySettings) -> Self {
        Self {
            engine: EngineHandle::new(settings),
        }
    }

    /// Dispatches effects to the engine. Returns the number of outbound
    /// calls started.
    pub fn run(&self, effects: Vec<Effect>) -> usize {
        let mut dispatched = 0;
        for effect in effects {
            match effect {
                Effect::AnalyzeText { reply_id, text } => {
                    triage_info!("AnalyzeText reply_id={} text_len={}", reply_id, text.len());
                    self.engine.analyze(reply_id, text);
                    dispatched += 1;
                }
                Effect::UploadDocument {
                    reply_id,
                    file_name,
                    path,
                } => {
                    triage_info!("UploadDocument reply_id={} file={}", reply_id, file_name);
                    self.engine.upload(reply_id, file_name, path);
                    dispatched += 1;
                }
            }
        }
        dispatched
    }

    /// Blocks until the engine reports the next settlement.
    pub fn wait_for_settlement(&self) -> Msg {
        loop {
            if let Some(event) = self.engine.try_recv() {
                return map_event(event);
            }
            thread::sleep(Duration::from_millis(20));
        }
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::RequestSettled { request_id, result } => Msg::ReplySettled {
            reply_id: request_id,
            outcome: result
                .map(|categories| categories.into_iter().map(map_category).collect())
                .map_err(map_failure),
        },
    }
}

fn map_category(category: triage_engine::Category) -> Category {
    Category {
        name: category.name,
        probability: category.probability,
    }
}

fn map_failure(error: triage_engine::ClassifyError) -> SubmitFailure {
    match error.kind {
        FailureKind::ServerRejected {
            status,
            server_message,
        } => SubmitFailure::ServerRejected {
            status,
            message: server_message,
        },
        FailureKind::NoResponse => SubmitFailure::Unreachable,
        FailureKind::RequestBuild => SubmitFailure::RequestNotSent {
            detail: error.message,
        },
        FailureKind::Unknown => SubmitFailure::Unknown {
            detail: Some(error.message),
        },
    }
}
