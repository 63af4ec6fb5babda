use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use triage_logging::{triage_info, triage_warn};

use crate::classify::{Classifier, ClassifySettings, HttpClassifier};
use crate::{Category, ClassifyError, EngineEvent, FailureKind, RequestId};

enum EngineCommand {
    Analyze {
        request_id: RequestId,
        text: String,
    },
    Upload {
        request_id: RequestId,
        file_name: String,
        path: PathBuf,
    },
}

/// Command channel into a dedicated thread running a tokio runtime. Each
/// accepted command settles as exactly one event on the event channel; the
/// engine never retries and leaves concurrency limits to the caller.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClassifySettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let classifier = Arc::new(HttpClassifier::new(settings));

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let classifier = classifier.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(classifier.as_ref(), command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn analyze(&self, request_id: RequestId, text: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Analyze {
            request_id,
            text: text.into(),
        });
    }

    pub fn upload(
        &self,
        request_id: RequestId,
        file_name: impl Into<String>,
        path: impl Into<PathBuf>,
    ) {
        let _ = self.cmd_tx.send(EngineCommand::Upload {
            request_id,
            file_name: file_name.into(),
            path: path.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    classifier: &dyn Classifier,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Analyze { request_id, text } => {
            triage_info!("Analyze request_id={} text_len={}", request_id, text.len());
            let result = classifier.analyze(&text).await;
            settle(request_id, result, &event_tx);
        }
        EngineCommand::Upload {
            request_id,
            file_name,
            path,
        } => {
            triage_info!("Upload request_id={} file={}", request_id, file_name);
            // Bytes are read here, not at selection time; a vanished or
            // unreadable file settles as a dispatch failure.
            let result = match tokio::fs::read(&path).await {
                Ok(bytes) => classifier.upload(&file_name, bytes).await,
                Err(err) => Err(ClassifyError::new(
                    FailureKind::RequestBuild,
                    format!("could not read {}: {}", path.display(), err),
                )),
            };
            settle(request_id, result, &event_tx);
        }
    }
}

fn settle(
    request_id: RequestId,
    result: Result<Vec<Category>, ClassifyError>,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    if let Err(err) = &result {
        triage_warn!("Request {} failed: {}", request_id, err);
    }
    let _ = event_tx.send(EngineEvent::RequestSettled { request_id, result });
}
