use std::path::PathBuf;

use crate::MessageId;

/// Outbound work requested by `update` and executed outside the core. Each
/// effect settles as exactly one `Msg::ReplySettled` for its `reply_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    AnalyzeText {
        reply_id: MessageId,
        text: String,
    },
    UploadDocument {
        reply_id: MessageId,
        file_name: String,
        path: PathBuf,
    },
}
