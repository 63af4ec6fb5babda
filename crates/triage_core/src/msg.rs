use std::path::PathBuf;

use crate::{Category, MessageId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the composer text.
    InputChanged(String),
    /// User picked a document; replaces any previous selection.
    FileSelected { name: String, path: PathBuf },
    /// User removed the selected document.
    FileCleared,
    /// User activated send (button or Enter).
    SubmitPressed,
    /// The outbound classification call for a reply placeholder settled.
    ReplySettled {
        reply_id: MessageId,
        outcome: Result<Vec<Category>, SubmitFailure>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}

/// Why an exchange failed. Every variant is terminal for the exchange; none
/// are retried and none escape past the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitFailure {
    /// The service answered with a non-success status, optionally carrying
    /// its own message.
    ServerRejected { status: u16, message: Option<String> },
    /// The call went out but no response arrived: unreachable network or an
    /// expired wait budget.
    Unreachable,
    /// The call could not be built or dispatched at all.
    RequestNotSent { detail: String },
    /// Anything else.
    Unknown { detail: Option<String> },
}

impl SubmitFailure {
    /// Human-readable text for the failed reply bubble.
    pub fn user_message(&self) -> String {
        match self {
            SubmitFailure::ServerRejected { status, message } => match message {
                Some(message) => {
                    format!("The service rejected the request (status {status}): {message}")
                }
                None => format!("The service rejected the request (status {status})."),
            },
            SubmitFailure::Unreachable => {
                "No response from the classification service. Check your connection and try again."
                    .to_string()
            }
            SubmitFailure::RequestNotSent { detail } => {
                format!("The request could not be sent: {detail}")
            }
            SubmitFailure::Unknown { detail } => match detail {
                Some(detail) => detail.clone(),
                None => "An unknown error occurred.".to_string(),
            },
        }
    }
}
