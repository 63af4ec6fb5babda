//! Triage core: pure conversation state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{Msg, SubmitFailure};
pub use state::{
    AppState, Category, Conversation, Message, MessageId, MessageKind, PendingFile, ReplyState,
};
pub use update::update;
pub use view_model::{CategoryBarView, ConversationView, MessageRowView};
