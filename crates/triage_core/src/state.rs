use std::collections::HashMap;
use std::path::PathBuf;

use crate::view_model::{ConversationView, MessageRowView};

pub type MessageId = u64;

/// One category returned by the classification service.
///
/// Probabilities are nominally percentages but the range is service-defined;
/// the view model clamps for display without touching the stored value.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub probability: f64,
}

/// Lifecycle of a service reply. `Loading` may transition to exactly one of
/// the terminal variants; terminal replies never change again.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyState {
    Loading,
    Classified(Vec<Category>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MessageKind {
    /// The submitter's own bubble; terminal from birth.
    User { file_name: Option<String> },
    /// A service reply, placeholder or resolved.
    Reply(ReplyState),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub kind: MessageKind,
}

impl Message {
    pub fn is_user(&self) -> bool {
        matches!(self.kind, MessageKind::User { .. })
    }
}

/// A document the user has picked but not yet sent. Bytes are read at
/// dispatch time, outside the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub name: String,
    pub path: PathBuf,
}

/// Insertion-ordered, append-only message sequence. The only in-place update
/// is resolving a loading reply to its terminal state, once.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Conversation {
    order: Vec<MessageId>,
    entries: HashMap<MessageId, Message>,
    next_id: MessageId,
}

impl Conversation {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.entries.get(&id)
    }

    /// Messages in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    fn allocate_id(&mut self) -> MessageId {
        self.next_id += 1;
        self.next_id
    }

    fn append(&mut self, text: String, kind: MessageKind) -> MessageId {
        let id = self.allocate_id();
        self.order.push(id);
        self.entries.insert(id, Message { id, text, kind });
        id
    }

    /// One-shot transition of a loading reply to a terminal state. Returns
    /// false for unknown ids, user messages, and already-terminal replies.
    fn resolve(&mut self, id: MessageId, terminal: ReplyState) -> bool {
        let Some(message) = self.entries.get_mut(&id) else {
            return false;
        };
        match &message.kind {
            MessageKind::Reply(ReplyState::Loading) => {
                message.kind = MessageKind::Reply(terminal);
                true
            }
            _ => false,
        }
    }
}

pub(crate) enum Submission {
    Text(String),
    Document { name: String, path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    conversation: Conversation,
    pending_text: String,
    pending_file: Option<PendingFile>,
    in_flight: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Returns whether a re-render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> ConversationView {
        ConversationView {
            rows: self
                .conversation
                .iter()
                .map(MessageRowView::from_message)
                .collect(),
            in_flight: self.in_flight,
            pending_text: self.pending_text.clone(),
            pending_file_name: self.pending_file.as_ref().map(|file| file.name.clone()),
        }
    }

    pub(crate) fn set_pending_text(&mut self, text: String) {
        self.pending_text = text;
        self.mark_dirty();
    }

    /// Holds at most one file; selecting again replaces the previous pick.
    pub(crate) fn select_file(&mut self, file: PendingFile) {
        self.pending_file = Some(file);
        self.mark_dirty();
    }

    pub(crate) fn clear_file(&mut self) {
        if self.pending_file.take().is_some() {
            self.mark_dirty();
        }
    }

    /// Consumes the pending submission, clearing both fields. A selected
    /// file takes precedence over composer text; with neither present this
    /// leaves the state untouched and returns None.
    pub(crate) fn take_submission(&mut self) -> Option<Submission> {
        if let Some(file) = self.pending_file.take() {
            self.pending_text.clear();
            self.mark_dirty();
            return Some(Submission::Document {
                name: file.name,
                path: file.path,
            });
        }
        let text = self.pending_text.trim().to_owned();
        if text.is_empty() {
            return None;
        }
        self.pending_text.clear();
        self.mark_dirty();
        Some(Submission::Text(text))
    }

    pub(crate) fn push_user_message(
        &mut self,
        text: String,
        file_name: Option<String>,
    ) -> MessageId {
        let id = self
            .conversation
            .append(text, MessageKind::User { file_name });
        self.mark_dirty();
        id
    }

    pub(crate) fn push_loading_reply(&mut self) -> MessageId {
        let id = self
            .conversation
            .append(String::new(), MessageKind::Reply(ReplyState::Loading));
        self.mark_dirty();
        id
    }

    pub(crate) fn settle_reply(&mut self, id: MessageId, terminal: ReplyState) -> bool {
        let resolved = self.conversation.resolve(id, terminal);
        if resolved {
            self.mark_dirty();
        }
        resolved
    }

    pub(crate) fn set_in_flight(&mut self, in_flight: bool) {
        if self.in_flight != in_flight {
            self.in_flight = in_flight;
            self.mark_dirty();
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
