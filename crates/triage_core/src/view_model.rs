use crate::{Message, MessageId, MessageKind, ReplyState};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConversationView {
    pub rows: Vec<MessageRowView>,
    pub in_flight: bool,
    pub pending_text: String,
    pub pending_file_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageRowView {
    pub id: MessageId,
    pub text: String,
    pub from_user: bool,
    pub loading: bool,
    pub categories: Vec<CategoryBarView>,
    pub error: Option<String>,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBarView {
    pub name: String,
    pub probability: f64,
    /// Probability clamped to [0, 100] for a proportional bar. Display only;
    /// the stored payload keeps whatever the service sent.
    pub fill_percent: f64,
}

impl MessageRowView {
    pub(crate) fn from_message(message: &Message) -> Self {
        let mut row = Self {
            id: message.id,
            text: message.text.clone(),
            from_user: false,
            loading: false,
            categories: Vec::new(),
            error: None,
            file_name: None,
        };
        match &message.kind {
            MessageKind::User { file_name } => {
                row.from_user = true;
                row.file_name = file_name.clone();
            }
            MessageKind::Reply(ReplyState::Loading) => {
                row.loading = true;
            }
            MessageKind::Reply(ReplyState::Classified(categories)) => {
                row.categories = categories
                    .iter()
                    .map(|category| CategoryBarView {
                        name: category.name.clone(),
                        probability: category.probability,
                        fill_percent: clamp_percent(category.probability),
                    })
                    .collect();
            }
            MessageKind::Reply(ReplyState::Failed(error)) => {
                row.error = Some(error.clone());
            }
        }
        row
    }
}

fn clamp_percent(probability: f64) -> f64 {
    if probability.is_nan() {
        return 0.0;
    }
    probability.clamp(0.0, 100.0)
}
