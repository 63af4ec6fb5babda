use crate::state::Submission;
use crate::{AppState, Effect, Msg, PendingFile, ReplyState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_pending_text(text);
            Vec::new()
        }
        Msg::FileSelected { name, path } => {
            state.select_file(PendingFile { name, path });
            Vec::new()
        }
        Msg::FileCleared => {
            state.clear_file();
            Vec::new()
        }
        Msg::SubmitPressed => {
            // One outbound call at a time; further sends are blocked until
            // the current exchange settles, never queued.
            if state.in_flight() {
                return (state, Vec::new());
            }
            match state.take_submission() {
                None => Vec::new(),
                Some(Submission::Text(text)) => {
                    state.push_user_message(text.clone(), None);
                    let reply_id = state.push_loading_reply();
                    state.set_in_flight(true);
                    vec![Effect::AnalyzeText { reply_id, text }]
                }
                Some(Submission::Document { name, path }) => {
                    state.push_user_message(format!("Attached document: {name}"), Some(name.clone()));
                    let reply_id = state.push_loading_reply();
                    state.set_in_flight(true);
                    vec![Effect::UploadDocument {
                        reply_id,
                        file_name: name,
                        path,
                    }]
                }
            }
        }
        Msg::ReplySettled { reply_id, outcome } => {
            let terminal = match outcome {
                Ok(categories) => ReplyState::Classified(categories),
                Err(failure) => ReplyState::Failed(failure.user_message()),
            };
            // A stale or duplicate settlement resolves nothing, but the
            // in-flight flag is released regardless.
            state.settle_reply(reply_id, terminal);
            state.set_in_flight(false);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
