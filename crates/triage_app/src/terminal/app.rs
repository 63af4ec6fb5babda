use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use triage_core::{update, AppState, Msg};
use triage_engine::ClassifySettings;
use triage_logging::{triage_info, triage_warn, LogDestination};

use super::effects::EffectRunner;
use super::render;

pub fn run_app() -> anyhow::Result<()> {
    triage_logging::initialize(LogDestination::File);

    let settings = settings_from_environment();
    triage_info!("Classification service at {}", settings.base_url);

    let runner = EffectRunner::new(settings.clone());
    let mut state = AppState::new();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    render::print_welcome(&mut out, &settings.base_url)?;

    let mut lines = stdin.lock().lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match parse_gesture(&line) {
            Gesture::Quit => break,
            Gesture::Nothing => {}
            Gesture::Notice(note) => writeln!(out, "{note}")?,
            Gesture::Detach => {
                state = step(state, Msg::FileCleared, &runner, &mut out)?;
            }
            Gesture::Attach(path) => {
                let name = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or_default()
                    .to_string();
                if settings.is_accepted_document(&name) {
                    state = step(state, Msg::FileSelected { name, path }, &runner, &mut out)?;
                } else {
                    triage_warn!("Rejected document selection: {}", name);
                    writeln!(out, "Unsupported document type: {name}")?;
                }
            }
            Gesture::Submit(text) => {
                state = step(state, Msg::InputChanged(text), &runner, &mut out)?;
                state = step(state, Msg::SubmitPressed, &runner, &mut out)?;
            }
        }
    }

    Ok(())
}

/// Applies one message, renders, and when an outbound call was dispatched,
/// blocks until it settles and folds the settlement back in.
fn step(
    state: AppState,
    msg: Msg,
    runner: &EffectRunner,
    out: &mut impl Write,
) -> anyhow::Result<AppState> {
    let (mut next, effects) = update(state, msg);
    render_if_dirty(&mut next, out)?;

    if runner.run(effects) > 0 {
        let settled = runner.wait_for_settlement();
        let (mut after, _) = update(next, settled);
        render_if_dirty(&mut after, out)?;
        return Ok(after);
    }

    Ok(next)
}

fn render_if_dirty(state: &mut AppState, out: &mut impl Write) -> io::Result<()> {
    if state.consume_dirty() {
        render::print_conversation(out, &state.view())?;
    }
    Ok(())
}

enum Gesture {
    Quit,
    Submit(String),
    Attach(PathBuf),
    Detach,
    Notice(String),
    Nothing,
}

fn parse_gesture(line: &str) -> Gesture {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Gesture::Nothing;
    }
    if trimmed == "/quit" {
        return Gesture::Quit;
    }
    if trimmed == "/detach" {
        return Gesture::Detach;
    }
    if let Some(rest) = trimmed.strip_prefix("/attach") {
        let path = rest.trim();
        if path.is_empty() {
            return Gesture::Notice("usage: /attach <path>".to_string());
        }
        return Gesture::Attach(PathBuf::from(path));
    }
    Gesture::Submit(trimmed.to_string())
}

/// The first CLI argument wins over `TRIAGE_SERVICE_URL`; with neither set
/// the default localhost placeholder is kept.
fn settings_from_environment() -> ClassifySettings {
    let mut settings = ClassifySettings::default();
    if let Ok(base) = std::env::var("TRIAGE_SERVICE_URL") {
        settings.base_url = base;
    }
    if let Some(base) = std::env::args().nth(1) {
        settings.base_url = base;
    }
    settings
}
