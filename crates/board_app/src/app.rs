use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use board_core::{update, BoardState, ItemId, Msg};
use board_logging::board_info;

use crate::config::BoardConfig;
use crate::effects::EffectRunner;
use crate::render;

/// Everything the main loop reacts to: core messages from the command
/// reader or the effect runner, plus app-only control events.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AppEvent {
    Core(Msg),
    Usage(String),
    Quit,
}

pub fn run(config: BoardConfig) -> anyhow::Result<()> {
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(event_tx.clone(), &config)?;
    spawn_command_reader(event_tx);

    println!("pinboard: add <text> | rm <id> | refresh | quit");

    // Initial load, the terminal analogue of fetching on mount.
    let mut state = BoardState::new();
    state = dispatch(state, Msg::RefreshRequested, &runner);

    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Core(msg) => state = dispatch(state, msg, &runner),
            AppEvent::Usage(line) => println!("{line}"),
            AppEvent::Quit => break,
        }
    }

    board_info!("pinboard exiting");
    Ok(())
}

fn dispatch(state: BoardState, msg: Msg, runner: &EffectRunner) -> BoardState {
    // The busy flag is advisory in the core; refusing overlap is the
    // front-end's job, like a disabled submit button.
    if state.view().pending && is_mutating(&msg) {
        println!("still working, try again in a moment");
        return state;
    }

    let (mut state, effects) = update(state, msg);
    runner.enqueue(effects);
    if state.consume_dirty() {
        render::draw(&state.view());
    }
    state
}

fn is_mutating(msg: &Msg) -> bool {
    matches!(msg, Msg::SubmitClicked | Msg::DeleteClicked { .. })
}

fn spawn_command_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            for event in parse_line(&line) {
                if event_tx.send(event).is_err() {
                    return;
                }
            }
        }
        // stdin closed; treat it as quit.
        let _ = event_tx.send(AppEvent::Quit);
    });
}

fn parse_line(line: &str) -> Vec<AppEvent> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest),
        None => (trimmed, ""),
    };
    match command {
        // An empty `add` flows through as an empty submit, which the core
        // silently ignores, just like submitting an empty form.
        "add" => vec![
            AppEvent::Core(Msg::InputChanged(rest.to_string())),
            AppEvent::Core(Msg::SubmitClicked),
        ],
        "rm" => match rest.trim().parse::<ItemId>() {
            Ok(item_id) => vec![AppEvent::Core(Msg::DeleteClicked { item_id })],
            Err(_) => vec![AppEvent::Usage("usage: rm <id>".to_string())],
        },
        "refresh" | "ls" => vec![AppEvent::Core(Msg::RefreshRequested)],
        "quit" | "exit" => vec![AppEvent::Quit],
        other => vec![AppEvent::Usage(format!("unknown command: {other}"))],
    }
}
