//! Keyboard controls for watch mode.
//!
//! `p` forces a rebuild, `q` or Ctrl+C quits. Keys are read on a background
//! thread with `console::Term::read_key`, which puts the terminal in raw mode
//! only for the duration of each read and restores it before returning.

use crate::watch::WatchEvent;
use console::{Key, Term};
use tokio::sync::mpsc;

/// What a keypress asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Rebuild,
    Quit,
}

/// Map a key to its command, if it has one.
pub fn command_for(key: &Key) -> Option<KeyCommand> {
    match key {
        Key::Char('p') => Some(KeyCommand::Rebuild),
        Key::Char('q') | Key::CtrlC => Some(KeyCommand::Quit),
        _ => None,
    }
}

/// Start listening for keys when stdout is an interactive terminal.
///
/// The thread stops after a quit key, when stdin closes, or when the
/// receiving side is gone.
pub fn spawn_listener(tx: mpsc::Sender<WatchEvent>) -> Option<std::thread::JoinHandle<()>> {
    let term = Term::stdout();
    if !term.is_term() {
        tracing::debug!("stdout is not a terminal, keyboard controls disabled");
        return None;
    }

    let spawned = std::thread::Builder::new()
        .name("packle-keys".to_string())
        .spawn(move || listen(term, tx));

    match spawned {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!("Failed to start keyboard listener: {}", e);
            None
        }
    }
}

fn listen(term: Term, tx: mpsc::Sender<WatchEvent>) {
    loop {
        let command = match term.read_key() {
            Ok(key) => command_for(&key),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => Some(KeyCommand::Quit),
            Err(e) => {
                tracing::debug!("Keyboard listener stopped: {}", e);
                return;
            }
        };

        let event = match command {
            Some(KeyCommand::Rebuild) => WatchEvent::RebuildRequested,
            Some(KeyCommand::Quit) => WatchEvent::Quit,
            None => continue,
        };
        let quit = event == WatchEvent::Quit;

        if tx.blocking_send(event).is_err() || quit {
            return;
        }
    }
}
