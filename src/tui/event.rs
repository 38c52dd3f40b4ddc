//! Event Handling
//!
//! Maps keyboard and timer events to application actions.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;

/// Actions that can be performed in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Quit the application
    Quit,
    /// Quit from any state
    ForceQuit,
    /// Previous card, or previous status inside the modal
    Prev,
    /// Next card, or next status inside the modal
    Next,
    /// Open the edit modal for the selected job
    Edit,
    /// Delete the selected job
    Delete,
    /// Re-fetch the job list
    Refresh,
    /// Enter
    Confirm,
    /// Escape
    Cancel,
    ToggleHelp,
    /// Timer tick, expires notices
    Tick,
}

/// Event handler for the TUI
pub struct EventHandler {
    rx: mpsc::Receiver<AppAction>,
    _tx: mpsc::Sender<AppAction>,
}

impl EventHandler {
    /// Create a new event handler with specified tick rate
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel(100);
        let tx_clone = tx.clone();

        tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();
            let mut tick_interval = tokio::time::interval(tick_rate);

            loop {
                let tick = tick_interval.tick();
                let crossterm_event = reader.next().fuse();

                tokio::select! {
                    _ = tick => {
                        if tx_clone.send(AppAction::Tick).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(evt)) = crossterm_event => {
                        if let Some(action) = map_event(evt) {
                            if tx_clone.send(action).await.is_err() {
                                break;
                            }
                        }
                    }
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Wait for the next action
    pub async fn next(&mut self) -> Option<AppAction> {
        self.rx.recv().await
    }
}

/// Map a crossterm event to an app action
fn map_event(event: Event) -> Option<AppAction> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => map_key_event(key),
        _ => None,
    }
}

/// Map a key event to an app action
pub fn map_key_event(key: KeyEvent) -> Option<AppAction> {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(AppAction::ForceQuit),

        (KeyModifiers::SHIFT, KeyCode::BackTab) => Some(AppAction::Prev),

        (KeyModifiers::NONE, code) | (KeyModifiers::SHIFT, code) => match code {
            KeyCode::Char('q') => Some(AppAction::Quit),
            KeyCode::Esc => Some(AppAction::Cancel),
            KeyCode::Enter => Some(AppAction::Confirm),

            KeyCode::F(1) | KeyCode::Char('?') => Some(AppAction::ToggleHelp),

            KeyCode::Up | KeyCode::Left | KeyCode::Char('k') | KeyCode::BackTab => {
                Some(AppAction::Prev)
            }
            KeyCode::Down | KeyCode::Right | KeyCode::Char('j') | KeyCode::Tab => {
                Some(AppAction::Next)
            }

            KeyCode::Char('e') => Some(AppAction::Edit),
            KeyCode::Char('d') | KeyCode::Delete => Some(AppAction::Delete),
            KeyCode::Char('r') => Some(AppAction::Refresh),

            _ => None,
        },

        _ => None,
    }
}
