//! Terminal User Interface Module
//!
//! Terminal client for the job tracker: a grid of job cards and a modal for
//! changing a job's status. Built with Ratatui.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    💼 Job Tracker  3 jobs                       │
//! ├─ Jobs ──────────────────────────────────────────────────────────┤
//! │ ┌─ ▶ Acme ──────────┐ ┌─ Globex ──────────┐ ┌─ Initech ───────┐ │
//! │ │ Backend Engineer  │ │ Data Analyst      │ │ SRE             │ │
//! │ │  Interview  full… │ │  Pending  intern… │ │  Rejected  oth… │ │
//! │ │ ⌖ Remote          │ │ ⌖ Berlin          │ │ ⌖ Remote        │ │
//! │ │ ◷ 3 days ago      │ │ ◷ about 1 month…  │ │ ◷ 2 months ago  │ │
//! │ └───────────────────┘ └───────────────────┘ └─────────────────┘ │
//! └─────────────────────────────────────────────────────────────────┘
//!  ✓ Job status updated to interview
//!  [e] Edit [d] Delete [r] Refresh [q] Quit [?] Help
//! ```

pub mod app;
pub mod event;
pub mod theme;
pub mod ui;
pub mod widgets;

pub use app::{App, AppEvent, EditModal, View};
pub use event::{AppAction, EventHandler};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use crate::client::JobsApi;

/// Type alias for our terminal backend
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the TUI against the given API
pub async fn run(api: Arc<dyn JobsApi>) -> anyhow::Result<()> {
    info!("Starting TUI mode");

    let mut terminal = init_terminal()?;
    let mut app = App::new(api);
    let mut events = EventHandler::new(Duration::from_millis(100));

    app.refresh();
    let result = run_app(&mut terminal, &mut app, &mut events).await;

    if let Err(e) = restore_terminal(&mut terminal) {
        error!("Failed to restore terminal: {}", e);
    }

    result
}

/// Main application loop
async fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    events: &mut EventHandler,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Results of finished API calls
        app.poll_events();

        // Ticks arrive every 100ms, so this never blocks for long
        match events.next().await {
            Some(action) => app.handle_action(action),
            None => break,
        }

        if app.should_quit {
            break;
        }
    }

    info!("TUI exited normally");
    Ok(())
}
