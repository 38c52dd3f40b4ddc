//! UI Rendering
//!
//! Main layout: header, job card grid, notice line and status bar, with the
//! edit modal and help drawn on top.

use crate::tui::app::{App, EditModal, View};
use crate::tui::theme::{Icons, Theme};
use crate::tui::widgets::{self, CARD_HEIGHT};
use chrono::Utc;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the main UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(6),    // Job grid
            Constraint::Length(1), // Notices
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_jobs(frame, chunks[1], app);
    render_notice(frame, chunks[2], app);
    render_status_bar(frame, chunks[3], app);

    widgets::render_edit_modal(frame, &app.modal);

    if app.view == View::Help {
        render_help(frame);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let count = if app.loading {
        Span::styled("loading...", Theme::active())
    } else {
        Span::styled(format!("{} jobs", app.jobs.len()), Theme::text_secondary())
    };

    let title_text = vec![Line::from(vec![
        Span::raw("💼 "),
        Span::styled("Job Tracker", Theme::title()),
        Span::raw("  "),
        count,
    ])];

    let title = Paragraph::new(title_text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );

    frame.render_widget(title, area);
}

/// Cards per row for the given width
fn grid_columns(width: u16) -> usize {
    match width {
        w if w >= 96 => 3,
        w if w >= 64 => 2,
        _ => 1,
    }
}

fn render_jobs(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Jobs ")
        .borders(Borders::ALL)
        .border_style(if app.modal == EditModal::Closed {
            Theme::border_focused()
        } else {
            Theme::border()
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.jobs.is_empty() {
        let text = if app.loading {
            Span::styled("Loading jobs...", Theme::active())
        } else {
            Span::styled("No job entries found.", Theme::text_secondary())
        };
        let paragraph = Paragraph::new(Line::from(text)).alignment(Alignment::Center);
        frame.render_widget(paragraph, inner);
        return;
    }

    let columns = grid_columns(inner.width);
    let visible_rows = usize::from((inner.height / CARD_HEIGHT).max(1));
    // Scroll so the selected card's row stays visible
    let first_row = (app.selected / columns + 1).saturating_sub(visible_rows);
    let now = Utc::now();

    for (row, row_jobs) in app
        .jobs
        .chunks(columns)
        .enumerate()
        .skip(first_row)
        .take(visible_rows)
    {
        let y = inner.y + (row - first_row) as u16 * CARD_HEIGHT;
        let row_area = Rect {
            x: inner.x,
            y,
            width: inner.width,
            height: CARD_HEIGHT.min(inner.bottom().saturating_sub(y)),
        };
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(row_area);

        for (col, job) in row_jobs.iter().enumerate() {
            let index = row * columns + col;
            widgets::render_job_card(frame, cells[col], job, index == app.selected, now);
        }
    }
}

/// Most recent notice, if any is still alive
fn render_notice(frame: &mut Frame, area: Rect, app: &App) {
    let Some(notice) = app.notices.last() else {
        return;
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} ", Icons::notice(notice.kind)), Theme::notice(notice.kind)),
        Span::styled(notice.text.clone(), Theme::notice(notice.kind)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let shortcuts = match app.modal {
        EditModal::Closed => vec![
            Span::styled(" [e]", Theme::shortcut_key()),
            Span::styled(" Edit ", Theme::shortcut_desc()),
            Span::styled("[d]", Theme::shortcut_key()),
            Span::styled(" Delete ", Theme::shortcut_desc()),
            Span::styled("[r]", Theme::shortcut_key()),
            Span::styled(" Refresh ", Theme::shortcut_desc()),
            Span::styled("[q]", Theme::shortcut_key()),
            Span::styled(" Quit ", Theme::shortcut_desc()),
            Span::styled("[?]", Theme::shortcut_key()),
            Span::styled(" Help", Theme::shortcut_desc()),
        ],
        EditModal::Open { .. } => vec![
            Span::styled(" [Enter]", Theme::shortcut_key()),
            Span::styled(" Save ", Theme::shortcut_desc()),
            Span::styled("[Esc]", Theme::shortcut_key()),
            Span::styled(" Cancel", Theme::shortcut_desc()),
        ],
        EditModal::Submitting { .. } => vec![Span::styled(" Saving...", Theme::active())],
    };

    frame.render_widget(Paragraph::new(Line::from(shortcuts)), area);
}

/// Render the help modal
fn render_help(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let entry = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(key, Theme::shortcut_key()),
            Span::styled(desc, Theme::text()),
        ])
    };

    let help_lines = vec![
        Line::from(Span::styled("Keyboard Shortcuts", Theme::heading())),
        Line::from(""),
        entry("↑/↓ ←/→      ", "Move between jobs"),
        entry("e / Enter    ", "Edit status of the selected job"),
        entry("d            ", "Delete the selected job"),
        entry("r            ", "Reload the job list"),
        entry("Tab          ", "Next status (in editor)"),
        entry("Esc          ", "Close editor without saving"),
        entry("q            ", "Quit application"),
        entry("Ctrl+C       ", "Force quit"),
        entry("F1 / ?       ", "Show this help"),
        Line::from(""),
        Line::from(Span::styled("Press any key to close", Theme::text_dim())),
    ];

    let paragraph = Paragraph::new(help_lines).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Theme::border_focused()),
    );

    frame.render_widget(paragraph, area);
}

/// Helper to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
