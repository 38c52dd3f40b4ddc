//! Edit Status Modal
//!
//! Status selector for one job. While a submission is in flight the selector
//! is replaced by a busy line.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::app::EditModal;
use crate::tui::theme::{Icons, Theme};
use crate::tui::ui::centered_rect;
use crate::types::JobStatus;

/// Render the modal; does nothing when it is closed
pub fn render_edit_modal(frame: &mut Frame, modal: &EditModal) {
    let area = centered_rect(50, 40, frame.area());

    match modal {
        EditModal::Closed => {}
        EditModal::Open { job, selected } => {
            frame.render_widget(Clear, area);
            let block = modal_block();
            let inner = block.inner(area);
            frame.render_widget(block, area);

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([
                    Constraint::Length(2), // Job summary
                    Constraint::Min(3),    // Status options
                    Constraint::Length(1), // Footer
                ])
                .split(inner);

            let summary = Paragraph::new(Line::from(vec![
                Span::styled(job.position.clone(), Theme::heading()),
                Span::styled(format!(" at {}", job.company), Theme::text_secondary()),
            ]));
            frame.render_widget(summary, chunks[0]);

            render_options(frame, chunks[1], *selected);
            render_footer(frame, chunks[2]);
        }
        EditModal::Submitting { status, .. } => {
            frame.render_widget(Clear, area);
            let paragraph = Paragraph::new(Line::from(vec![
                Span::styled(format!("{} ", Icons::ACTIVE), Theme::active()),
                Span::styled(format!("Updating status to {}...", status.label()), Theme::text()),
            ]))
            .block(modal_block());
            frame.render_widget(paragraph, area);
        }
    }
}

fn modal_block() -> Block<'static> {
    Block::default()
        .title(" Edit Job Status ")
        .borders(Borders::ALL)
        .border_style(Theme::border_focused())
}

fn render_options(frame: &mut Frame, area: Rect, selected: JobStatus) {
    let lines: Vec<Line> = JobStatus::ALL
        .iter()
        .map(|status| {
            if *status == selected {
                Line::from(vec![
                    Span::styled(format!("{} ", Icons::SELECTED), Theme::selected()),
                    Span::styled(format!(" {} ", status.label()), Theme::status_badge(*status)),
                ])
            } else {
                Line::from(Span::styled(format!("   {}", status.label()), Theme::text()))
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled("[↑/↓]", Theme::shortcut_key()),
        Span::styled(" Choose ", Theme::shortcut_desc()),
        Span::styled("[Enter]", Theme::shortcut_key()),
        Span::styled(" Save ", Theme::shortcut_desc()),
        Span::styled("[Esc]", Theme::shortcut_key()),
        Span::styled(" Cancel", Theme::shortcut_desc()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
