//! Job Card Widget
//!
//! One bordered card per job: company, position, badges, location and age.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::Job;
use crate::tui::theme::{Icons, Theme};
use crate::utils::time::format_distance_to_now;

/// Rows taken by a card, borders included
pub const CARD_HEIGHT: u16 = 6;

/// Body lines of a card
fn card_lines(job: &Job, now: DateTime<Utc>) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(job.position.clone(), Theme::heading())),
        Line::from(vec![
            Span::styled(
                format!(" {} ", job.status.label()),
                Theme::status_badge(job.status),
            ),
            Span::raw(" "),
            Span::styled(
                format!(" {} ", job.work_type),
                Theme::work_type_badge(job.work_type),
            ),
        ]),
        Line::from(vec![
            Span::styled(format!("{} ", Icons::LOCATION), Theme::text_dim()),
            Span::styled(job.work_location.clone(), Theme::text_secondary()),
        ]),
        Line::from(vec![
            Span::styled(format!("{} ", Icons::CLOCK), Theme::text_dim()),
            Span::styled(
                format_distance_to_now(job.created_at, now),
                Theme::text_secondary(),
            ),
        ]),
    ]
}

pub fn render_job_card(frame: &mut Frame, area: Rect, job: &Job, selected: bool, now: DateTime<Utc>) {
    let title = if selected {
        Line::from(vec![
            Span::styled(format!(" {} ", Icons::SELECTED), Theme::selected()),
            Span::styled(format!("{} ", job.company), Theme::selected()),
        ])
    } else {
        Line::from(Span::styled(format!(" {} ", job.company), Theme::title()))
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if selected {
            Theme::border_focused()
        } else {
            Theme::border()
        });

    let paragraph = Paragraph::new(card_lines(job, now)).block(block);
    frame.render_widget(paragraph, area);
}
