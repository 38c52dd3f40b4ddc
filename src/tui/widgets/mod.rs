//! TUI Widgets
//!
//! Job cards and the status edit modal.

mod edit_modal;
mod job_card;

pub use edit_modal::render_edit_modal;
pub use job_card::{render_job_card, CARD_HEIGHT};
