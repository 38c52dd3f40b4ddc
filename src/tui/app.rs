//! Application State
//!
//! Holds the job list, the edit modal and transient notices. Network calls run
//! on spawned tasks and come back as `AppEvent`s; every successful write is
//! followed by a full re-fetch of the list.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::client::{ClientResult, JobsApi};
use crate::models::{Job, JobFilter};
use crate::tui::event::AppAction;
use crate::types::JobStatus;

/// How long a notice stays on screen
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Current view/screen
#[derive(Debug, Clone, PartialEq, Default)]
pub enum View {
    #[default]
    Jobs,
    Help,
}

/// Edit modal state machine.
///
/// `Closed -> Open -> Submitting -> Closed`, or `Open -> Closed` on cancel.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditModal {
    #[default]
    Closed,
    Open { job: Job, selected: JobStatus },
    Submitting { job_id: Uuid, status: JobStatus },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

/// A transient notification
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub created: Instant,
}

/// Results of background API calls
#[derive(Debug)]
pub enum AppEvent {
    JobsLoaded(ClientResult<Vec<Job>>),
    JobDeleted(ClientResult<String>),
    StatusUpdated(ClientResult<String>),
}

/// Main application state
pub struct App {
    api: Arc<dyn JobsApi>,

    // UI State
    pub view: View,
    pub should_quit: bool,

    // Job list
    pub filter: JobFilter,
    pub jobs: Vec<Job>,
    pub selected: usize,
    pub loading: bool,

    pub modal: EditModal,
    pub notices: Vec<Notice>,
    /// Set from a delete request until the list reloads
    pub pending_delete: Option<Uuid>,

    // Async communication
    event_rx: mpsc::Receiver<AppEvent>,
    event_tx: mpsc::Sender<AppEvent>,
}

impl App {
    pub fn new(api: Arc<dyn JobsApi>) -> Self {
        let (event_tx, event_rx) = mpsc::channel(32);

        Self {
            api,
            view: View::Jobs,
            should_quit: false,
            filter: JobFilter::default(),
            jobs: Vec::new(),
            selected: 0,
            loading: false,
            modal: EditModal::Closed,
            notices: Vec::new(),
            pending_delete: None,
            event_rx,
            event_tx,
        }
    }

    pub fn selected_job(&self) -> Option<&Job> {
        self.jobs.get(self.selected)
    }

    /// True once a load finished with zero jobs
    pub fn is_empty_state(&self) -> bool {
        !self.loading && self.jobs.is_empty()
    }

    pub fn notify(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notices.push(Notice {
            kind,
            text: text.into(),
            created: Instant::now(),
        });
    }

    /// Drop notices older than `NOTICE_TTL`
    pub fn prune_notices(&mut self, now: Instant) {
        self.notices
            .retain(|n| now.saturating_duration_since(n.created) < NOTICE_TTL);
    }

    /// Re-fetch the full job list from the server
    pub fn refresh(&mut self) {
        self.loading = true;
        let api = self.api.clone();
        let filter = self.filter.clone();
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            let result = api.list_jobs(&filter).await;
            tx.send(AppEvent::JobsLoaded(result)).await.ok();
        });
    }

    pub fn open_edit(&mut self) {
        if self.modal != EditModal::Closed {
            return;
        }
        if let Some(job) = self.selected_job().cloned() {
            debug!(job_id = %job.id, "opening edit modal");
            self.modal = EditModal::Open {
                selected: job.status,
                job,
            };
        }
    }

    pub fn cancel_edit(&mut self) {
        if matches!(self.modal, EditModal::Open { .. }) {
            self.modal = EditModal::Closed;
        }
    }

    pub fn cycle_status(&mut self, forward: bool) {
        if let EditModal::Open { selected, .. } = &mut self.modal {
            *selected = if forward { selected.next() } else { selected.prev() };
        }
    }

    pub fn confirm_edit(&mut self) {
        let EditModal::Open { job, selected } = &self.modal else {
            return;
        };
        let (job_id, status) = (job.id, *selected);
        self.modal = EditModal::Submitting { job_id, status };
        info!(%job_id, %status, "submitting status change");

        let api = self.api.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = api.edit_status(job_id, status).await;
            tx.send(AppEvent::StatusUpdated(result)).await.ok();
        });
    }

    /// Delete the selected job right away, no confirmation
    pub fn delete_selected(&mut self) {
        if self.pending_delete.is_some() {
            return;
        }
        let Some(job_id) = self.selected_job().map(|j| j.id) else {
            return;
        };
        info!(%job_id, "deleting job");
        self.pending_delete = Some(job_id);

        let api = self.api.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = api.delete_job(job_id).await;
            tx.send(AppEvent::JobDeleted(result)).await.ok();
        });
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn select_next(&mut self) {
        if self.selected + 1 < self.jobs.len() {
            self.selected += 1;
        }
    }

    /// Handle an async event
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::JobsLoaded(Ok(jobs)) => {
                self.pending_delete = None;
                self.jobs = jobs;
                self.selected = self.selected.min(self.jobs.len().saturating_sub(1));
                self.loading = false;
            }
            AppEvent::JobsLoaded(Err(e)) => {
                warn!(error = %e, "failed to load jobs");
                self.pending_delete = None;
                self.loading = false;
                self.notify(NoticeKind::Error, e.user_message("Failed to load jobs"));
            }
            AppEvent::JobDeleted(Ok(message)) => {
                self.notify(NoticeKind::Success, message);
                self.refresh();
            }
            AppEvent::JobDeleted(Err(e)) => {
                warn!(error = %e, "delete failed");
                self.pending_delete = None;
                self.notify(NoticeKind::Warning, e.user_message("Failed to delete job"));
            }
            AppEvent::StatusUpdated(result) => {
                self.modal = EditModal::Closed;
                match result {
                    Ok(message) if message.is_empty() => {
                        self.notify(NoticeKind::Success, "Status updated successfully!");
                        self.refresh();
                    }
                    Ok(message) => {
                        self.notify(NoticeKind::Success, message);
                        self.refresh();
                    }
                    Err(e) => {
                        warn!(error = %e, "status update failed");
                        self.notify(NoticeKind::Error, e.user_message("Failed to update status"));
                    }
                }
            }
        }
    }

    /// Handle every event that has already arrived
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
        }
    }

    /// Wait for the next event and handle it
    pub async fn next_event(&mut self) {
        if let Some(event) = self.event_rx.recv().await {
            self.handle_event(event);
        }
    }

    /// Handle a user action
    pub fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::ForceQuit => {
                self.should_quit = true;
                return;
            }
            AppAction::Tick => {
                self.prune_notices(Instant::now());
                return;
            }
            _ => {}
        }

        if self.view == View::Help {
            self.view = View::Jobs;
            return;
        }

        match self.modal {
            // No input while a submission is in flight
            EditModal::Submitting { .. } => {}
            EditModal::Open { .. } => match action {
                AppAction::Prev => self.cycle_status(false),
                AppAction::Next => self.cycle_status(true),
                AppAction::Confirm => self.confirm_edit(),
                AppAction::Cancel => self.cancel_edit(),
                _ => {}
            },
            EditModal::Closed => match action {
                AppAction::Quit => self.should_quit = true,
                AppAction::Prev => self.select_prev(),
                AppAction::Next => self.select_next(),
                AppAction::Edit | AppAction::Confirm => self.open_edit(),
                AppAction::Delete => self.delete_selected(),
                AppAction::Refresh => self.refresh(),
                AppAction::ToggleHelp => self.view = View::Help,
                _ => {}
            },
        }
    }
}
