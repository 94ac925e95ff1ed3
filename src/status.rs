//! User-visible submission status and its timed visibility window.
//!
//! Each outcome shows a status and schedules exactly one deferred hide. Showing a newer status,
//! starting a new attempt, clearing or tearing down aborts the pending hide; a generation
//! counter keeps a hide that already woke up from touching a newer status.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub const SUCCESS_MESSAGE: &str = "Form submitted successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusPhase {
    Idle,
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionStatus {
    pub phase: StatusPhase,
    pub message: String,
    pub visible: bool,
}

impl Default for SubmissionStatus {
    fn default() -> Self { Self { phase: StatusPhase::Idle, message: String::new(), visible: false } }
}

#[derive(Debug, Default)]
struct BoardState {
    status: SubmissionStatus,
    generation: u64,
    hide_timer: Option<JoinHandle<()>>,
}

impl BoardState {
    fn abort_timer(&mut self) -> bool {
        match self.hide_timer.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusBoard {
    state: Arc<Mutex<BoardState>>,
    visible_for: Duration,
}

impl StatusBoard {
    pub fn new(visible_for: Duration) -> Self {
        Self { state: Arc::new(Mutex::new(BoardState::default())), visible_for }
    }

    pub fn snapshot(&self) -> SubmissionStatus { self.state.lock().status.clone() }

    pub fn has_pending_hide(&self) -> bool { self.state.lock().hide_timer.is_some() }

    /// Show a status and schedule it to hide after the visibility window.
    /// Outside a Tokio runtime the status stays visible until the next change.
    pub fn show(&self, phase: StatusPhase, message: &str) {
        let mut st = self.state.lock();
        st.abort_timer();
        st.generation += 1;
        st.status = SubmissionStatus { phase, message: message.to_string(), visible: true };
        debug!(target: "regform::status", ?phase, "status shown");

        let Ok(rt) = tokio::runtime::Handle::try_current() else {
            warn!(target: "regform::status", "no runtime; status will not auto-hide");
            return;
        };
        let generation = st.generation;
        let shared = Arc::clone(&self.state);
        let delay = self.visible_for;
        st.hide_timer = Some(rt.spawn(async move {
            tokio::time::sleep(delay).await;
            let mut st = shared.lock();
            if st.generation == generation {
                st.status.visible = false;
                st.hide_timer = None;
                debug!(target: "regform::status", "status hidden");
            }
        }));
    }

    /// A new attempt hides the previous status; phase and message stay until overwritten.
    pub fn begin_attempt(&self) {
        let mut st = self.state.lock();
        st.abort_timer();
        st.generation += 1;
        st.status.visible = false;
    }

    pub fn cancel_pending(&self) -> bool {
        let mut st = self.state.lock();
        st.generation += 1;
        st.abort_timer()
    }

    /// Back to idle with no message.
    pub fn reset(&self) {
        let mut st = self.state.lock();
        st.abort_timer();
        st.generation += 1;
        st.status = SubmissionStatus::default();
    }
}
