//!
//! Submission controller
//! ---------------------
//! Owns the form's mutable state (values, errors, previews, status) and drives one submission
//! at a time through `Idle -> Validating -> Submitting -> Succeeded | Failed`.
//!
//! Responsibilities:
//! - Field editing, with file fields routed through the preview manager.
//! - Validation before any network call; invalid forms return to `Idle` with their errors.
//! - A single in-flight submission; further submit events are ignored until it completes.
//! - Outcome handling: success clears values, errors and previews; failures keep everything
//!   so the user can retry. Both show a status that hides after the configured window.
//! - Clear and teardown paths that release every preview explicitly.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::FormConfig;
use crate::error::{AppError, AppResult};
use crate::payload::MultipartPayload;
use crate::preview::{PreviewHandle, PreviewManager};
use crate::schema::{self, FieldDefinition};
use crate::status::{StatusBoard, StatusPhase, SubmissionStatus, SUCCESS_MESSAGE};
use crate::transport::{HttpTransport, Transport, TransportError};
use crate::validation::{validate, ErrorMap};
use crate::values::{FileUpload, FormValues};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitState {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Invalid(ErrorMap),
    Succeeded,
    Failed(AppError),
    /// Another submission was already in flight.
    Ignored,
}

#[derive(Debug)]
struct FormState {
    state: SubmitState,
    values: FormValues,
    errors: ErrorMap,
    previews: PreviewManager,
    torn_down: bool,
}

struct Inner<T: Transport> {
    transport: T,
    config: FormConfig,
    form: Mutex<FormState>,
    status: StatusBoard,
}

pub struct FormController<T: Transport> {
    inner: Arc<Inner<T>>,
}

impl<T: Transport> Clone for FormController<T> {
    fn clone(&self) -> Self { Self { inner: Arc::clone(&self.inner) } }
}

impl FormController<HttpTransport> {
    /// Controller posting to the configured endpoint over HTTP.
    pub fn http(config: FormConfig) -> AppResult<Self> {
        let transport = HttpTransport::from_config(&config)?;
        Ok(Self::new(config, transport))
    }
}

// Puts the form back to Idle if a submit future is dropped mid-flight.
struct InFlight<'a, T: Transport> {
    inner: &'a Inner<T>,
    armed: bool,
}

impl<T: Transport> InFlight<'_, T> {
    fn disarm(mut self) { self.armed = false; }
}

impl<T: Transport> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if !self.armed { return; }
        let mut form = self.inner.form.lock();
        if form.state == SubmitState::Submitting {
            form.state = SubmitState::Idle;
            warn!(target: "regform::submit", "submission cancelled while in flight");
        }
    }
}

fn lookup(id: &str) -> AppResult<&'static FieldDefinition> {
    schema::field(id).ok_or_else(|| AppError::internal("unknown_field", id))
}

fn ensure_live(form: &FormState, field_id: &str) -> AppResult<()> {
    if form.torn_down {
        return Err(AppError::internal("torn_down", field_id));
    }
    Ok(())
}

impl<T: Transport> FormController<T> {
    pub fn new(config: FormConfig, transport: T) -> Self {
        let status = StatusBoard::new(config.status_visible_for());
        let form = FormState {
            state: SubmitState::Idle,
            values: FormValues::new(),
            errors: ErrorMap::new(),
            previews: PreviewManager::new(),
            torn_down: false,
        };
        Self { inner: Arc::new(Inner { transport, config, form: Mutex::new(form), status }) }
    }

    pub fn transport(&self) -> &T { &self.inner.transport }
    pub fn config(&self) -> &FormConfig { &self.inner.config }

    pub fn state(&self) -> SubmitState { self.inner.form.lock().state }

    /// The submit trigger is disabled while a request is in flight.
    pub fn is_submit_enabled(&self) -> bool {
        let form = self.inner.form.lock();
        !form.torn_down && form.state != SubmitState::Submitting
    }

    pub fn is_torn_down(&self) -> bool { self.inner.form.lock().torn_down }

    pub fn values(&self) -> FormValues { self.inner.form.lock().values.clone() }
    pub fn errors(&self) -> ErrorMap { self.inner.form.lock().errors.clone() }
    pub fn error_for(&self, field_id: &str) -> Option<String> {
        self.inner.form.lock().errors.message(field_id).map(str::to_string)
    }
    pub fn status(&self) -> SubmissionStatus { self.inner.status.snapshot() }
    pub fn status_board(&self) -> &StatusBoard { &self.inner.status }

    pub fn preview(&self, field_id: &str) -> Option<PreviewHandle> {
        self.inner.form.lock().previews.handle(field_id).cloned()
    }
    pub fn live_previews(&self) -> usize { self.inner.form.lock().previews.registry().live_count() }
    pub fn is_preview_live(&self, uri: &str) -> bool { self.inner.form.lock().previews.registry().is_live(uri) }

    pub fn set_text(&self, field_id: &str, value: impl Into<String>) -> AppResult<()> {
        let def = lookup(field_id)?;
        if def.kind.is_file() {
            return Err(AppError::internal("kind_mismatch", format!("{} expects a file", field_id).as_str()));
        }
        let mut form = self.inner.form.lock();
        ensure_live(&form, field_id)?;
        form.values.insert_text(def.id, value);
        Ok(())
    }

    /// Choose (or clear, with `None`) the file for a file field. Returns the new preview, if any.
    pub fn set_file(&self, field_id: &str, file: Option<FileUpload>) -> AppResult<Option<PreviewHandle>> {
        let def = lookup(field_id)?;
        if !def.kind.is_file() {
            return Err(AppError::internal("kind_mismatch", format!("{} does not take a file", field_id).as_str()));
        }
        let mut form = self.inner.form.lock();
        ensure_live(&form, field_id)?;
        let handle = form.previews.set_file(def.id, file.as_ref());
        match file {
            Some(f) => form.values.insert_file(def.id, f),
            None => { form.values.remove(def.id); }
        }
        Ok(handle)
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let payload = {
            let mut form = self.inner.form.lock();
            if form.torn_down {
                debug!(target: "regform::submit", "submit ignored; form was torn down");
                return SubmitOutcome::Ignored;
            }
            if form.state == SubmitState::Submitting {
                debug!(target: "regform::submit", "submit ignored; a submission is in flight");
                return SubmitOutcome::Ignored;
            }
            form.state = SubmitState::Validating;
            self.inner.status.begin_attempt();
            let errors = validate(&form.values);
            form.errors = errors.clone();
            if !errors.is_empty() {
                form.state = SubmitState::Idle;
                info!(target: "regform::submit", error_count = errors.len(), "submission blocked by validation");
                return SubmitOutcome::Invalid(errors);
            }
            form.state = SubmitState::Submitting;
            MultipartPayload::from_values(&form.values)
        };

        let guard = InFlight { inner: &self.inner, armed: true };
        info!(target: "regform::submit", parts = payload.len(), files = payload.file_count(), "submitting form");
        let result = self.dispatch(payload).await;
        guard.disarm();

        let mut form = self.inner.form.lock();
        match result {
            Ok(()) => {
                form.values.clear();
                form.errors.clear();
                form.previews.release_all();
                form.state = SubmitState::Succeeded;
                if !form.torn_down {
                    self.inner.status.show(StatusPhase::Success, SUCCESS_MESSAGE);
                }
                info!(target: "regform::submit", "submission succeeded");
                SubmitOutcome::Succeeded
            }
            Err(err) => {
                form.state = SubmitState::Failed;
                if !form.torn_down {
                    self.inner.status.show(StatusPhase::Failure, err.user_message());
                }
                warn!(target: "regform::submit", code = err.code_str(), error = %err, "submission failed");
                SubmitOutcome::Failed(err)
            }
        }
    }

    async fn dispatch(&self, payload: MultipartPayload) -> AppResult<()> {
        let send = self.inner.transport.send(payload);
        let response = match self.inner.config.request_timeout() {
            Some(limit) => tokio::time::timeout(limit, send).await.map_err(|_| TransportError::Timeout)?,
            None => send.await,
        }?;
        if response.is_success() {
            Ok(())
        } else {
            Err(AppError::server_rejection(response.status))
        }
    }

    /// Reset every field, error, preview and the status. Refused while a submission is in flight
    /// and after teardown.
    pub fn clear(&self) -> bool {
        let mut form = self.inner.form.lock();
        if form.torn_down {
            return false;
        }
        if form.state == SubmitState::Submitting {
            debug!(target: "regform::submit", "clear ignored; a submission is in flight");
            return false;
        }
        form.values.clear();
        form.errors.clear();
        form.previews.release_all();
        form.state = SubmitState::Idle;
        self.inner.status.reset();
        true
    }

    /// Component teardown: cancel the pending status hide and release every preview.
    /// Safe to call after a successful submission already released them. Afterwards edits
    /// are refused, new submits are ignored and an in-flight submission completes silently.
    pub fn teardown(&self) -> usize {
        let mut form = self.inner.form.lock();
        form.torn_down = true;
        self.inner.status.cancel_pending();
        let released = form.previews.release_all();
        debug!(target: "regform::submit", released, "form torn down");
        released
    }
}
