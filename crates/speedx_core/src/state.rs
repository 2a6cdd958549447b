use std::collections::BTreeSet;

use serde_json::{Map, Value};
use speedx_logging::{speedx_debug, speedx_warn};
use thiserror::Error;

use crate::view_model::{content_view, AppViewModel};
use crate::AnalysisOutcome;

/// Metric key to value, in the order the backend sent them.
pub type Metrics = Map<String, Value>;

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Initial,
    InProgress,
    Success,
    Failure,
}

impl Status {
    /// Whether the lifecycle allows moving from `self` to `next`.
    ///
    /// `InProgress -> InProgress` is allowed because a submission may be made
    /// while another request is still outstanding.
    pub fn can_transition_to(self, next: Status) -> bool {
        matches!(
            (self, next),
            (_, Status::InProgress) | (Status::InProgress, Status::Success | Status::Failure)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot complete a request while session is {from:?}")]
    NotInProgress { from: Status },
}

/// The session record: what the user typed and where the last request stands.
///
/// `metrics` is present only in `Success`, `error` only in `Failure`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    url: String,
    status: Status,
    metrics: Option<Metrics>,
    error: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn metrics(&self) -> Option<&Metrics> {
        self.metrics.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replaces the url. Never touches the lifecycle.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    /// Enters `InProgress` from any status, dropping the previous result.
    pub fn begin_request(&mut self) {
        speedx_debug!("Session {:?} -> InProgress", self.status);
        self.error = None;
        self.metrics = None;
        self.status = Status::InProgress;
    }

    pub fn succeed(&mut self, metrics: Metrics) -> Result<(), TransitionError> {
        self.ensure_transition(Status::Success)?;
        speedx_debug!("Session InProgress -> Success ({} metrics)", metrics.len());
        self.metrics = Some(metrics);
        self.error = None;
        self.status = Status::Success;
        Ok(())
    }

    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), TransitionError> {
        self.ensure_transition(Status::Failure)?;
        let message = message.into();
        speedx_debug!("Session InProgress -> Failure ({})", message);
        self.error = Some(message);
        self.metrics = None;
        self.status = Status::Failure;
        Ok(())
    }

    fn ensure_transition(&self, next: Status) -> Result<(), TransitionError> {
        if self.status.can_transition_to(next) {
            Ok(())
        } else {
            Err(TransitionError::NotInProgress { from: self.status })
        }
    }
}

/// Session plus request bookkeeping for the message loop.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    session: SessionState,
    last_request_id: RequestId,
    outstanding: BTreeSet<RequestId>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Number of requests issued and not yet resolved.
    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            url: self.session.url().to_string(),
            status: self.session.status(),
            content: content_view(&self.session),
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_url(&mut self, url: String) {
        if self.session.url() != url {
            self.session.set_url(url);
            self.mark_dirty();
        }
    }

    /// Moves the session to `InProgress` and registers a new request for the current url.
    pub(crate) fn begin_request(&mut self) -> (RequestId, String) {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.outstanding.insert(request_id);
        self.session.begin_request();
        self.mark_dirty();
        (request_id, self.session.url().to_string())
    }

    pub(crate) fn apply_outcome(&mut self, request_id: RequestId, outcome: AnalysisOutcome) {
        if !self.outstanding.remove(&request_id) {
            speedx_warn!(
                "Ignoring completion for request {} which is not outstanding",
                request_id
            );
            return;
        }

        if self.session.status() != Status::InProgress {
            // An overlapping request resolved first. The later resolution still wins.
            speedx_warn!(
                "Request {} resolved after the session became {:?}; replacing result",
                request_id,
                self.session.status()
            );
            self.session.begin_request();
        }

        let applied = match outcome.into_result() {
            Ok(metrics) => self.session.succeed(metrics),
            Err(message) => self.session.fail(message),
        };
        if let Err(err) = applied {
            speedx_warn!("Request {} not applied: {}", request_id, err);
            return;
        }
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
