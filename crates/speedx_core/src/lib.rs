//! SpeedX core: pure request-lifecycle state machine and view-model helpers.
mod effect;
mod labels;
mod msg;
mod outcome;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use labels::{metric_label, METRIC_LABELS};
pub use msg::Msg;
pub use outcome::{AnalysisOutcome, FALLBACK_ERROR_MESSAGE};
pub use state::{AppState, Metrics, RequestId, SessionState, Status, TransitionError};
pub use update::update;
pub use view_model::{content_view, AppViewModel, ContentView, MetricCard};
