//! SpeedX engine: the outbound analysis call and its background runner.
mod analyze;
mod engine;
mod types;

pub use analyze::{AnalyzeSettings, Analyzer, ReqwestAnalyzer, DEFAULT_ORIGIN};
pub use engine::EngineHandle;
pub use types::{AnalyzeError, EngineEvent, FailureKind, Metrics, RequestId, SettingsError};
