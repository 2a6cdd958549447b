use crate::Metrics;

/// Message shown for every failure that carries no usable server text.
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to analyze the website.";

/// What came back from one analysis call, as seen by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// 2xx response with a JSON object body.
    Completed(Metrics),
    /// Non-2xx response with a JSON body. `error` is the body's `error` field if it was a string.
    Rejected { status: u16, error: Option<String> },
    /// No usable response: connection failure or a body that could not be parsed.
    TransportFailed,
}

impl AnalysisOutcome {
    /// Splits the outcome into metrics or the user-facing error message.
    pub fn into_result(self) -> Result<Metrics, String> {
        match self {
            AnalysisOutcome::Completed(metrics) => Ok(metrics),
            AnalysisOutcome::Rejected {
                error: Some(error), ..
            } if !error.is_empty() => Err(error),
            AnalysisOutcome::Rejected { .. } | AnalysisOutcome::TransportFailed => {
                Err(FALLBACK_ERROR_MESSAGE.to_string())
            }
        }
    }
}
