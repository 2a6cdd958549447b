#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input.
    UrlChanged(String),
    /// User submitted the current URL for analysis.
    AnalyzeClicked,
    /// Engine completion for a request.
    AnalysisFinished {
        request_id: crate::RequestId,
        outcome: crate::AnalysisOutcome,
    },
    /// User asked to leave the session.
    QuitRequested,
}
