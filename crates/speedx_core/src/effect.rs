#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one analysis call for `url`. Completion comes back as `Msg::AnalysisFinished`.
    Analyze {
        request_id: crate::RequestId,
        url: String,
    },
    Quit,
}
