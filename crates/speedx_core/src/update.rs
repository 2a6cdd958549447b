use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::UrlChanged(url) => {
            state.set_url(url);
            Vec::new()
        }
        Msg::AnalyzeClicked => {
            // The session is InProgress before the effect leaves this function, so the
            // request is always registered before its completion can be applied.
            // Earlier outstanding requests are not cancelled.
            let (request_id, url) = state.begin_request();
            vec![Effect::Analyze { request_id, url }]
        }
        Msg::AnalysisFinished {
            request_id,
            outcome,
        } => {
            state.apply_outcome(request_id, outcome);
            Vec::new()
        }
        Msg::QuitRequested => vec![Effect::Quit],
    };

    (state, effects)
}
