use speedx_core::{AppViewModel, ContentView};

use super::constants::*;

/// Text lines for the result area. Empty content renders nothing.
pub fn render(view: &AppViewModel) -> Vec<String> {
    match &view.content {
        ContentView::Empty => Vec::new(),
        ContentView::Loading => vec![LOADING_TEXT.to_string()],
        ContentView::Metrics(cards) => {
            let mut lines = Vec::with_capacity(cards.len() + 1);
            lines.push(METRICS_HEADER.to_string());
            lines.extend(
                cards
                    .iter()
                    .map(|card| format!("{}: {}", card.label, card.value_text())),
            );
            lines
        }
        ContentView::Error(message) => vec![message.clone()],
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use speedx_core::{update, AnalysisOutcome, AppState, Msg};

    use super::*;

    fn finished(outcome: AnalysisOutcome) -> AppViewModel {
        let (state, _) = update(AppState::new(), Msg::AnalyzeClicked);
        let (state, _) = update(
            state,
            Msg::AnalysisFinished {
                request_id: 1,
                outcome,
            },
        );
        state.view()
    }

    #[test]
    fn initial_view_renders_nothing() {
        assert!(render(&AppState::new().view()).is_empty());
    }

    #[test]
    fn loading_view_renders_indicator() {
        let (state, _) = update(AppState::new(), Msg::AnalyzeClicked);
        assert_eq!(render(&state.view()), vec!["Analyzing...".to_string()]);
    }

    #[test]
    fn metrics_render_one_line_per_card() {
        let metrics = json!({"performance": 90, "ttfb": 120, "server": "nginx"})
            .as_object()
            .cloned()
            .unwrap();
        let lines = render(&finished(AnalysisOutcome::Completed(metrics)));

        assert_eq!(
            lines,
            vec![
                "Performance Metrics".to_string(),
                "Performance Score: 90".to_string(),
                "Time to First Byte (TTFB): 120".to_string(),
                "server: nginx".to_string(),
            ]
        );
    }

    #[test]
    fn error_renders_message_verbatim() {
        let lines = render(&finished(AnalysisOutcome::Rejected {
            status: 400,
            error: Some("Invalid URL".to_string()),
        }));
        assert_eq!(lines, vec!["Invalid URL".to_string()]);
    }
}
