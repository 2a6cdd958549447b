use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use speedx_logging::{speedx_error, speedx_info, speedx_warn};

use crate::{
    AnalyzeError, AnalyzeSettings, Analyzer, EngineEvent, FailureKind, ReqwestAnalyzer, RequestId,
};

enum EngineCommand {
    Analyze { request_id: RequestId, url: String },
}

/// Runs analysis calls on a background tokio runtime.
///
/// Every submitted request gets its own task. Nothing is cancelled when a newer
/// request is submitted, so completions arrive in resolution order. Every
/// submission produces exactly one completion, including when the runtime could
/// not start or the analysis task panicked.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: AnalyzeSettings) -> Self {
        Self::with_analyzer(Arc::new(ReqwestAnalyzer::new(settings)))
    }

    pub fn with_analyzer(analyzer: Arc<dyn Analyzer>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let engine_tx = event_tx.clone();
        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    speedx_error!("Failed to start engine runtime: {}", err);
                    // Keep answering so no submission waits forever.
                    while let Ok(EngineCommand::Analyze { request_id, .. }) = cmd_rx.recv() {
                        let _ = engine_tx.send(lost_completion(request_id));
                    }
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let analyzer = analyzer.clone();
                let event_tx = engine_tx.clone();
                runtime.spawn(handle_command(analyzer, command, event_tx));
            }
        });

        Self {
            cmd_tx,
            event_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn submit(&self, request_id: RequestId, url: impl Into<String>) {
        let command = EngineCommand::Analyze {
            request_id,
            url: url.into(),
        };
        if self.cmd_tx.send(command).is_err() {
            speedx_error!("Engine stopped; request {} not issued", request_id);
            let _ = self.event_tx.send(lost_completion(request_id));
        }
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }

    /// Blocks until the next completion.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv().ok()
    }
}

fn lost_completion(request_id: RequestId) -> EngineEvent {
    EngineEvent::AnalysisCompleted {
        request_id,
        result: Err(AnalyzeError::new(FailureKind::Network)),
    }
}

async fn handle_command(
    analyzer: Arc<dyn Analyzer>,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Analyze { request_id, url } => {
            let task = tokio::spawn(async move { analyzer.analyze(&url).await });
            let result = match task.await {
                Ok(result) => result,
                Err(err) => {
                    speedx_error!("Request {} ended without a result: {}", request_id, err);
                    Err(AnalyzeError::new(FailureKind::Network))
                }
            };
            match &result {
                Ok(metrics) => speedx_info!(
                    "Request {} completed with {} metrics",
                    request_id,
                    metrics.len()
                ),
                Err(err) => speedx_warn!("Request {} failed: {}", request_id, err.kind),
            }
            let _ = event_tx.send(EngineEvent::AnalysisCompleted { request_id, result });
        }
    }
}
