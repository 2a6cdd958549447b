use std::sync::mpsc;
use std::thread;

use speedx_core::{AnalysisOutcome, Effect, Msg};
use speedx_engine::{AnalyzeError, EngineEvent, EngineHandle, FailureKind, Metrics};
use speedx_logging::speedx_debug;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, msg_tx: mpsc::Sender<Msg>) -> Self {
        let runner = Self { engine };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Analyze { request_id, url } => {
                    speedx_debug!("Submitting request {}", request_id);
                    self.engine.submit(request_id, url);
                }
                Effect::Quit => {
                    // handled by the event loop
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || {
            while let Some(event) = engine.recv() {
                match event {
                    EngineEvent::AnalysisCompleted { request_id, result } => {
                        let msg = Msg::AnalysisFinished {
                            request_id,
                            outcome: map_result(result),
                        };
                        if msg_tx.send(msg).is_err() {
                            break;
                        }
                    }
                }
            }
            speedx_debug!("Engine event loop stopped");
        });
    }
}

/// Maps an engine result onto what the state machine distinguishes.
pub fn map_result(result: Result<Metrics, AnalyzeError>) -> AnalysisOutcome {
    match result {
        Ok(metrics) => AnalysisOutcome::Completed(metrics),
        Err(err) => match err.kind {
            FailureKind::HttpStatus { status, error } => AnalysisOutcome::Rejected { status, error },
            FailureKind::Network | FailureKind::Timeout | FailureKind::InvalidBody => {
                AnalysisOutcome::TransportFailed
            }
        },
    }
}
