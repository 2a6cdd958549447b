use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use clap::Parser;
use speedx_core::{update, AppState, ContentView, Effect, Msg, Status};
use speedx_engine::EngineHandle;
use speedx_logging::{speedx_debug, speedx_info};

use super::cli::Cli;
use super::config::{load_config, resolve_settings};
use super::effects::EffectRunner;
use super::{logging, ui};

pub fn run_app() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::initialize(cli.log, cli.verbose);

    let config = load_config(&cli.config);
    let settings = resolve_settings(&cli, &config).context("invalid analysis endpoint")?;
    speedx_info!("Analysis endpoint {}", settings.endpoint);

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(EngineHandle::new(settings), msg_tx.clone());
    let stdout = io::stdout();

    match cli.url {
        Some(url) => {
            // One-shot: submit, wait for the outcome, then quit.
            for msg in [Msg::UrlChanged(url), Msg::AnalyzeClicked, Msg::QuitRequested] {
                let _ = msg_tx.send(msg);
            }
            let state = EventLoop::new(runner, stdout.lock()).run(msg_rx)?;
            Ok(match state.session().status() {
                Status::Success => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            })
        }
        None => {
            let mut out = stdout.lock();
            write_lines(&mut out, &ui::layout::banner_lines())?;
            spawn_input_reader(msg_tx);
            EventLoop::new(runner, out).run(msg_rx)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Reads one url per line. `:q`, `:quit` or end of input ends the session.
fn spawn_input_reader(msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            if matches!(input, ":q" | ":quit") {
                break;
            }
            let sent = msg_tx
                .send(Msg::UrlChanged(input.to_string()))
                .and_then(|()| msg_tx.send(Msg::AnalyzeClicked));
            if sent.is_err() {
                return;
            }
        }
        let _ = msg_tx.send(Msg::QuitRequested);
    });
}

/// Owns the session. Every message is applied here, on one thread.
struct EventLoop<W: Write> {
    state: AppState,
    runner: EffectRunner,
    out: W,
    last_rendered: Option<ContentView>,
    quitting: bool,
}

impl<W: Write> EventLoop<W> {
    fn new(runner: EffectRunner, out: W) -> Self {
        Self {
            state: AppState::new(),
            runner,
            out,
            last_rendered: None,
            quitting: false,
        }
    }

    /// Runs until quit was requested and no request is outstanding.
    fn run(mut self, msg_rx: mpsc::Receiver<Msg>) -> io::Result<AppState> {
        while let Ok(msg) = msg_rx.recv() {
            self.dispatch_msg(msg)?;
            if self.quitting && self.state.outstanding() == 0 {
                break;
            }
        }
        Ok(self.state)
    }

    fn dispatch_msg(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        if effects.contains(&Effect::Quit) {
            speedx_debug!(
                "Quit requested with {} request(s) outstanding",
                self.state.outstanding()
            );
            self.quitting = true;
        }
        self.runner.enqueue(effects);

        if was_dirty {
            self.render()?;
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        let view = self.state.view();
        if self.last_rendered.as_ref() == Some(&view.content) {
            return Ok(());
        }
        write_lines(&mut self.out, &ui::render::render(&view))?;
        self.last_rendered = Some(view.content);
        Ok(())
    }
}

fn write_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use serde_json::json;
    use speedx_engine::{AnalyzeError, Analyzer, FailureKind, Metrics};

    use super::*;

    /// Answers by url: the slow site is rejected late, the crash site panics,
    /// everything else succeeds at once.
    struct ScriptedAnalyzer;

    #[async_trait::async_trait]
    impl Analyzer for ScriptedAnalyzer {
        async fn analyze(&self, url: &str) -> Result<Metrics, AnalyzeError> {
            match url {
                "https://slow.example" => {
                    tokio::time::sleep(Duration::from_millis(300)).await;
                    Err(AnalyzeError {
                        kind: FailureKind::HttpStatus {
                            status: 400,
                            error: Some("Invalid URL".to_string()),
                        },
                    })
                }
                "https://crash.example" => panic!("analyzer crashed"),
                "https://down.example" => Err(AnalyzeError {
                    kind: FailureKind::Network,
                }),
                _ => Ok(json!({"performance": 90, "ttfb": 120})
                    .as_object()
                    .cloned()
                    .unwrap_or_default()),
            }
        }
    }

    fn run_session(msgs: Vec<Msg>) -> (AppState, Vec<String>) {
        let (msg_tx, msg_rx) = mpsc::channel();
        let engine = EngineHandle::with_analyzer(Arc::new(ScriptedAnalyzer));
        let runner = EffectRunner::new(engine, msg_tx.clone());
        for msg in msgs {
            msg_tx.send(msg).unwrap();
        }

        let mut out = Vec::new();
        let state = EventLoop::new(runner, &mut out).run(msg_rx).unwrap();
        let lines = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect();
        (state, lines)
    }

    #[test]
    fn one_shot_success_renders_metrics() {
        let (state, lines) = run_session(vec![
            Msg::UrlChanged("https://example.com".to_string()),
            Msg::AnalyzeClicked,
            Msg::QuitRequested,
        ]);

        assert_eq!(state.session().status(), Status::Success);
        assert_eq!(
            lines,
            vec![
                "Analyzing...",
                "Performance Metrics",
                "Performance Score: 90",
                "Time to First Byte (TTFB): 120",
            ]
        );
    }

    #[test]
    fn transport_failure_renders_fixed_message() {
        let (state, lines) = run_session(vec![
            Msg::UrlChanged("https://down.example".to_string()),
            Msg::AnalyzeClicked,
            Msg::QuitRequested,
        ]);

        assert_eq!(state.session().status(), Status::Failure);
        assert_eq!(
            lines,
            vec!["Analyzing...", "Failed to analyze the website."]
        );
    }

    #[test]
    fn crashed_analysis_does_not_leave_session_loading() {
        let (state, lines) = run_session(vec![
            Msg::UrlChanged("https://crash.example".to_string()),
            Msg::AnalyzeClicked,
            Msg::QuitRequested,
        ]);

        assert_eq!(state.outstanding(), 0);
        assert_eq!(state.session().status(), Status::Failure);
        assert_eq!(
            lines,
            vec!["Analyzing...", "Failed to analyze the website."]
        );
    }

    // Documented behaviour: overlapping submissions are not cancelled and the
    // response that resolves last decides the final state.
    #[test]
    fn late_resolving_request_overwrites_newer_result() {
        let (state, lines) = run_session(vec![
            Msg::UrlChanged("https://slow.example".to_string()),
            Msg::AnalyzeClicked,
            Msg::UrlChanged("https://fast.example".to_string()),
            Msg::AnalyzeClicked,
            Msg::QuitRequested,
        ]);

        assert_eq!(state.outstanding(), 0);
        assert_eq!(state.session().status(), Status::Failure);
        assert_eq!(state.session().error(), Some("Invalid URL"));
        assert_eq!(state.session().url(), "https://fast.example");
        assert_eq!(
            lines,
            vec![
                "Analyzing...",
                "Performance Metrics",
                "Performance Score: 90",
                "Time to First Byte (TTFB): 120",
                "Invalid URL",
            ]
        );
    }
}
