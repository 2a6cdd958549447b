//! Terminal front-end: command line, configuration, logging and the event loop.
mod app;
mod cli;
mod config;
mod effects;
mod logging;
mod ui;

pub use app::run_app;
