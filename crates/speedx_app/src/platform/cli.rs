use std::path::PathBuf;

use clap::Parser;

use super::logging::LogDestination;

/// SpeedX - website performance analyzer
#[derive(Parser, Debug)]
#[command(name = "speedx", version, about = "Website performance analyzer")]
pub struct Cli {
    /// Website to analyze once. Starts an interactive session when omitted.
    pub url: Option<String>,

    /// Path to the RON configuration file
    #[arg(short, long, default_value = "speedx.ron")]
    pub config: PathBuf,

    /// Origin of the analysis service, overriding the configuration file
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Give up on a request after this many seconds (waits indefinitely by default)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_interactive_with_file_logging() {
        let cli = Cli::try_parse_from(["speedx"]).unwrap();
        assert_eq!(cli.url, None);
        assert_eq!(cli.config, PathBuf::from("speedx.ron"));
        assert_eq!(cli.endpoint, None);
        assert_eq!(cli.timeout_secs, None);
        assert_eq!(cli.log, LogDestination::File);
        assert!(!cli.verbose);
    }

    #[test]
    fn parses_one_shot_with_overrides() {
        let cli = Cli::try_parse_from([
            "speedx",
            "--endpoint",
            "http://localhost:5000",
            "--timeout-secs",
            "30",
            "--log",
            "both",
            "https://example.com",
        ])
        .unwrap();
        assert_eq!(cli.url.as_deref(), Some("https://example.com"));
        assert_eq!(cli.endpoint.as_deref(), Some("http://localhost:5000"));
        assert_eq!(cli.timeout_secs, Some(30));
        assert_eq!(cli.log, LogDestination::Both);
    }

    #[test]
    fn rejects_unknown_log_destination() {
        assert!(Cli::try_parse_from(["speedx", "--log", "syslog"]).is_err());
    }
}
