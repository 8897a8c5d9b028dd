//! Diagnostics config.
//!
//! Command output always goes to stdout; these settings only shape what the
//! CLI writes to stderr.

use clap::{ArgAction, Args};

/// Noisy HTTP stack targets kept at `warn` unless a filter says otherwise.
const QUIET_DEPENDENCIES: &str = "hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn";

/// How diagnostics are rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// One line per event.
    Compact,

    /// One JSON object per event, for piping into log tooling.
    Json,
}

/// Diagnostics settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Raise diagnostics verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Filter directives overriding --verbose, e.g. `storefront=debug`
    #[arg(long, env = "STOREFRONT_LOG")]
    pub log_filter: Option<String>,

    /// Diagnostics format
    #[arg(long, env = "STOREFRONT_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl LoggingConfig {
    /// Level implied by `--verbose`. Warnings only by default.
    pub fn level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Filter directives for the subscriber.
    pub fn directives(&self) -> String {
        match &self.log_filter {
            Some(filter) => filter.clone(),
            None => format!("{},{QUIET_DEPENDENCIES}", self.level()),
        }
    }
}
