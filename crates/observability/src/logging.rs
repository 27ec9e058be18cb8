//! Tracing subscriber initialization.
//!
//! Filtering comes from `RUST_LOG` (default `info`); output format from
//! `LOG_FORMAT` (`json`, the default, or `pretty`).

use std::str::FromStr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown log format '{0}' (expected 'json' or 'pretty')")]
pub struct UnknownLogFormat(String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            other => Err(UnknownLogFormat(other.to_string())),
        }
    }
}

/// Initialize tracing using `LOG_FORMAT` from the environment.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let format = match std::env::var("LOG_FORMAT") {
        Ok(raw) => raw.parse().unwrap_or_else(|e: UnknownLogFormat| {
            eprintln!("{e}; falling back to json");
            LogFormat::Json
        }),
        Err(_) => LogFormat::default(),
    };
    init_with(format);
}

pub fn init_with(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime);

    let _ = match format {
        LogFormat::Json => builder.json().with_target(false).try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };

    tracing::debug!(?format, "tracing initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_formats() {
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!(" Pretty ".parse::<LogFormat>(), Ok(LogFormat::Pretty));
        assert_eq!("text".parse::<LogFormat>(), Ok(LogFormat::Pretty));
    }

    #[test]
    fn rejects_unknown_formats() {
        let err = "xml".parse::<LogFormat>().unwrap_err();
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_with(LogFormat::Pretty);
        init_with(LogFormat::Json);
    }
}
