use serde::Serialize;
use std::fmt;

/// Logging verbosity chosen by `--verbose` / `--quiet`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only errors.
    Quiet,
    #[default]
    Normal,
    /// Errors, warnings and debug messages.
    Verbose,
}

impl LogLevel {
    /// `tracing_subscriber::EnvFilter` directive for this level.
    pub fn filter_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "info",
            Self::Verbose => "debug",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Quiet => "quiet",
            Self::Normal => "normal",
            Self::Verbose => "verbose",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_widen_with_verbosity() {
        assert_eq!(LogLevel::Quiet.filter_directive(), "error");
        assert_eq!(LogLevel::default().filter_directive(), "info");
        assert_eq!(LogLevel::Verbose.filter_directive(), "debug");
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&LogLevel::Verbose).unwrap(),
            "\"verbose\""
        );
    }
}
