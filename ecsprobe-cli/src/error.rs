//! CLI-specific error types and exit code mapping

use ecsprobe_core::error::{ProbeError, SetupError};

/// CLI-specific error type.
///
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// The run completed but at least one check failed.
    #[error("{failed} of {total} checks failed")]
    ChecksFailed { failed: usize, total: usize },

    /// Inputs or credentials were unusable; no check ran.
    #[error("setup error: {0}")]
    Setup(#[from] SetupError),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from ecsprobe-core.
    #[error("{0}")]
    Core(#[from] ProbeError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                      |
    /// |------|------------------------------|
    /// | 0    | Success                      |
    /// | 1    | Check failed                 |
    /// | 2    | Configuration error          |
    /// | 3    | Setup error                  |
    /// | 4    | Command or rendering error   |
    /// | 10   | IO error                     |
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::Setup(_) => 3,
            Self::Io(_) => 10,
            Self::Core(ProbeError::Config(_)) => 2,
            Self::Core(ProbeError::Setup(_)) => 3,
            Self::Core(ProbeError::Io(_)) => 10,
            Self::ChecksFailed { .. } => 1,
            Self::JsonSerialize(_) | Self::Command(_) => 4,
        }
    }
}
