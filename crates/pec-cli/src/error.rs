//! CLI exit codes.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Configuration error (bad flags, bad config file)
//! - 2: Failure while running (state or internal error, output error)

use std::process::ExitCode;

use pec_core::PecError;

/// Exit codes for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CliExitCode {
    /// Completed normally
    Success = 0,
    /// Invalid configuration; nothing was run
    ConfigError = 1,
    /// Run started but failed
    Failure = 2,
}

impl From<CliExitCode> for ExitCode {
    fn from(code: CliExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

impl From<CliExitCode> for i32 {
    fn from(code: CliExitCode) -> Self {
        code as i32
    }
}

impl From<&PecError> for CliExitCode {
    fn from(err: &PecError) -> Self {
        match err {
            PecError::Config(_) => CliExitCode::ConfigError,
            PecError::State(_) | PecError::Internal(_) => CliExitCode::Failure,
        }
    }
}
