//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent
//! formatting and actionable hints for precondition failures.

use std::fmt;
use std::process;

use onefix::acquisition::{FailureReason, RequestError};

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Invalid acquisition request options
    Request(RequestError),
    /// Acquisition resolved with a precondition failure
    Acquisition(FailureReason),
    /// Acquisition cancelled by the timeout before a fix qualified
    TimedOut { secs: u64 },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Acquisition(FailureReason::PermissionDenied) => {
                eprintln!();
                eprintln!("Grant both fine and coarse location permission, then retry.");
            }
            CliError::Acquisition(FailureReason::ProviderUnavailable) => {
                eprintln!();
                eprintln!("Enable the GPS provider in the host location settings, then retry.");
            }
            CliError::TimedOut { .. } => {
                eprintln!();
                eprintln!("Try a longer --timeout-secs or a looser --accuracy-meters threshold.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Request(e) => write!(f, "Invalid request: {}", e),
            CliError::Acquisition(reason) => write!(f, "Acquisition failed: {}", reason),
            CliError::TimedOut { secs } => {
                write!(f, "No qualifying fix within {} seconds", secs)
            }
        }
    }
}

impl From<RequestError> for CliError {
    fn from(e: RequestError) -> Self {
        CliError::Request(e)
    }
}
