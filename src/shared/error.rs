use std::fmt;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems and wrapper scripts to distinguish
/// between argument problems and report-load failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the report was loaded and the query ran
    Success = 0,
    /// The report payload could not be loaded (absent, undecodable, or unparsable)
    LoadFailed = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::LoadFailed => write!(f, "Load Failed (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
        }
    }
}

/// Pipeline-fatal errors raised while loading a scan report.
///
/// All three variants abort the load; no partial model is ever produced.
/// The decode variant is deliberately coarse: a malformed Base64 run and a
/// corrupt gzip stream are indistinguishable to the operator, who can only
/// regenerate the report either way.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The document still contains the unexpanded report placeholder,
    /// detected by its exact length before any decode attempt.
    #[error("No scan results are embedded in this document")]
    DataAbsent,

    /// The payload's content type is unsupported, or Base64/gzip/UTF-8
    /// decoding failed.
    #[error("Failed to decode the embedded report payload")]
    Decode,

    /// The decoded payload is not a valid report document.
    #[error("Failed to parse the report document: {details}")]
    Parse { details: String },
}
