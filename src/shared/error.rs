use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// A user who cancels at the product menu, and any list-only run, exits
/// with `Success`. Every fatal replication, parse, privilege or install
/// failure exits with `Failure` (-1, reported by the shell as 255).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Completed, listed, or cancelled by the operator
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Fatal error (replication, parsing, privileges, external tools)
    Failure = -1,
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
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::Failure => write!(f, "Failure (-1)"),
        }
    }
}

/// A non-success outcome reported by the download transport.
///
/// `http_status` is only present when the transport was able to report
/// the HTTP status code of the failed transfer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub http_status: Option<u16>,
    pub message: String,
}

impl TransportError {
    pub fn new(http_status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            http_status,
            message: message.into(),
        }
    }

    pub fn with_status(status: u16) -> Self {
        Self::new(Some(status), format!("HTTP status {}", status))
    }

    pub fn is_status(&self, status: u16) -> bool {
        self.http_status == Some(status)
    }
}

/// Application-specific errors.
///
/// The variants separate the error kinds the tools care about: transport
/// failures (`Replication`), fatal catalog problems (`CatalogParse`),
/// recoverable auxiliary file problems (`PlistParse`, `DistributionParse`),
/// external tool failures and operator errors.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Could not replicate {url}: {source}")]
    Replication {
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("Error reading catalog {path}\nDetails: {details}\n\n💡 Hint: Use --ignore-cache to download a fresh copy of the catalog")]
    CatalogParse { path: PathBuf, details: String },

    #[error("Error reading {path}: {details}")]
    PlistParse { path: PathBuf, details: String },

    #[error("Invalid distribution file {path}: {details}")]
    DistributionParse { path: PathBuf, details: String },

    #[error("{tool} failed: {details}")]
    ExternalTool { tool: String, details: String },

    #[error("Filesystem error at {path}: {source}")]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid path: {path}\nReason: {reason}")]
    InvalidPath { path: PathBuf, reason: String },

    #[error("{reason}\n\n💡 Hint: Please run again with sudo or as root")]
    Privilege { reason: String },

    #[error("Could not determine a catalog URL: {reason}")]
    NoCatalogUrl { reason: String },

    #[error("No macOS installer products found in the sucatalog.")]
    NoProducts,

    #[error("Selection error: {message}")]
    Selection { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl FetchError {
    pub fn external_tool(tool: impl Into<String>, details: impl Into<String>) -> Self {
        FetchError::ExternalTool {
            tool: tool.into(),
            details: details.into(),
        }
    }

    /// Returns true for transport failures, which callers fetching optional
    /// auxiliary files may log and skip.
    pub fn is_replication(&self) -> bool {
        matches!(self, FetchError::Replication { .. })
    }
}
