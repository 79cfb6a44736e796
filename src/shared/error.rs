use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// CI pipelines branch on these to tell a rebase that needs operator
/// attention apart from a tool failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// `--apply` was requested but the rebase still has blocking conflicts
    BlockingConflicts = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (missing overlay, parse error, file I/O error, etc.)
    ApplicationError = 3,
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
            ExitCode::BlockingConflicts => write!(f, "Blocking Conflicts (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for baseline diffing and overlay rebasing.
///
/// Business conditions the caller is expected to branch on (missing pack,
/// missing overlay during rebase computation) are values, not errors. Only
/// misuse and I/O failures end up here.
#[derive(Debug, Error)]
pub enum BaselineError {
    #[error("Failed to parse content pack: {path}\nDetails: {details}\n\n💡 Hint: Content packs must be JSON documents with a \"controls\" array")]
    PackParseError { path: PathBuf, details: String },

    #[error("Failed to parse overlay: {path}\nDetails: {details}\n\n💡 Hint: The overlay file may have been edited by hand; restore it from the overlay store")]
    OverlayParseError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid data directory: {path}\nReason: {reason}\n\n💡 Hint: Point --data-dir at the directory holding packs/ and overlays/")]
    InvalidDataDir { path: PathBuf, reason: String },

    #[error("Invalid pack id '{pack_id}': {reason}")]
    InvalidPackId { pack_id: String, reason: String },

    #[error("Invalid overlay id '{overlay_id}': {reason}")]
    InvalidOverlayId { overlay_id: String, reason: String },

    /// Validation error for domain constructors and configuration
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Overlay '{overlay_id}' not found\n\n💡 Hint: List the overlay store directory to find the correct overlay id")]
    OverlayNotFound { overlay_id: String },

    #[error("Cannot apply rebase: {count} blocking conflict(s) remain\n\n💡 Hint: Resolve the conflicting overrides in the source overlay and compute the rebase again")]
    BlockingConflicts { count: usize },

    #[error("Cannot apply rebase: the report did not complete ({reason})")]
    RebaseNotComputed { reason: String },

    #[error("Cannot apply rebase: report was computed for overlay '{report_overlay_id}', not '{overlay_id}'")]
    ReportOverlayMismatch {
        overlay_id: String,
        report_overlay_id: String,
    },

    #[error("Overlay store returned the source overlay id '{overlay_id}' for a rebased overlay; the source overlay may have been replaced\n\n💡 Hint: Restore overlay '{overlay_id}' from a backup and check that the store allocates a fresh id on every save")]
    OverlayIdReused { overlay_id: String },

    #[error("Output format '{format}' is not supported for {report}")]
    UnsupportedFormat { format: String, report: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
