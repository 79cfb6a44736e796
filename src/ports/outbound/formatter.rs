use crate::baseline::domain::{RebaseReport, ReleaseDiff};
use crate::shared::Result;

/// DiffFormatter port for rendering a release comparison
///
/// Implementations render one row per control diff item (JSON, CSV, table).
pub trait DiffFormatter {
    /// Formats a release diff
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, diff: &ReleaseDiff) -> Result<String>;
}

/// RebaseFormatter port for rendering a rebase report for operator review
pub trait RebaseFormatter {
    /// Formats a rebase report
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, report: &RebaseReport) -> Result<String>;
}
