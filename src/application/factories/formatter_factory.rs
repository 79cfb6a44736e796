use crate::adapters::outbound::formatters::{
    CsvDiffFormatter, JsonDiffFormatter, JsonRebaseFormatter, TableDiffFormatter,
    TableRebaseFormatter,
};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::{DiffFormatter, RebaseFormatter};
use crate::shared::error::BaselineError;
use crate::shared::Result;

/// Factory for creating diff and rebase report formatters
///
/// Selects the formatter adapter for an `OutputFormat`. `colored` only
/// affects table output.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter for a release diff
    ///
    /// # Examples
    /// ```
    /// use baseline_rebase::application::dto::OutputFormat;
    /// use baseline_rebase::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create_diff(OutputFormat::Csv, false);
    /// ```
    pub fn create_diff(format: OutputFormat, colored: bool) -> Box<dyn DiffFormatter> {
        match format {
            OutputFormat::Json => Box::new(JsonDiffFormatter::new()),
            OutputFormat::Csv => Box::new(CsvDiffFormatter::new()),
            OutputFormat::Table => Box::new(TableDiffFormatter::new(colored)),
        }
    }

    /// Creates a formatter for a rebase report
    ///
    /// # Errors
    /// `BaselineError::UnsupportedFormat` for CSV, which has no rebase layout
    pub fn create_rebase(format: OutputFormat, colored: bool) -> Result<Box<dyn RebaseFormatter>> {
        match format {
            OutputFormat::Json => Ok(Box::new(JsonRebaseFormatter::new())),
            OutputFormat::Table => Ok(Box::new(TableRebaseFormatter::new(colored))),
            OutputFormat::Csv => Err(BaselineError::UnsupportedFormat {
                format: format.to_string(),
                report: "rebase reports".to_string(),
            }
            .into()),
        }
    }

    /// Returns the progress message for the specified output format
    ///
    /// # Examples
    /// ```
    /// use baseline_rebase::application::dto::OutputFormat;
    /// use baseline_rebase::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputFormat::Csv);
    /// assert_eq!(message, "📝 Generating CSV output...");
    /// ```
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Json => "📝 Generating JSON output...",
            OutputFormat::Csv => "📝 Generating CSV output...",
            OutputFormat::Table => "📝 Generating table output...",
        }
    }
}
