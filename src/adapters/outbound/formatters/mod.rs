/// Formatter adapters for diff and rebase report output
mod csv_formatter;
mod json_formatter;
mod table_formatter;

pub use csv_formatter::CsvDiffFormatter;
pub use json_formatter::{JsonDiffFormatter, JsonRebaseFormatter};
pub use table_formatter::{TableDiffFormatter, TableRebaseFormatter};
