/// ProgressReporter port for operator-facing progress messages
///
/// Messages go to stderr in the CLI so they never mix with formatted
/// output on stdout.
pub trait ProgressReporter: Send + Sync {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports progress through a counted sequence of steps
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a warning or error message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
