/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces the application core uses to reach
/// the control catalog, the overlay store and the output channels.
pub mod control_catalog;
pub mod formatter;
pub mod output_presenter;
pub mod overlay_store;
pub mod progress_reporter;

pub use control_catalog::ControlCatalog;
pub use formatter::{DiffFormatter, RebaseFormatter};
pub use output_presenter::OutputPresenter;
pub use overlay_store::OverlayStore;
pub use progress_reporter::ProgressReporter;
