/// Mock implementations for testing
mod mock_control_catalog;
mod mock_overlay_store;
mod mock_progress_reporter;

pub use mock_control_catalog::MockControlCatalog;
pub use mock_overlay_store::MockOverlayStore;
pub use mock_progress_reporter::MockProgressReporter;
