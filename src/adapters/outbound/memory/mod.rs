/// In-memory adapters for embedding the engine and for tests
mod control_catalog;
mod overlay_store;

pub use control_catalog::InMemoryControlCatalog;
pub use overlay_store::InMemoryOverlayStore;
