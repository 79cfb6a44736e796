/// Filesystem adapters: data-dir backed catalog and overlay store, report output
mod file_writer;
mod overlay_store;
mod pack_catalog;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use overlay_store::{FileSystemOverlayStore, OVERLAYS_DIR};
pub use pack_catalog::{FileSystemCatalog, PACKS_DIR};
