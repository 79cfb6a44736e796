use crate::baseline::domain::{ControlRecord, PackId};
use crate::shared::Result;
use async_trait::async_trait;

/// ControlCatalog port for loading the controls of a content pack
///
/// This port abstracts the store the import subsystem writes normalized
/// control records into (JSON files, a database, an in-memory map).
///
/// # Async Support
/// Implementations must be `Send + Sync` so both packs of a comparison can be
/// loaded concurrently.
#[async_trait]
pub trait ControlCatalog: Send + Sync {
    /// Lists the controls recorded for a pack, in catalog order
    ///
    /// # Arguments
    /// * `pack_id` - Identifier of the content pack
    ///
    /// # Returns
    /// The pack's controls; an empty vector for an unknown or empty pack
    ///
    /// # Errors
    /// Returns an error only when the underlying storage cannot be read or
    /// holds malformed data. A missing pack is never an error.
    async fn list_controls(&self, pack_id: &PackId) -> Result<Vec<ControlRecord>>;
}
