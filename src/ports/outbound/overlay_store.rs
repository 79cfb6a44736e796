use crate::baseline::domain::{Overlay, OverlayDraft, OverlayId};
use crate::shared::Result;
use async_trait::async_trait;

/// OverlayStore port for reading and persisting overlays
///
/// Overlays are immutable: the store never updates one in place. Saving
/// always creates a new overlay and the store allocates its identifier.
#[async_trait]
pub trait OverlayStore: Send + Sync {
    /// Fetches an overlay by id
    ///
    /// # Returns
    /// `None` when no overlay has that id
    ///
    /// # Errors
    /// Returns an error if the storage is unreachable or the stored overlay is malformed
    async fn get(&self, overlay_id: &OverlayId) -> Result<Option<Overlay>>;

    /// Persists a new overlay
    ///
    /// # Arguments
    /// * `draft` - Overlay content; the caller does not pre-allocate an id
    ///
    /// # Returns
    /// The stored overlay, carrying its freshly allocated id and creation time
    async fn save(&self, draft: OverlayDraft) -> Result<Overlay>;
}
