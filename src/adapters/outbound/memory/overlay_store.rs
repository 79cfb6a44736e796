use crate::baseline::domain::{Overlay, OverlayDraft, OverlayId};
use crate::ports::outbound::OverlayStore;
use crate::shared::Result;
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;

/// InMemoryOverlayStore adapter keeping overlays in a shared concurrent map
#[derive(Clone, Default)]
pub struct InMemoryOverlayStore {
    overlays: Arc<DashMap<OverlayId, Overlay>>,
}

impl InMemoryOverlayStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an overlay under its own id, e.g. one authored elsewhere
    pub fn insert(&self, overlay: Overlay) {
        self.overlays.insert(overlay.id.clone(), overlay);
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}

#[async_trait]
impl OverlayStore for InMemoryOverlayStore {
    async fn get(&self, overlay_id: &OverlayId) -> Result<Option<Overlay>> {
        Ok(self.overlays.get(overlay_id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, draft: OverlayDraft) -> Result<Overlay> {
        let mut id = OverlayId::generate();
        while self.overlays.contains_key(&id) {
            id = OverlayId::generate();
        }
        let overlay = draft.into_overlay(id, Utc::now());
        self.overlays.insert(overlay.id.clone(), overlay.clone());
        Ok(overlay)
    }
}
