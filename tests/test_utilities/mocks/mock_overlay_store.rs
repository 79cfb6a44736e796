use async_trait::async_trait;
use baseline_rebase::prelude::*;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock OverlayStore that records every save
///
/// `reuse_ids` makes `save` hand back the draft's parent id, to exercise the
/// guard against a store that does not allocate fresh identifiers.
pub struct MockOverlayStore {
    pub overlays: Arc<Mutex<HashMap<OverlayId, Overlay>>>,
    pub saved: Arc<Mutex<Vec<OverlayDraft>>>,
    pub should_fail: bool,
    pub reuse_ids: bool,
}

impl MockOverlayStore {
    pub fn new() -> Self {
        Self {
            overlays: Arc::new(Mutex::new(HashMap::new())),
            saved: Arc::new(Mutex::new(Vec::new())),
            should_fail: false,
            reuse_ids: false,
        }
    }

    pub fn with_overlay(self, overlay: Overlay) -> Self {
        self.overlays
            .lock()
            .unwrap()
            .insert(overlay.id.clone(), overlay);
        self
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    pub fn reusing_ids(mut self) -> Self {
        self.reuse_ids = true;
        self
    }

    pub fn save_count(&self) -> usize {
        self.saved.lock().unwrap().len()
    }
}

impl Default for MockOverlayStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OverlayStore for MockOverlayStore {
    async fn get(&self, overlay_id: &OverlayId) -> Result<Option<Overlay>> {
        if self.should_fail {
            anyhow::bail!("Mock overlay store failure");
        }
        Ok(self.overlays.lock().unwrap().get(overlay_id).cloned())
    }

    async fn save(&self, draft: OverlayDraft) -> Result<Overlay> {
        if self.should_fail {
            anyhow::bail!("Mock overlay store failure");
        }
        self.saved.lock().unwrap().push(draft.clone());

        let id = match (&draft.parent_overlay_id, self.reuse_ids) {
            (Some(parent), true) => parent.clone(),
            _ => OverlayId::generate(),
        };
        let created_at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let overlay = draft.into_overlay(id, created_at);
        self.overlays
            .lock()
            .unwrap()
            .insert(overlay.id.clone(), overlay.clone());
        Ok(overlay)
    }
}
