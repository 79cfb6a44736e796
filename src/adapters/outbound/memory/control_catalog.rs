use crate::baseline::domain::{ContentPack, ControlRecord, PackId};
use crate::ports::outbound::ControlCatalog;
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// InMemoryControlCatalog adapter holding content packs in a shared map
///
/// Clones share the same packs, so an importer task can insert while a
/// comparison reads.
#[derive(Clone, Default)]
pub struct InMemoryControlCatalog {
    packs: Arc<DashMap<PackId, Vec<ControlRecord>>>,
}

impl InMemoryControlCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records (or replaces) the controls of a pack
    pub fn insert(&self, pack_id: PackId, controls: Vec<ControlRecord>) {
        self.packs.insert(pack_id, controls);
    }

    pub fn insert_pack(&self, pack: ContentPack) {
        self.packs.insert(pack.pack_id, pack.controls);
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }
}

#[async_trait]
impl ControlCatalog for InMemoryControlCatalog {
    async fn list_controls(&self, pack_id: &PackId) -> Result<Vec<ControlRecord>> {
        Ok(self
            .packs
            .get(pack_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_list() {
        let catalog = InMemoryControlCatalog::new();
        let pack_id = PackId::new("rhel9-v1r3").unwrap();
        catalog.insert(
            pack_id.clone(),
            vec![ControlRecord::new("1", Some("SV-1"), None)],
        );

        let controls = catalog.list_controls(&pack_id).await.unwrap();
        assert_eq!(controls.len(), 1);
        assert_eq!(catalog.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_pack_is_empty() {
        let catalog = InMemoryControlCatalog::new();
        let controls = catalog
            .list_controls(&PackId::new("none").unwrap())
            .await
            .unwrap();
        assert!(controls.is_empty());
        assert!(catalog.is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_packs() {
        let catalog = InMemoryControlCatalog::new();
        let reader = catalog.clone();
        catalog.insert_pack(ContentPack {
            pack_id: PackId::new("p").unwrap(),
            imported_at: None,
            controls: vec![ControlRecord::new("1", None, Some("V-1"))],
        });

        let controls = reader
            .list_controls(&PackId::new("p").unwrap())
            .await
            .unwrap();
        assert_eq!(controls.len(), 1);
    }
}
