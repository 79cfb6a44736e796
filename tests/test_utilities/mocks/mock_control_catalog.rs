use async_trait::async_trait;
use baseline_rebase::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock ControlCatalog serving fixed packs
pub struct MockControlCatalog {
    pub packs: HashMap<String, Vec<ControlRecord>>,
    pub should_fail: bool,
    pub call_count: Arc<AtomicUsize>,
}

impl MockControlCatalog {
    pub fn new() -> Self {
        Self {
            packs: HashMap::new(),
            should_fail: false,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_pack(mut self, pack_id: &str, controls: Vec<ControlRecord>) -> Self {
        self.packs.insert(pack_id.to_string(), controls);
        self
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Default for MockControlCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ControlCatalog for MockControlCatalog {
    async fn list_controls(&self, pack_id: &PackId) -> Result<Vec<ControlRecord>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            anyhow::bail!("Mock control catalog failure");
        }
        Ok(self.packs.get(pack_id.as_str()).cloned().unwrap_or_default())
    }
}
