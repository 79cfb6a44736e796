use crate::baseline::domain::{ContentPack, ControlRecord, PackId};
use crate::ports::outbound::ControlCatalog;
use crate::shared::error::BaselineError;
use crate::shared::security::read_data_file;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Directory under the data dir holding one JSON file per content pack
pub const PACKS_DIR: &str = "packs";

/// FileSystemCatalog adapter reading content packs from `<data-dir>/packs`
///
/// Each pack lives in `<pack-id>.json`. A pack without a file is unknown and
/// therefore empty; a file that exists but cannot be parsed is an error.
pub struct FileSystemCatalog {
    packs_dir: PathBuf,
}

impl FileSystemCatalog {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            packs_dir: data_dir.join(PACKS_DIR),
        }
    }

    pub fn pack_path(&self, pack_id: &PackId) -> PathBuf {
        self.packs_dir.join(format!("{}.json", pack_id))
    }
}

#[async_trait]
impl ControlCatalog for FileSystemCatalog {
    async fn list_controls(&self, pack_id: &PackId) -> Result<Vec<ControlRecord>> {
        let path = self.pack_path(pack_id);
        let Some(content) = read_data_file(&path, "content pack")? else {
            tracing::debug!(pack = %pack_id, path = %path.display(), "pack file not found; treating as empty");
            return Ok(Vec::new());
        };

        let pack: ContentPack =
            serde_json::from_str(&content).map_err(|e| BaselineError::PackParseError {
                path: path.clone(),
                details: e.to_string(),
            })?;

        if &pack.pack_id != pack_id {
            tracing::warn!(
                requested = %pack_id,
                recorded = %pack.pack_id,
                path = %path.display(),
                "pack file records a different pack id"
            );
        }

        Ok(pack.controls)
    }
}
