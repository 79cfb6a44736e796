use crate::baseline::domain::{Overlay, OverlayDraft, OverlayId};
use crate::ports::outbound::OverlayStore;
use crate::shared::error::BaselineError;
use crate::shared::security::read_data_file;
use crate::shared::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Directory under the data dir holding one JSON file per overlay
pub const OVERLAYS_DIR: &str = "overlays";

/// FileSystemOverlayStore adapter persisting overlays as pretty JSON
///
/// Files are write-once: saving allocates a fresh id and never replaces an
/// existing overlay file.
pub struct FileSystemOverlayStore {
    overlays_dir: PathBuf,
}

impl FileSystemOverlayStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            overlays_dir: data_dir.join(OVERLAYS_DIR),
        }
    }

    pub fn overlay_path(&self, overlay_id: &OverlayId) -> PathBuf {
        self.overlays_dir.join(format!("{}.json", overlay_id))
    }

    fn write_new(&self, path: &Path, content: &str) -> Result<()> {
        fs::create_dir_all(&self.overlays_dir).map_err(|e| BaselineError::FileWriteError {
            path: self.overlays_dir.clone(),
            details: format!("Failed to create overlay directory: {}", e),
        })?;

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| BaselineError::FileWriteError {
                path: path.to_path_buf(),
                details: if e.kind() == ErrorKind::AlreadyExists {
                    "Overlay file already exists; overlays are never overwritten".to_string()
                } else {
                    e.to_string()
                },
            })?;

        file.write_all(content.as_bytes())
            .map_err(|e| BaselineError::FileWriteError {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;
        Ok(())
    }
}

#[async_trait]
impl OverlayStore for FileSystemOverlayStore {
    async fn get(&self, overlay_id: &OverlayId) -> Result<Option<Overlay>> {
        let path = self.overlay_path(overlay_id);
        let Some(content) = read_data_file(&path, "overlay")? else {
            return Ok(None);
        };

        let overlay: Overlay =
            serde_json::from_str(&content).map_err(|e| BaselineError::OverlayParseError {
                path: path.clone(),
                details: e.to_string(),
            })?;

        if &overlay.id != overlay_id {
            return Err(BaselineError::OverlayParseError {
                path,
                details: format!(
                    "file records overlay id '{}' but is stored as '{}'",
                    overlay.id, overlay_id
                ),
            }
            .into());
        }

        Ok(Some(overlay))
    }

    async fn save(&self, draft: OverlayDraft) -> Result<Overlay> {
        let overlay = draft.into_overlay(OverlayId::generate(), Utc::now());
        let path = self.overlay_path(&overlay.id);

        let content = serde_json::to_string_pretty(&overlay)?;
        self.write_new(&path, &content)?;

        tracing::debug!(overlay = %overlay.id, path = %path.display(), "overlay written");
        Ok(overlay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::domain::{ControlOverride, ControlStatus, PackId, ToolSettingOverride};
    use tempfile::TempDir;

    fn draft() -> OverlayDraft {
        OverlayDraft {
            name: "Finance workstations".to_string(),
            baseline_pack_id: Some(PackId::new("win11-v1r1").unwrap()),
            parent_overlay_id: None,
            overrides: vec![ControlOverride::new(Some("SV-1"), Some("V-1"))
                .unwrap()
                .with_status(ControlStatus::NotApplicable)
                .with_not_applicable_reason("No wireless hardware")],
            tool_setting_overrides: vec![ToolSettingOverride {
                tool: "scap".to_string(),
                setting: "timeout".to_string(),
                value: "300".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_save_then_get() {
        let dir = TempDir::new().unwrap();
        let store = FileSystemOverlayStore::new(dir.path());

        let saved = store.save(draft()).await.unwrap();
        assert!(store.overlay_path(&saved.id).exists());

        let loaded = store.get(&saved.id).await.unwrap().unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.overrides.len(), 1);
        assert_eq!(loaded.tool_setting_overrides.len(), 1);
    }

    #[tokio::test]
    async fn test_save_allocates_distinct_ids() {
        let dir = TempDir::new().unwrap();
        let store = FileSystemOverlayStore::new(dir.path());

        let first = store.save(draft()).await.unwrap();
        let second = store.save(draft()).await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_get_missing_overlay() {
        let dir = TempDir::new().unwrap();
        let store = FileSystemOverlayStore::new(dir.path());
        let result = store.get(&OverlayId::new("absent").unwrap()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_rejects_mismatched_id() {
        let dir = TempDir::new().unwrap();
        let store = FileSystemOverlayStore::new(dir.path());
        let saved = store.save(draft()).await.unwrap();

        let moved = OverlayId::new("renamed").unwrap();
        fs::rename(store.overlay_path(&saved.id), store.overlay_path(&moved)).unwrap();

        let err = store.get(&moved).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse overlay"));
    }

    #[test]
    fn test_write_new_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let store = FileSystemOverlayStore::new(dir.path());
        let path = store.overlay_path(&OverlayId::new("fixed").unwrap());

        store.write_new(&path, "{}").unwrap();
        let err = store.write_new(&path, "{}").unwrap_err();
        assert!(err.to_string().contains("never overwritten"));
    }
}
