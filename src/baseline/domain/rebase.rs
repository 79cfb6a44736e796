use super::control::{ControlKey, PackId};
use super::overlay::{ControlOverride, OverlayId};
use super::release_diff::{ControlField, DiffStatus};
use serde::Serialize;
use std::fmt;

/// What happens to an override when the overlay moves to the target pack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RebaseActionType {
    Keep,
    Update,
    Remove,
}

impl fmt::Display for RebaseActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RebaseActionType::Keep => f.write_str("Keep"),
            RebaseActionType::Update => f.write_str("Update"),
            RebaseActionType::Remove => f.write_str("Remove"),
        }
    }
}

/// Proposed decision for one override during a rebase
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RebaseAction {
    pub original: ControlOverride,
    pub key: Option<ControlKey>,
    pub action: RebaseActionType,
    /// In [0, 1]; 1.0 means the override carries forward verbatim
    pub confidence: f64,
    pub requires_review: bool,
    pub is_blocking_conflict: bool,
    pub diff_status: Option<DiffStatus>,
    pub changed_fields: Vec<ControlField>,
    pub manual_changed: bool,
    pub reason: String,
}

/// Advisory result of computing a rebase
///
/// `success == false` means the rebase could not even be computed (e.g. the
/// overlay does not exist); `actions` is empty in that case.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RebaseReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub overlay_id: OverlayId,
    pub baseline_pack_id: PackId,
    pub target_pack_id: PackId,
    pub actions: Vec<RebaseAction>,
}

impl RebaseReport {
    pub fn completed(
        overlay_id: OverlayId,
        baseline_pack_id: PackId,
        target_pack_id: PackId,
        actions: Vec<RebaseAction>,
    ) -> Self {
        Self {
            success: true,
            error_message: None,
            overlay_id,
            baseline_pack_id,
            target_pack_id,
            actions,
        }
    }

    pub fn failed(
        overlay_id: OverlayId,
        baseline_pack_id: PackId,
        target_pack_id: PackId,
        message: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            error_message: Some(message.into()),
            overlay_id,
            baseline_pack_id,
            target_pack_id,
            actions: Vec::new(),
        }
    }

    pub fn blocking_conflict_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| a.is_blocking_conflict)
            .count()
    }

    pub fn has_blocking_conflicts(&self) -> bool {
        self.blocking_conflict_count() > 0
    }

    pub fn review_count(&self) -> usize {
        self.actions.iter().filter(|a| a.requires_review).count()
    }

    pub fn count_of(&self, action: RebaseActionType) -> usize {
        self.actions.iter().filter(|a| a.action == action).count()
    }
}
