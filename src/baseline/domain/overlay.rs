use super::control::PackId;
use crate::shared::error::BaselineError;
use crate::shared::security::validate_file_stem;
use crate::shared::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Maximum length for overlay identifiers (security limit)
const MAX_OVERLAY_ID_LENGTH: usize = 128;

/// NewType wrapper for an overlay identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OverlayId(String);

impl OverlayId {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        validate_file_stem(&id, MAX_OVERLAY_ID_LENGTH).map_err(|reason| {
            BaselineError::InvalidOverlayId {
                overlay_id: id.clone(),
                reason,
            }
        })?;
        Ok(Self(id))
    }

    /// Allocates a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for OverlayId {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<OverlayId> for String {
    fn from(id: OverlayId) -> Self {
        id.0
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for OverlayId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// Checklist status an override forces onto a control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlStatus {
    NotAFinding,
    Open,
    NotApplicable,
    NotReviewed,
}

/// One organizational deviation within an overlay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlOverride {
    #[serde(default, alias = "rule_id", skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    #[serde(default, alias = "vuln_id", skip_serializing_if = "Option::is_none")]
    pub vuln_id: Option<String>,
    #[serde(default, alias = "status_override", skip_serializing_if = "Option::is_none")]
    pub status_override: Option<ControlStatus>,
    #[serde(
        default,
        rename = "naReason",
        alias = "not_applicable_reason",
        alias = "notApplicableReason",
        skip_serializing_if = "Option::is_none"
    )]
    pub not_applicable_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ControlOverride {
    /// Creates an override; at least one of `rule_id` / `vuln_id` must be non-blank
    pub fn new(rule_id: Option<&str>, vuln_id: Option<&str>) -> Result<Self> {
        let present = |v: Option<&str>| v.is_some_and(|s| !s.trim().is_empty());
        if !present(rule_id) && !present(vuln_id) {
            return Err(BaselineError::Validation {
                message: "control override requires a rule id or a vuln id".to_string(),
            }
            .into());
        }
        Ok(Self {
            rule_id: rule_id.map(str::to_string),
            vuln_id: vuln_id.map(str::to_string),
            status_override: None,
            not_applicable_reason: None,
            notes: None,
        })
    }

    pub fn with_status(mut self, status: ControlStatus) -> Self {
        self.status_override = Some(status);
        self
    }

    pub fn with_not_applicable_reason(mut self, reason: impl Into<String>) -> Self {
        self.not_applicable_reason = Some(reason.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Label used in reports: the rule id, else the vuln id
    pub fn display_id(&self) -> &str {
        self.rule_id
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(self.vuln_id.as_deref())
            .unwrap_or("<unidentified>")
    }
}

/// An override of a verification tool setting; opaque to the rebase engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSettingOverride {
    pub tool: String,
    pub setting: String,
    pub value: String,
}

/// An immutable, named set of deviations authored against a baseline pack
///
/// Overlays are versioned by replacement: a rebase stores a new overlay
/// with a new id and leaves this one untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    pub id: OverlayId,
    pub name: String,
    #[serde(default, alias = "baseline_pack_id", skip_serializing_if = "Option::is_none")]
    pub baseline_pack_id: Option<PackId>,
    #[serde(default, alias = "parent_overlay_id", skip_serializing_if = "Option::is_none")]
    pub parent_overlay_id: Option<OverlayId>,
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub overrides: Vec<ControlOverride>,
    #[serde(default, alias = "tool_setting_overrides")]
    pub tool_setting_overrides: Vec<ToolSettingOverride>,
}

/// Overlay content handed to the store, which allocates the id and timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayDraft {
    pub name: String,
    pub baseline_pack_id: Option<PackId>,
    pub parent_overlay_id: Option<OverlayId>,
    pub overrides: Vec<ControlOverride>,
    pub tool_setting_overrides: Vec<ToolSettingOverride>,
}

impl OverlayDraft {
    pub fn into_overlay(self, id: OverlayId, created_at: DateTime<Utc>) -> Overlay {
        Overlay {
            id,
            name: self.name,
            baseline_pack_id: self.baseline_pack_id,
            parent_overlay_id: self.parent_overlay_id,
            created_at,
            overrides: self.overrides,
            tool_setting_overrides: self.tool_setting_overrides,
        }
    }
}
