use crate::shared::error::BaselineError;
use crate::shared::security::validate_file_stem;
use crate::shared::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for pack identifiers (security limit)
const MAX_PACK_ID_LENGTH: usize = 128;

/// NewType wrapper for a content pack identifier with validation
///
/// Pack ids name files in the file-backed catalog, so they are restricted to
/// a path-safe character set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackId(String);

impl PackId {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        validate_file_stem(&id, MAX_PACK_ID_LENGTH).map_err(|reason| {
            BaselineError::InvalidPackId {
                pack_id: id.clone(),
                reason,
            }
        })?;
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PackId {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<PackId> for String {
    fn from(id: PackId) -> Self {
        id.0
    }
}

impl fmt::Display for PackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PackId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// One control/rule from a content pack, as produced by the import subsystem
///
/// `local_id` is regenerated on every import and must never be used to
/// correlate controls across packs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlRecord {
    #[serde(alias = "localId", alias = "id")]
    pub local_id: String,
    #[serde(alias = "ruleId")]
    pub rule_id: Option<String>,
    #[serde(alias = "vulnId")]
    pub vuln_id: Option<String>,
    pub title: String,
    pub severity: String,
    pub discussion: String,
    #[serde(alias = "checkText")]
    pub check_text: String,
    #[serde(alias = "fixText")]
    pub fix_text: String,
    #[serde(alias = "isManual")]
    pub is_manual: bool,
}

impl ControlRecord {
    /// Creates a control with the identifying fields set and empty content
    pub fn new(local_id: impl Into<String>, rule_id: Option<&str>, vuln_id: Option<&str>) -> Self {
        Self {
            local_id: local_id.into(),
            rule_id: rule_id.map(str::to_string),
            vuln_id: vuln_id.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = severity.into();
        self
    }

    pub fn with_discussion(mut self, discussion: impl Into<String>) -> Self {
        self.discussion = discussion.into();
        self
    }

    pub fn with_check_text(mut self, check_text: impl Into<String>) -> Self {
        self.check_text = check_text.into();
        self
    }

    pub fn with_fix_text(mut self, fix_text: impl Into<String>) -> Self {
        self.fix_text = fix_text.into();
        self
    }

    pub fn with_manual(mut self, is_manual: bool) -> Self {
        self.is_manual = is_manual;
        self
    }
}

/// An immutable, timestamped snapshot of control records
///
/// This is the on-disk shape read by the file-backed catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentPack {
    #[serde(alias = "packId")]
    pub pack_id: PackId,
    #[serde(default, alias = "importedAt", skip_serializing_if = "Option::is_none")]
    pub imported_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub controls: Vec<ControlRecord>,
}

/// Which vendor identifier a [`ControlKey`] was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeySource {
    RuleId,
    VulnId,
}

/// Stable cross-snapshot identity of a control
///
/// Ordering is by source then normalized value, which gives diff output a
/// stable order independent of catalog iteration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ControlKey {
    source: KeySource,
    value: String,
}

impl ControlKey {
    pub(crate) fn new(source: KeySource, value: String) -> Self {
        Self { source, value }
    }

    pub fn source(&self) -> KeySource {
        self.source
    }

    /// Normalized (trimmed, lowercased) identifier value
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ControlKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            KeySource::RuleId => write!(f, "rule:{}", self.value),
            KeySource::VulnId => write!(f, "vuln:{}", self.value),
        }
    }
}
