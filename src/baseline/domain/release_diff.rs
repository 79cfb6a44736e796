use super::control::{ControlKey, PackId};
use serde::Serialize;
use std::fmt;

/// Substantive control fields compared when a fingerprint differs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ControlField {
    Title,
    Severity,
    Discussion,
    CheckText,
    FixText,
}

impl ControlField {
    /// All compared fields, in reporting order
    pub const ALL: [ControlField; 5] = [
        ControlField::Title,
        ControlField::Severity,
        ControlField::Discussion,
        ControlField::CheckText,
        ControlField::FixText,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlField::Title => "Title",
            ControlField::Severity => "Severity",
            ControlField::Discussion => "Discussion",
            ControlField::CheckText => "CheckText",
            ControlField::FixText => "FixText",
        }
    }
}

impl fmt::Display for ControlField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of one control between baseline and target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiffStatus {
    Added,
    Removed,
    Changed,
    Unchanged,
}

impl DiffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffStatus::Added => "Added",
            DiffStatus::Removed => "Removed",
            DiffStatus::Changed => "Changed",
            DiffStatus::Unchanged => "Unchanged",
        }
    }
}

impl fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a release comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlDiffItem {
    pub key: ControlKey,
    pub rule_id: Option<String>,
    pub vuln_id: Option<String>,
    pub title: String,
    pub status: DiffStatus,
    pub is_manual: bool,
    pub manual_changed: bool,
    pub changed_fields: Vec<ControlField>,
    pub baseline_fingerprint: Option<String>,
    pub target_fingerprint: Option<String>,
}

impl ControlDiffItem {
    pub fn has_field_change(&self, field: ControlField) -> bool {
        self.changed_fields.contains(&field)
    }
}

/// Count of diff items per classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffTotals {
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
    pub unchanged: usize,
}

impl DiffTotals {
    pub fn total(&self) -> usize {
        self.added + self.removed + self.changed + self.unchanged
    }
}

/// Comparison of two content packs
///
/// A pure function of the two packs' control sets: items are ordered by key
/// and no timestamps are recorded, so serializing the same comparison twice
/// yields identical bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseDiff {
    pub baseline_pack_id: PackId,
    pub target_pack_id: PackId,
    pub items: Vec<ControlDiffItem>,
}

impl ReleaseDiff {
    pub fn new(baseline_pack_id: PackId, target_pack_id: PackId, items: Vec<ControlDiffItem>) -> Self {
        Self {
            baseline_pack_id,
            target_pack_id,
            items,
        }
    }

    pub fn totals(&self) -> DiffTotals {
        self.items
            .iter()
            .fold(DiffTotals::default(), |mut totals, item| {
                match item.status {
                    DiffStatus::Added => totals.added += 1,
                    DiffStatus::Removed => totals.removed += 1,
                    DiffStatus::Changed => totals.changed += 1,
                    DiffStatus::Unchanged => totals.unchanged += 1,
                }
                totals
            })
    }

    pub fn items_with_status(&self, status: DiffStatus) -> impl Iterator<Item = &ControlDiffItem> {
        self.items.iter().filter(move |item| item.status == status)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
