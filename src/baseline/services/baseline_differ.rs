use super::{Fingerprinter, KeyResolver};
use crate::baseline::domain::{
    ControlDiffItem, ControlField, ControlKey, ControlRecord, DiffStatus, PackId, ReleaseDiff,
};
use std::collections::{BTreeMap, BTreeSet};

/// Controls of one pack keyed by their stable key
///
/// Duplicate keys within a pack are a data-quality problem, not a fatal one:
/// the last record wins and the key is remembered so callers can report it.
#[derive(Debug, Clone, Default)]
pub struct ControlIndex {
    entries: BTreeMap<ControlKey, ControlRecord>,
    duplicate_keys: Vec<ControlKey>,
    unkeyed_count: usize,
}

impl ControlIndex {
    pub fn build(controls: Vec<ControlRecord>) -> Self {
        let mut index = Self::default();
        for control in controls {
            let Some(key) = KeyResolver::resolve(&control) else {
                tracing::debug!(local_id = %control.local_id, "control has no rule or vuln id; skipped");
                index.unkeyed_count += 1;
                continue;
            };
            if index.entries.insert(key.clone(), control).is_some()
                && !index.duplicate_keys.contains(&key)
            {
                index.duplicate_keys.push(key);
            }
        }
        index
    }

    pub fn get(&self, key: &ControlKey) -> Option<&ControlRecord> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &ControlKey> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn duplicate_keys(&self) -> &[ControlKey] {
        &self.duplicate_keys
    }

    pub fn unkeyed_count(&self) -> usize {
        self.unkeyed_count
    }
}

/// BaselineDiffer service classifying every control between two packs
///
/// Pure business logic with no I/O; the use case loads the packs.
pub struct BaselineDiffer;

impl BaselineDiffer {
    /// Produces the release diff between two indexed packs
    ///
    /// Items come out in key order and every key of either pack appears
    /// exactly once.
    pub fn diff(
        baseline_pack_id: PackId,
        target_pack_id: PackId,
        baseline: &ControlIndex,
        target: &ControlIndex,
    ) -> ReleaseDiff {
        let keys: BTreeSet<&ControlKey> = baseline.keys().chain(target.keys()).collect();

        let items = keys
            .into_iter()
            .filter_map(|key| match (baseline.get(key), target.get(key)) {
                (None, Some(added)) => Some(Self::added_item(key, added)),
                (Some(removed), None) => Some(Self::removed_item(key, removed)),
                (Some(before), Some(after)) => Some(Self::compared_item(key, before, after)),
                (None, None) => None,
            })
            .collect();

        ReleaseDiff::new(baseline_pack_id, target_pack_id, items)
    }

    /// Lists the substantive fields that differ, in reporting order
    pub fn changed_fields(before: &ControlRecord, after: &ControlRecord) -> Vec<ControlField> {
        ControlField::ALL
            .into_iter()
            .filter(|field| Self::field_value(before, *field) != Self::field_value(after, *field))
            .collect()
    }

    fn field_value(control: &ControlRecord, field: ControlField) -> &str {
        match field {
            ControlField::Title => &control.title,
            ControlField::Severity => &control.severity,
            ControlField::Discussion => &control.discussion,
            ControlField::CheckText => &control.check_text,
            ControlField::FixText => &control.fix_text,
        }
    }

    fn added_item(key: &ControlKey, control: &ControlRecord) -> ControlDiffItem {
        ControlDiffItem {
            key: key.clone(),
            rule_id: control.rule_id.clone(),
            vuln_id: control.vuln_id.clone(),
            title: control.title.clone(),
            status: DiffStatus::Added,
            is_manual: control.is_manual,
            manual_changed: false,
            changed_fields: Vec::new(),
            baseline_fingerprint: None,
            target_fingerprint: Some(Fingerprinter::fingerprint(control)),
        }
    }

    fn removed_item(key: &ControlKey, control: &ControlRecord) -> ControlDiffItem {
        ControlDiffItem {
            key: key.clone(),
            rule_id: control.rule_id.clone(),
            vuln_id: control.vuln_id.clone(),
            title: control.title.clone(),
            status: DiffStatus::Removed,
            is_manual: control.is_manual,
            manual_changed: false,
            changed_fields: Vec::new(),
            baseline_fingerprint: Some(Fingerprinter::fingerprint(control)),
            target_fingerprint: None,
        }
    }

    fn compared_item(key: &ControlKey, before: &ControlRecord, after: &ControlRecord) -> ControlDiffItem {
        let before_fp = Fingerprinter::fingerprint(before);
        let after_fp = Fingerprinter::fingerprint(after);

        // Field enumeration only runs once the fingerprints disagree
        let (status, changed_fields, manual_changed) = if before_fp == after_fp {
            (DiffStatus::Unchanged, Vec::new(), false)
        } else {
            (
                DiffStatus::Changed,
                Self::changed_fields(before, after),
                before.is_manual != after.is_manual,
            )
        };

        ControlDiffItem {
            key: key.clone(),
            rule_id: after.rule_id.clone().or_else(|| before.rule_id.clone()),
            vuln_id: after.vuln_id.clone().or_else(|| before.vuln_id.clone()),
            title: after.title.clone(),
            status,
            is_manual: after.is_manual,
            manual_changed,
            changed_fields,
            baseline_fingerprint: Some(before_fp),
            target_fingerprint: Some(after_fp),
        }
    }
}
