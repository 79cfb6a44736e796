use super::KeyResolver;
use crate::baseline::domain::{
    ControlDiffItem, ControlKey, ControlOverride, DiffStatus, KeySource, RebaseAction,
    RebaseActionType, ReleaseDiff,
};
use crate::baseline::policies::RebasePolicy;
use std::collections::HashMap;

/// Lookup from override identifiers to diff items
///
/// Items are found by stable key. An override that only records a vuln id
/// falls back to the normalized vuln id, so it still reaches a control that
/// the packs key by rule id.
pub struct DiffIndex<'a> {
    by_key: HashMap<&'a ControlKey, &'a ControlDiffItem>,
    by_vuln_id: HashMap<String, &'a ControlDiffItem>,
}

impl<'a> DiffIndex<'a> {
    pub fn new(diff: &'a ReleaseDiff) -> Self {
        let mut by_key = HashMap::with_capacity(diff.items.len());
        let mut by_vuln_id = HashMap::new();
        for item in &diff.items {
            by_key.insert(&item.key, item);
            if let Some(vuln) = item.vuln_id.as_deref().and_then(KeyResolver::normalize) {
                // Items are key-ordered; keep the first so lookups stay deterministic
                by_vuln_id.entry(vuln).or_insert(item);
            }
        }
        Self { by_key, by_vuln_id }
    }

    /// An override carrying a rule id is matched by that rule id alone; the
    /// vuln id index is consulted only when the rule id is absent or blank.
    pub fn lookup(&self, control_override: &ControlOverride) -> Option<&'a ControlDiffItem> {
        let key = KeyResolver::resolve_override(control_override)?;
        let direct = self.by_key.get(&key).copied();
        match key.source() {
            KeySource::RuleId => direct,
            KeySource::VulnId => direct.or_else(|| self.by_vuln_id.get(key.value()).copied()),
        }
    }
}

/// RebasePlanner service deciding the fate of each override
///
/// | Control in diff      | Action | Confidence        | Review | Blocking        |
/// |----------------------|--------|-------------------|--------|-----------------|
/// | Unchanged            | Keep   | 1.0               | no     | no              |
/// | Changed              | Update | policy            | yes    | policy          |
/// | Removed              | Remove | 0.0               | yes    | yes             |
/// | Added / not found    | Remove | 0.0               | yes    | yes             |
pub struct RebasePlanner<'p> {
    policy: &'p RebasePolicy,
}

impl<'p> RebasePlanner<'p> {
    pub fn new(policy: &'p RebasePolicy) -> Self {
        Self { policy }
    }

    /// Plans every override of an overlay against a release diff, in overlay order
    pub fn plan(&self, overrides: &[ControlOverride], diff: &ReleaseDiff) -> Vec<RebaseAction> {
        let index = DiffIndex::new(diff);
        overrides
            .iter()
            .map(|ov| self.classify(ov, index.lookup(ov)))
            .collect()
    }

    /// Classifies one override given the diff item its control resolved to
    pub fn classify(
        &self,
        control_override: &ControlOverride,
        item: Option<&ControlDiffItem>,
    ) -> RebaseAction {
        let key = item
            .map(|i| i.key.clone())
            .or_else(|| KeyResolver::resolve_override(control_override));

        let Some(item) = item else {
            let reason = if key.is_none() {
                "Override has neither a rule id nor a vuln id".to_string()
            } else {
                "Override does not match any control in either pack".to_string()
            };
            return Self::blocking_remove(control_override, key, None, reason);
        };

        match item.status {
            DiffStatus::Unchanged => RebaseAction {
                original: control_override.clone(),
                key,
                action: RebaseActionType::Keep,
                confidence: 1.0,
                requires_review: false,
                is_blocking_conflict: false,
                diff_status: Some(DiffStatus::Unchanged),
                changed_fields: Vec::new(),
                manual_changed: false,
                reason: "Control unchanged".to_string(),
            },
            DiffStatus::Changed => {
                let decision = self.policy.changed_decision(item);
                RebaseAction {
                    original: control_override.clone(),
                    key,
                    action: RebaseActionType::Update,
                    confidence: decision.confidence,
                    requires_review: true,
                    is_blocking_conflict: decision.is_blocking_conflict,
                    diff_status: Some(DiffStatus::Changed),
                    changed_fields: item.changed_fields.clone(),
                    manual_changed: item.manual_changed,
                    reason: decision.reason,
                }
            }
            DiffStatus::Removed => Self::blocking_remove(
                control_override,
                key,
                Some(DiffStatus::Removed),
                "Control was removed from the target pack".to_string(),
            ),
            DiffStatus::Added => Self::blocking_remove(
                control_override,
                key,
                Some(DiffStatus::Added),
                "Control is new in the target pack; the override has no baseline counterpart"
                    .to_string(),
            ),
        }
    }

    fn blocking_remove(
        control_override: &ControlOverride,
        key: Option<ControlKey>,
        diff_status: Option<DiffStatus>,
        reason: String,
    ) -> RebaseAction {
        RebaseAction {
            original: control_override.clone(),
            key,
            action: RebaseActionType::Remove,
            confidence: 0.0,
            requires_review: true,
            is_blocking_conflict: true,
            diff_status,
            changed_fields: Vec::new(),
            manual_changed: false,
            reason,
        }
    }
}
