use crate::baseline::domain::{ControlDiffItem, ControlField, ControlOverride, PackId};
use crate::shared::error::BaselineError;
use crate::shared::Result;
use serde::Deserialize;

/// Default confidence of an override carried onto a changed control
pub const DEFAULT_CHANGED_CONFIDENCE: f64 = 0.5;

/// How a changed control affects an override that targets it
#[derive(Debug, Clone, PartialEq)]
pub struct ChangedDecision {
    pub confidence: f64,
    pub is_blocking_conflict: bool,
    pub reason: String,
}

/// RebasePolicy for overrides whose control changed between packs
///
/// Unchanged and removed controls have fixed outcomes. A changed control is
/// the one judgement call in a rebase, so its handling is configurable:
///
/// - `changed_confidence`: confidence attached to the Update action, in [0, 1)
/// - `block_on_severity_change`: when set, a severity change turns the
///   Update into a blocking conflict that an operator must resolve
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RebasePolicy {
    pub changed_confidence: f64,
    pub block_on_severity_change: bool,
}

impl Default for RebasePolicy {
    fn default() -> Self {
        Self {
            changed_confidence: DEFAULT_CHANGED_CONFIDENCE,
            block_on_severity_change: false,
        }
    }
}

impl RebasePolicy {
    pub fn new(changed_confidence: f64, block_on_severity_change: bool) -> Result<Self> {
        let policy = Self {
            changed_confidence,
            block_on_severity_change,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Checks that `changed_confidence` is a partial confidence
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.changed_confidence) {
            return Err(BaselineError::Validation {
                message: format!(
                    "changed_confidence must be at least 0.0 and below 1.0 (got {})",
                    self.changed_confidence
                ),
            }
            .into());
        }
        Ok(())
    }

    /// Decides confidence and blocking for an override on a changed control
    pub fn changed_decision(&self, item: &ControlDiffItem) -> ChangedDecision {
        let changes = Self::describe_changes(&item.changed_fields, item.manual_changed);

        if self.block_on_severity_change && item.has_field_change(ControlField::Severity) {
            return ChangedDecision {
                confidence: 0.0,
                is_blocking_conflict: true,
                reason: format!(
                    "Control severity changed ({}); override must be re-approved",
                    changes
                ),
            };
        }

        ChangedDecision {
            confidence: self.changed_confidence,
            is_blocking_conflict: false,
            reason: format!("Control changed ({}); review the carried-forward override", changes),
        }
    }

    /// Produces the override carried onto a changed control
    ///
    /// Status and not-applicable reason are kept; a note recording the
    /// rebase and the changed fields is appended so reviewers can see why
    /// the override was flagged.
    pub fn revise_override(
        &self,
        original: &ControlOverride,
        changed_fields: &[ControlField],
        manual_changed: bool,
        baseline: &PackId,
        target: &PackId,
    ) -> ControlOverride {
        let note = format!(
            "Rebased {} -> {}: changed {}",
            baseline,
            target,
            Self::describe_changes(changed_fields, manual_changed)
        );
        let notes = match original.notes.as_deref().map(str::trim_end) {
            Some(existing) if !existing.is_empty() => format!("{}\n{}", existing, note),
            _ => note,
        };

        ControlOverride {
            notes: Some(notes),
            ..original.clone()
        }
    }

    fn describe_changes(changed_fields: &[ControlField], manual_changed: bool) -> String {
        let mut parts: Vec<&str> = changed_fields.iter().map(|f| f.as_str()).collect();
        if manual_changed {
            parts.push("ManualReview");
        }
        if parts.is_empty() {
            "content".to_string()
        } else {
            parts.join(", ")
        }
    }
}
