use crate::baseline::domain::{
    ControlDiffItem, DiffTotals, PackId, RebaseAction, RebaseReport, ReleaseDiff,
};
use crate::ports::outbound::{DiffFormatter, RebaseFormatter};
use crate::shared::Result;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DiffDocument<'a> {
    baseline_pack_id: &'a PackId,
    target_pack_id: &'a PackId,
    totals: DiffTotals,
    items: &'a [ControlDiffItem],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RebaseSummary {
    keep: usize,
    update: usize,
    remove: usize,
    requires_review: usize,
    blocking_conflicts: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RebaseDocument<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<&'a str>,
    overlay_id: String,
    baseline_pack_id: &'a PackId,
    target_pack_id: &'a PackId,
    has_blocking_conflicts: bool,
    summary: RebaseSummary,
    actions: &'a [RebaseAction],
}

/// JsonDiffFormatter adapter rendering a release diff as pretty JSON
#[derive(Default)]
pub struct JsonDiffFormatter;

impl JsonDiffFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl DiffFormatter for JsonDiffFormatter {
    fn format(&self, diff: &ReleaseDiff) -> Result<String> {
        let document = DiffDocument {
            baseline_pack_id: &diff.baseline_pack_id,
            target_pack_id: &diff.target_pack_id,
            totals: diff.totals(),
            items: &diff.items,
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

/// JsonRebaseFormatter adapter rendering a rebase report as pretty JSON
#[derive(Default)]
pub struct JsonRebaseFormatter;

impl JsonRebaseFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl RebaseFormatter for JsonRebaseFormatter {
    fn format(&self, report: &RebaseReport) -> Result<String> {
        use crate::baseline::domain::RebaseActionType::{Keep, Remove, Update};

        let document = RebaseDocument {
            success: report.success,
            error_message: report.error_message.as_deref(),
            overlay_id: report.overlay_id.to_string(),
            baseline_pack_id: &report.baseline_pack_id,
            target_pack_id: &report.target_pack_id,
            has_blocking_conflicts: report.has_blocking_conflicts(),
            summary: RebaseSummary {
                keep: report.count_of(Keep),
                update: report.count_of(Update),
                remove: report.count_of(Remove),
                requires_review: report.review_count(),
                blocking_conflicts: report.blocking_conflict_count(),
            },
            actions: &report.actions,
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }
}
