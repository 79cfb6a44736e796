use crate::baseline::domain::{
    DiffStatus, RebaseAction, RebaseActionType, RebaseReport, ReleaseDiff,
};
use crate::ports::outbound::{DiffFormatter, RebaseFormatter};
use crate::shared::Result;
use owo_colors::OwoColorize;
use std::fmt::Write;

const ID_WIDTH: usize = 28;
const STATUS_WIDTH: usize = 10;
const TITLE_WIDTH: usize = 48;

fn truncate(text: &str, width: usize) -> String {
    let single_line = text.replace(['\r', '\n'], " ");
    if single_line.chars().count() <= width {
        return single_line;
    }
    let mut out: String = single_line.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Pads before coloring so ANSI escapes don't throw off the column width
fn paint(text: &str, width: usize, colored: bool, color: fn(&str) -> String) -> String {
    let padded = format!("{:<width$}", text, width = width);
    if colored {
        color(&padded)
    } else {
        padded
    }
}

fn status_color(status: DiffStatus) -> fn(&str) -> String {
    match status {
        DiffStatus::Added => |s: &str| s.green().to_string(),
        DiffStatus::Removed => |s: &str| s.red().to_string(),
        DiffStatus::Changed => |s: &str| s.yellow().to_string(),
        DiffStatus::Unchanged => |s: &str| s.dimmed().to_string(),
    }
}

/// TableDiffFormatter adapter rendering a release diff for a terminal
///
/// A totals line followed by one row per control. Unchanged rows are listed
/// too so the table accounts for every key.
pub struct TableDiffFormatter {
    colored: bool,
}

impl TableDiffFormatter {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }
}

impl DiffFormatter for TableDiffFormatter {
    fn format(&self, diff: &ReleaseDiff) -> Result<String> {
        let totals = diff.totals();
        let mut out = String::new();

        writeln!(
            out,
            "Release diff: {} -> {}",
            diff.baseline_pack_id, diff.target_pack_id
        )?;
        writeln!(
            out,
            "Added: {}  Removed: {}  Changed: {}  Unchanged: {}  (total {})",
            totals.added,
            totals.removed,
            totals.changed,
            totals.unchanged,
            totals.total()
        )?;

        if diff.is_empty() {
            writeln!(out, "\nNo controls in either pack.")?;
            return Ok(out);
        }

        writeln!(out)?;
        writeln!(
            out,
            "{:<id$} {:<st$} {:<ti$} CHANGES",
            "CONTROL",
            "STATUS",
            "TITLE",
            id = ID_WIDTH,
            st = STATUS_WIDTH,
            ti = TITLE_WIDTH
        )?;

        for item in &diff.items {
            let id = item
                .rule_id
                .as_deref()
                .or(item.vuln_id.as_deref())
                .unwrap_or_else(|| item.key.value());

            let mut changes: Vec<&str> = item.changed_fields.iter().map(|f| f.as_str()).collect();
            if item.manual_changed {
                changes.push("ManualReview");
            }

            writeln!(
                out,
                "{:<id$} {} {:<ti$} {}",
                truncate(id, ID_WIDTH),
                paint(
                    item.status.as_str(),
                    STATUS_WIDTH,
                    self.colored,
                    status_color(item.status)
                ),
                truncate(&item.title, TITLE_WIDTH),
                changes.join(", "),
                id = ID_WIDTH,
                ti = TITLE_WIDTH
            )?;
        }

        Ok(out)
    }
}

/// TableRebaseFormatter adapter rendering a rebase report for operator review
pub struct TableRebaseFormatter {
    colored: bool,
}

impl TableRebaseFormatter {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    fn action_cell(&self, action: &RebaseAction) -> String {
        let color: fn(&str) -> String = match (action.action, action.is_blocking_conflict) {
            (_, true) => |s: &str| s.red().bold().to_string(),
            (RebaseActionType::Keep, _) => |s: &str| s.green().to_string(),
            (RebaseActionType::Update, _) => |s: &str| s.yellow().to_string(),
            (RebaseActionType::Remove, _) => |s: &str| s.red().to_string(),
        };
        paint(&action.action.to_string(), 8, self.colored, color)
    }
}

impl RebaseFormatter for TableRebaseFormatter {
    fn format(&self, report: &RebaseReport) -> Result<String> {
        let mut out = String::new();

        writeln!(
            out,
            "Rebase of overlay {}: {} -> {}",
            report.overlay_id, report.baseline_pack_id, report.target_pack_id
        )?;

        if !report.success {
            let message = report.error_message.as_deref().unwrap_or("rebase failed");
            if self.colored {
                writeln!(out, "{} {}", "✗".red().bold(), message)?;
            } else {
                writeln!(out, "✗ {}", message)?;
            }
            return Ok(out);
        }

        writeln!(
            out,
            "Keep: {}  Update: {}  Remove: {}  Review: {}  Blocking: {}",
            report.count_of(RebaseActionType::Keep),
            report.count_of(RebaseActionType::Update),
            report.count_of(RebaseActionType::Remove),
            report.review_count(),
            report.blocking_conflict_count()
        )?;

        if report.actions.is_empty() {
            writeln!(out, "\nOverlay has no overrides.")?;
            return Ok(out);
        }

        writeln!(out)?;
        writeln!(
            out,
            "{:<id$} {:<8} {:>5}  {:<6} REASON",
            "OVERRIDE",
            "ACTION",
            "CONF",
            "REVIEW",
            id = ID_WIDTH
        )?;
        for action in &report.actions {
            let review = match (action.is_blocking_conflict, action.requires_review) {
                (true, _) => "BLOCK",
                (false, true) => "yes",
                (false, false) => "no",
            };
            writeln!(
                out,
                "{:<id$} {} {:>5.2}  {:<6} {}",
                truncate(action.original.display_id(), ID_WIDTH),
                self.action_cell(action),
                action.confidence,
                review,
                action.reason,
                id = ID_WIDTH
            )?;
        }

        if report.has_blocking_conflicts() {
            writeln!(
                out,
                "\n{} blocking conflict(s) must be resolved before this rebase can be applied.",
                report.blocking_conflict_count()
            )?;
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::domain::{ControlOverride, ControlRecord, OverlayId, PackId};
    use crate::baseline::policies::RebasePolicy;
    use crate::baseline::services::{BaselineDiffer, ControlIndex, RebasePlanner};

    fn sample_diff() -> ReleaseDiff {
        BaselineDiffer::diff(
            PackId::new("v1r1").unwrap(),
            PackId::new("v1r2").unwrap(),
            &ControlIndex::build(vec![
                ControlRecord::new("1", Some("SV-1"), None).with_title("Keep me"),
                ControlRecord::new("2", Some("SV-2"), None).with_title("Gone"),
            ]),
            &ControlIndex::build(vec![
                ControlRecord::new("7", Some("SV-1"), None).with_title("Keep me"),
            ]),
        )
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert_eq!(truncate("a\nb", 5), "a b");
    }

    #[test]
    fn test_diff_table_plain() {
        let output = TableDiffFormatter::new(false).format(&sample_diff()).unwrap();
        assert!(output.contains("Release diff: v1r1 -> v1r2"));
        assert!(output.contains("Removed: 1"));
        assert!(output.contains("Unchanged: 1"));
        assert!(output.contains("SV-2"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_diff_table_colored_uses_ansi() {
        let output = TableDiffFormatter::new(true).format(&sample_diff()).unwrap();
        assert!(output.contains('\u{1b}'));
    }

    #[test]
    fn test_rebase_table_lists_blocking() {
        let diff = sample_diff();
        let policy = RebasePolicy::default();
        let overrides = vec![
            ControlOverride::new(Some("SV-1"), None).unwrap(),
            ControlOverride::new(Some("SV-2"), None).unwrap(),
        ];
        let report = RebaseReport::completed(
            OverlayId::new("ov").unwrap(),
            diff.baseline_pack_id.clone(),
            diff.target_pack_id.clone(),
            RebasePlanner::new(&policy).plan(&overrides, &diff),
        );

        let output = TableRebaseFormatter::new(false).format(&report).unwrap();
        assert!(output.contains("Keep: 1"));
        assert!(output.contains("Blocking: 1"));
        assert!(output.contains("BLOCK"));
        assert!(output.contains("1 blocking conflict(s)"));
    }

    #[test]
    fn test_rebase_table_failed_report() {
        let report = RebaseReport::failed(
            OverlayId::new("ov").unwrap(),
            PackId::new("a").unwrap(),
            PackId::new("b").unwrap(),
            "Overlay 'ov' not found",
        );
        let output = TableRebaseFormatter::new(false).format(&report).unwrap();
        assert!(output.contains("✗ Overlay 'ov' not found"));
    }
}
