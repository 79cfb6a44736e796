use crate::baseline::domain::ReleaseDiff;
use crate::ports::outbound::DiffFormatter;
use crate::shared::Result;

const CSV_HEADER: &str = "RuleId,VulnId,Title,Status,Manual,ManualChanged,ChangedFields";

/// CsvDiffFormatter adapter rendering one RFC 4180 row per control
///
/// Changed fields are joined with `;` inside a single column.
#[derive(Default)]
pub struct CsvDiffFormatter;

impl CsvDiffFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Quotes a cell when it contains a delimiter, quote or line break
    fn escape(value: &str) -> String {
        if value.contains([',', '"', '\n', '\r']) {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }
}

impl DiffFormatter for CsvDiffFormatter {
    fn format(&self, diff: &ReleaseDiff) -> Result<String> {
        let mut output = String::with_capacity(64 * (diff.items.len() + 1));
        output.push_str(CSV_HEADER);
        output.push_str("\r\n");

        for item in &diff.items {
            let changed_fields = item
                .changed_fields
                .iter()
                .map(|f| f.as_str())
                .collect::<Vec<_>>()
                .join(";");
            let row = [
                Self::escape(item.rule_id.as_deref().unwrap_or_default()),
                Self::escape(item.vuln_id.as_deref().unwrap_or_default()),
                Self::escape(&item.title),
                item.status.to_string(),
                item.is_manual.to_string(),
                item.manual_changed.to_string(),
                changed_fields,
            ];
            output.push_str(&row.join(","));
            output.push_str("\r\n");
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::domain::{ControlRecord, PackId};
    use crate::baseline::services::{BaselineDiffer, ControlIndex};

    #[test]
    fn test_escape() {
        assert_eq!(CsvDiffFormatter::escape("plain"), "plain");
        assert_eq!(CsvDiffFormatter::escape("a, b"), "\"a, b\"");
        assert_eq!(CsvDiffFormatter::escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(CsvDiffFormatter::escape("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_format_rows() {
        let baseline = vec![ControlRecord::new("1", Some("SV-1"), Some("V-1"))
            .with_title("Audit, logon")
            .with_severity("low")];
        let target = vec![ControlRecord::new("9", Some("SV-1"), Some("V-1"))
            .with_title("Audit, logon")
            .with_severity("high")
            .with_fix_text("new")
            .with_manual(true)];
        let diff = BaselineDiffer::diff(
            PackId::new("a").unwrap(),
            PackId::new("b").unwrap(),
            &ControlIndex::build(baseline),
            &ControlIndex::build(target),
        );

        let output = CsvDiffFormatter::new().format(&diff).unwrap();
        let lines: Vec<&str> = output.split("\r\n").collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(
            lines[1],
            "SV-1,V-1,\"Audit, logon\",Changed,true,true,Severity;FixText"
        );
        assert_eq!(lines[2], "");
    }

    #[test]
    fn test_format_empty_diff_has_header_only() {
        let diff = ReleaseDiff::new(PackId::new("a").unwrap(), PackId::new("b").unwrap(), vec![]);
        let output = CsvDiffFormatter::new().format(&diff).unwrap();
        assert_eq!(output, format!("{}\r\n", CSV_HEADER));
    }
}
