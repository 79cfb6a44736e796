use crate::baseline::domain::{ControlRecord, PackId, ReleaseDiff};
use crate::baseline::services::{BaselineDiffer, ControlIndex};
use crate::ports::outbound::{ControlCatalog, ProgressReporter};
use crate::shared::Result;

/// CompareReleasesUseCase - Release-to-release comparison of two content packs
///
/// Loads both control sets from the catalog and hands them to the
/// `BaselineDiffer`. Catalog failures propagate untouched; a pack the catalog
/// does not know is an empty set.
///
/// # Type Parameters
/// * `C` - ControlCatalog implementation
/// * `PR` - ProgressReporter implementation
pub struct CompareReleasesUseCase<C, PR> {
    catalog: C,
    progress_reporter: PR,
}

impl<C, PR> CompareReleasesUseCase<C, PR>
where
    C: ControlCatalog,
    PR: ProgressReporter,
{
    /// Creates a new CompareReleasesUseCase with injected dependencies
    pub fn new(catalog: C, progress_reporter: PR) -> Self {
        Self {
            catalog,
            progress_reporter,
        }
    }

    pub fn progress_reporter(&self) -> &PR {
        &self.progress_reporter
    }

    /// Compares a baseline pack with a target pack
    ///
    /// # Arguments
    /// * `baseline` - The older (reference) pack
    /// * `target` - The newer (candidate) pack
    ///
    /// # Returns
    /// The classified, field-level release diff
    ///
    /// # Errors
    /// Returns the catalog's error unchanged if either pack cannot be loaded
    pub async fn compare(&self, baseline: &PackId, target: &PackId) -> Result<ReleaseDiff> {
        self.progress_reporter.report(&format!(
            "📖 Loading content packs '{}' (baseline) and '{}' (target)",
            baseline, target
        ));

        let (baseline_controls, target_controls) = futures::try_join!(
            self.catalog.list_controls(baseline),
            self.catalog.list_controls(target),
        )?;

        let baseline_index = self.index_pack(baseline, baseline_controls);
        let target_index = self.index_pack(target, target_controls);

        let diff = BaselineDiffer::diff(
            baseline.clone(),
            target.clone(),
            &baseline_index,
            &target_index,
        );

        let totals = diff.totals();
        tracing::debug!(
            baseline = %baseline,
            target = %target,
            added = totals.added,
            removed = totals.removed,
            changed = totals.changed,
            unchanged = totals.unchanged,
            "release diff computed"
        );
        self.progress_reporter.report(&format!(
            "✅ Compared {} control(s): {} added, {} removed, {} changed, {} unchanged",
            totals.total(),
            totals.added,
            totals.removed,
            totals.changed,
            totals.unchanged
        ));

        Ok(diff)
    }

    /// Indexes one pack and surfaces its data-quality diagnostics
    fn index_pack(&self, pack_id: &PackId, controls: Vec<ControlRecord>) -> ControlIndex {
        let index = ControlIndex::build(controls);

        for key in index.duplicate_keys() {
            tracing::warn!(pack = %pack_id, key = %key, "duplicate control key, last record wins");
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Pack '{}' contains more than one control for {}; the last one is used.",
                pack_id, key
            ));
        }

        if index.unkeyed_count() > 0 {
            tracing::debug!(
                pack = %pack_id,
                count = index.unkeyed_count(),
                "controls without rule or vuln id excluded from comparison"
            );
        }

        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::domain::DiffStatus;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MockCatalog {
        packs: HashMap<String, Vec<ControlRecord>>,
        fail: bool,
    }

    #[async_trait]
    impl ControlCatalog for MockCatalog {
        async fn list_controls(&self, pack_id: &PackId) -> Result<Vec<ControlRecord>> {
            if self.fail {
                anyhow::bail!("catalog unreachable");
            }
            Ok(self.packs.get(pack_id.as_str()).cloned().unwrap_or_default())
        }
    }

    #[derive(Default)]
    struct RecordingReporter {
        errors: Mutex<Vec<String>>,
    }

    impl ProgressReporter for RecordingReporter {
        fn report(&self, _message: &str) {}
        fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
        fn report_error(&self, message: &str) {
            self.errors.lock().unwrap().push(message.to_string());
        }
        fn report_completion(&self, _message: &str) {}
    }

    fn control(local: &str, rule: &str, title: &str) -> ControlRecord {
        ControlRecord::new(local, Some(rule), None).with_title(title)
    }

    fn pack(id: &str) -> PackId {
        PackId::new(id).unwrap()
    }

    #[tokio::test]
    async fn test_compare_unknown_packs_is_empty() {
        let use_case = CompareReleasesUseCase::new(
            MockCatalog {
                packs: HashMap::new(),
                fail: false,
            },
            RecordingReporter::default(),
        );

        let diff = use_case.compare(&pack("nope-1"), &pack("nope-2")).await.unwrap();
        assert!(diff.is_empty());
        assert_eq!(diff.totals().total(), 0);
        assert_eq!(diff.baseline_pack_id.as_str(), "nope-1");
    }

    #[tokio::test]
    async fn test_compare_classifies_controls() {
        let mut packs = HashMap::new();
        packs.insert(
            "v1".to_string(),
            vec![control("1", "SV-1", "a"), control("2", "SV-2", "b")],
        );
        packs.insert(
            "v2".to_string(),
            vec![control("9", "SV-1", "a"), control("8", "SV-3", "c")],
        );
        let use_case = CompareReleasesUseCase::new(
            MockCatalog { packs, fail: false },
            RecordingReporter::default(),
        );

        let diff = use_case.compare(&pack("v1"), &pack("v2")).await.unwrap();
        let statuses: Vec<DiffStatus> = diff.items.iter().map(|i| i.status).collect();
        assert_eq!(
            statuses,
            vec![DiffStatus::Unchanged, DiffStatus::Removed, DiffStatus::Added]
        );
    }

    #[tokio::test]
    async fn test_compare_propagates_catalog_failure() {
        let use_case = CompareReleasesUseCase::new(
            MockCatalog {
                packs: HashMap::new(),
                fail: true,
            },
            RecordingReporter::default(),
        );

        let result = use_case.compare(&pack("v1"), &pack("v2")).await;
        assert_eq!(result.unwrap_err().to_string(), "catalog unreachable");
    }

    #[tokio::test]
    async fn test_compare_reports_duplicate_keys() {
        let mut packs = HashMap::new();
        packs.insert(
            "v1".to_string(),
            vec![control("1", "SV-1", "first"), control("2", "SV-1", "second")],
        );
        let use_case = CompareReleasesUseCase::new(
            MockCatalog { packs, fail: false },
            RecordingReporter::default(),
        );

        let diff = use_case.compare(&pack("v1"), &pack("v1")).await.unwrap();
        assert_eq!(diff.items.len(), 1);
        assert_eq!(diff.items[0].title, "second");

        let errors = use_case.progress_reporter().errors.lock().unwrap().clone();
        // once per side of the comparison
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("rule:sv-1"));
    }
}
