use super::CompareReleasesUseCase;
use crate::baseline::domain::{
    Overlay, OverlayDraft, OverlayId, PackId, RebaseActionType, RebaseReport,
};
use crate::baseline::policies::RebasePolicy;
use crate::baseline::services::{DiffIndex, RebasePlanner};
use crate::ports::outbound::{ControlCatalog, OverlayStore, ProgressReporter};
use crate::shared::error::BaselineError;
use crate::shared::Result;

/// RebaseOverlayUseCase - Moves an overlay from one pack release to the next
///
/// Computing a rebase is advisory and never writes. Applying one persists a
/// brand-new overlay through the store; the source overlay is left as is.
///
/// # Type Parameters
/// * `C` - ControlCatalog implementation
/// * `S` - OverlayStore implementation
/// * `PR` - ProgressReporter implementation
pub struct RebaseOverlayUseCase<C, S, PR> {
    compare: CompareReleasesUseCase<C, PR>,
    store: S,
    policy: RebasePolicy,
}

impl<C, S, PR> RebaseOverlayUseCase<C, S, PR>
where
    C: ControlCatalog,
    S: OverlayStore,
    PR: ProgressReporter,
{
    pub fn new(catalog: C, store: S, progress_reporter: PR, policy: RebasePolicy) -> Self {
        Self {
            compare: CompareReleasesUseCase::new(catalog, progress_reporter),
            store,
            policy,
        }
    }

    pub fn policy(&self) -> &RebasePolicy {
        &self.policy
    }

    fn progress_reporter(&self) -> &PR {
        self.compare.progress_reporter()
    }

    /// Proposes a Keep/Update/Remove action for every override of the overlay
    ///
    /// A missing overlay yields a report with `success == false` rather than
    /// an error. Catalog and store failures are propagated.
    pub async fn compute_rebase(
        &self,
        overlay_id: &OverlayId,
        baseline: &PackId,
        target: &PackId,
    ) -> Result<RebaseReport> {
        let Some(overlay) = self.store.get(overlay_id).await? else {
            tracing::debug!(overlay = %overlay_id, "overlay not found; rebase not computed");
            return Ok(RebaseReport::failed(
                overlay_id.clone(),
                baseline.clone(),
                target.clone(),
                format!("Overlay '{}' not found", overlay_id),
            ));
        };

        let diff = self.compare.compare(baseline, target).await?;
        let index = DiffIndex::new(&diff);
        let planner = RebasePlanner::new(&self.policy);

        let total = overlay.overrides.len();
        let mut actions = Vec::with_capacity(total);
        for (i, control_override) in overlay.overrides.iter().enumerate() {
            self.progress_reporter().report_progress(
                i + 1,
                total,
                Some(control_override.display_id()),
            );
            actions.push(planner.classify(control_override, index.lookup(control_override)));
        }

        let report = RebaseReport::completed(
            overlay_id.clone(),
            baseline.clone(),
            target.clone(),
            actions,
        );

        self.progress_reporter().report_completion(&format!(
            "✅ Rebase computed for {} override(s): {} keep, {} update, {} remove ({} blocking)",
            report.actions.len(),
            report.count_of(RebaseActionType::Keep),
            report.count_of(RebaseActionType::Update),
            report.count_of(RebaseActionType::Remove),
            report.blocking_conflict_count()
        ));

        Ok(report)
    }

    /// Persists the rebased overlay described by a clean report
    ///
    /// # Errors
    /// - `BlockingConflicts` if any action is a blocking conflict
    /// - `RebaseNotComputed` if the report did not complete
    /// - `ReportOverlayMismatch` if the report belongs to another overlay
    /// - `OverlayNotFound` if the source overlay is gone
    /// - `OverlayIdReused` if the store hands back the source id
    ///
    /// The first four are checked before the single write, so nothing is
    /// saved. `OverlayIdReused` can only be detected after `save` returns: it
    /// flags a store that broke the fresh-id contract, and by then that store
    /// may already have replaced the source overlay.
    pub async fn apply_rebase(
        &self,
        overlay_id: &OverlayId,
        report: &RebaseReport,
    ) -> Result<Overlay> {
        if report.has_blocking_conflicts() {
            return Err(BaselineError::BlockingConflicts {
                count: report.blocking_conflict_count(),
            }
            .into());
        }
        if !report.success {
            return Err(BaselineError::RebaseNotComputed {
                reason: report
                    .error_message
                    .clone()
                    .unwrap_or_else(|| "unknown failure".to_string()),
            }
            .into());
        }
        if &report.overlay_id != overlay_id {
            return Err(BaselineError::ReportOverlayMismatch {
                overlay_id: overlay_id.to_string(),
                report_overlay_id: report.overlay_id.to_string(),
            }
            .into());
        }

        let source = self
            .store
            .get(overlay_id)
            .await?
            .ok_or_else(|| BaselineError::OverlayNotFound {
                overlay_id: overlay_id.to_string(),
            })?;

        let draft = self.rebased_draft(&source, report);
        let saved = self.store.save(draft).await?;

        if saved.id == source.id {
            tracing::error!(
                overlay = %saved.id,
                "overlay store reused the source id for a rebased overlay"
            );
            return Err(BaselineError::OverlayIdReused {
                overlay_id: saved.id.to_string(),
            }
            .into());
        }

        tracing::info!(
            source = %source.id,
            rebased = %saved.id,
            target = %report.target_pack_id,
            overrides = saved.overrides.len(),
            "rebased overlay saved"
        );
        self.progress_reporter()
            .report_completion(&format!("💾 Saved rebased overlay '{}'", saved.id));

        Ok(saved)
    }

    fn rebased_draft(&self, source: &Overlay, report: &RebaseReport) -> OverlayDraft {
        let overrides = report
            .actions
            .iter()
            .filter_map(|action| match action.action {
                RebaseActionType::Keep => Some(action.original.clone()),
                RebaseActionType::Update => Some(self.policy.revise_override(
                    &action.original,
                    &action.changed_fields,
                    action.manual_changed,
                    &report.baseline_pack_id,
                    &report.target_pack_id,
                )),
                RebaseActionType::Remove => None,
            })
            .collect();

        OverlayDraft {
            name: format!("{} (Rebased)", source.name),
            baseline_pack_id: Some(report.target_pack_id.clone()),
            parent_overlay_id: Some(source.id.clone()),
            overrides,
            tool_setting_overrides: source.tool_setting_overrides.clone(),
        }
    }
}
