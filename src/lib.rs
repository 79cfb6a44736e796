//! baseline-rebase - release diffing and overlay rebasing for STIG content packs
//!
//! Compares two imported releases of a compliance baseline control by
//! control, and carries an organization's overlay (its deviations from a
//! baseline) forward onto the newer release with an explicit, reviewable
//! action per override.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`baseline`): Control keys, fingerprints, diff and rebase planning
//! - **Application Layer** (`application`): Use cases, DTOs and factories
//! - **Ports** (`ports`): Interface definitions for storage and output
//! - **Adapters** (`adapters`): Filesystem, in-memory, formatter and console implementations
//! - **Shared** (`shared`): Error types, result alias and file security helpers
//!
//! # Example
//!
//! ```no_run
//! use baseline_rebase::prelude::*;
//! use std::path::Path;
//!
//! # async fn example() -> Result<()> {
//! let data_dir = Path::new("/srv/baselines");
//! let use_case = RebaseOverlayUseCase::new(
//!     FileSystemCatalog::new(data_dir),
//!     FileSystemOverlayStore::new(data_dir),
//!     StderrProgressReporter::new(),
//!     RebasePolicy::default(),
//! );
//!
//! let overlay = OverlayId::new("finance-workstations")?;
//! let report = use_case
//!     .compute_rebase(&overlay, &PackId::new("win11-v1r1")?, &PackId::new("win11-v1r2")?)
//!     .await?;
//!
//! if report.success && !report.has_blocking_conflicts() {
//!     let rebased = use_case.apply_rebase(&overlay, &report).await?;
//!     println!("New overlay: {}", rebased.id);
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod baseline;
pub mod config;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemCatalog, FileSystemOverlayStore, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{
        CsvDiffFormatter, JsonDiffFormatter, JsonRebaseFormatter, TableDiffFormatter,
        TableRebaseFormatter,
    };
    pub use crate::adapters::outbound::memory::{InMemoryControlCatalog, InMemoryOverlayStore};
    pub use crate::application::dto::OutputFormat;
    pub use crate::application::use_cases::{CompareReleasesUseCase, RebaseOverlayUseCase};
    pub use crate::baseline::domain::{
        ContentPack, ControlDiffItem, ControlField, ControlKey, ControlOverride, ControlRecord,
        ControlStatus, DiffStatus, DiffTotals, KeySource, Overlay, OverlayDraft, OverlayId,
        PackId, RebaseAction, RebaseActionType, RebaseReport, ReleaseDiff, ToolSettingOverride,
    };
    pub use crate::baseline::policies::RebasePolicy;
    pub use crate::baseline::services::{BaselineDiffer, ControlIndex, Fingerprinter, KeyResolver};
    pub use crate::ports::outbound::{
        ControlCatalog, DiffFormatter, OutputPresenter, OverlayStore, ProgressReporter,
        RebaseFormatter,
    };
    pub use crate::shared::error::{BaselineError, ExitCode};
    pub use crate::shared::Result;
}
