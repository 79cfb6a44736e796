pub mod control;
pub mod overlay;
pub mod rebase;
pub mod release_diff;

pub use control::{ContentPack, ControlKey, ControlRecord, KeySource, PackId};
pub use overlay::{
    ControlOverride, ControlStatus, Overlay, OverlayDraft, OverlayId, ToolSettingOverride,
};
pub use rebase::{RebaseAction, RebaseActionType, RebaseReport};
pub use release_diff::{ControlDiffItem, ControlField, DiffStatus, DiffTotals, ReleaseDiff};
