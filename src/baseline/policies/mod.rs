mod rebase_policy;

pub use rebase_policy::{ChangedDecision, RebasePolicy, DEFAULT_CHANGED_CONFIDENCE};
