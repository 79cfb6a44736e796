mod baseline_differ;
mod fingerprinter;
mod key_resolver;
mod rebase_planner;

pub use baseline_differ::{BaselineDiffer, ControlIndex};
pub use fingerprinter::Fingerprinter;
pub use key_resolver::KeyResolver;
pub use rebase_planner::{DiffIndex, RebasePlanner};
