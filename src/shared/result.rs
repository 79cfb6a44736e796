/// Result alias used by every layer; `BaselineError` values are carried inside `anyhow::Error`
/// and can be recovered with `downcast_ref`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
