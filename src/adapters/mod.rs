/// Adapters layer - Infrastructure implementations
///
/// Concrete implementations of the outbound ports: the data-dir catalog and
/// overlay store, in-memory equivalents, report formatters and console output.
/// The CLI in `main.rs` is the only inbound adapter.
pub mod outbound;
