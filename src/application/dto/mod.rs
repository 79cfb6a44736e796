/// Data Transfer Objects for application layer
///
/// DTOs carry choices made at the edges (CLI, config file) into the
/// application layer without leaking adapter types into the domain.
mod output_format;

pub use output_format::OutputFormat;
