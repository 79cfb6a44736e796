//! Baseline domain: control snapshots, release diffs, overlays and rebase decisions.
//!
//! Everything here is pure; loading and persisting happen behind the ports.
pub mod domain;
pub mod policies;
pub mod services;
