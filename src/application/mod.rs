/// Application layer - Use cases, DTOs and factories
///
/// Orchestrates the baseline domain services and reaches storage and output
/// only through ports.
pub mod dto;
pub mod factories;
pub mod use_cases;
