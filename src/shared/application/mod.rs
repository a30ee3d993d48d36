/// Shared application layer patterns
///
/// This module contains application-level abstractions used across
/// multiple bounded contexts.
pub mod use_case;

pub use use_case::{Query, UseCase};
