pub mod entities;
pub mod repositories;
pub mod services;
pub mod value_objects;

// Re-exports for easy access
pub use entities::{EpisodeRecord, EpisodeUpdate, TrackedShow};
pub use repositories::{ProgressRepository, ProgressTx, ProgressWork};
pub use services::{EpisodeStatusReconciler, ReconcileOutcome, ReconcilePlan};
pub use value_objects::{EpisodeKey, ShowStatus, StatusTransition};
