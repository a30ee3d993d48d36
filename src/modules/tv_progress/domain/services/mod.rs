pub mod reconciler;

pub use reconciler::{EpisodeStatusReconciler, ReconcileOutcome, ReconcilePlan};
