/// Watch progress for TV shows
///
/// Per-user episode records and the show rollup (status, watched count)
/// that is derived from them. Every episode write goes through the
/// `EpisodeStatusReconciler` inside one repository transaction.
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod routes;

// Re-exports for easy external access
pub use application::{
    MarkAllEpisodesHandler, PendingBackfillHandler, SeasonProgressHandler, ToggleEpisodeHandler,
    TrackedShowService,
};
pub use domain::{EpisodeKey, EpisodeRecord, ProgressRepository, ShowStatus, TrackedShow};
pub use infrastructure::{InMemoryWatchStore, ProgressRepositoryImpl};
