pub mod adoption;
pub mod service;
pub mod use_cases;

// Re-export commonly used types
pub use service::TrackedShowService;
pub use use_cases::{
    EpisodeProgress, EpisodeToggleResult, MarkAllEpisodesCommand, MarkAllEpisodesHandler,
    MarkAllEpisodesResult, PendingBackfillHandler, PendingBackfillQuery, PendingBackfillResult,
    SeasonProgressHandler, SeasonProgressQuery, SeasonProgressResult, ToggleEpisodeCommand,
    ToggleEpisodeHandler,
};
