pub mod mark_all_episodes;
pub mod pending_backfill;
pub mod season_progress;
pub mod toggle_episode;

pub use mark_all_episodes::{MarkAllEpisodesCommand, MarkAllEpisodesHandler, MarkAllEpisodesResult};
pub use pending_backfill::{PendingBackfillHandler, PendingBackfillQuery, PendingBackfillResult};
pub use season_progress::{
    EpisodeProgress, SeasonProgressHandler, SeasonProgressQuery, SeasonProgressResult,
};
pub use toggle_episode::{EpisodeToggleResult, ToggleEpisodeCommand, ToggleEpisodeHandler};
