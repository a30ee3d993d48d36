pub mod episode_record;
pub mod tracked_show;

pub use episode_record::{EpisodeRecord, EpisodeUpdate};
pub use tracked_show::TrackedShow;
