pub mod episode_key;
pub mod show_status;

pub use episode_key::EpisodeKey;
pub use show_status::{ShowStatus, StatusTransition};
