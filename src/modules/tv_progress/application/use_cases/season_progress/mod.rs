mod handler;
mod query;
mod result;

pub use handler::SeasonProgressHandler;
pub use query::SeasonProgressQuery;
pub use result::{EpisodeProgress, SeasonProgressResult};
