mod command;
mod handler;
mod result;

pub use command::ToggleEpisodeCommand;
pub use handler::ToggleEpisodeHandler;
pub use result::EpisodeToggleResult;
