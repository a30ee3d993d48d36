mod command;
mod handler;
mod result;

pub use command::MarkAllEpisodesCommand;
pub use handler::MarkAllEpisodesHandler;
pub use result::MarkAllEpisodesResult;
