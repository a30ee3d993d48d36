pub mod entities;
pub mod repository;

pub use entities::{Review, ReviewItemType};
pub use repository::ReviewRepository;
