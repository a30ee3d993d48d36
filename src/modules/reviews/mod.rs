pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod routes;

// Re-exports for easy external access
pub use application::service::ReviewService;
pub use domain::{Review, ReviewItemType, ReviewRepository};
pub use infrastructure::ReviewRepositoryImpl;
