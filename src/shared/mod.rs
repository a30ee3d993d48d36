// Shared Kernel
// Cross-cutting pieces used by every bounded context under `modules/`

pub mod application; // Use-case traits
pub mod cache; // Generic TTL cache with invalidation notifications
pub mod config; // Environment-driven configuration
pub mod errors; // Shared error types
pub mod http; // Axum extractors and response helpers
pub mod infrastructure; // Database pool and migrations
pub mod utils; // Logging and validation helpers

// Re-exports for convenience
pub use config::AppConfig;
pub use errors::{AppError, AppResult};
pub use infrastructure::database::Database;
