/// Catalog metadata collaborator
///
/// Read-only access to TV show and season metadata (episode counts, names,
/// runtimes). The domain only sees the `CatalogProvider` port; TMDB and the
/// caching decorator live in infrastructure.
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use domain::{CatalogEpisode, CatalogProvider, SeasonDetails, TvShowDetails};
pub use infrastructure::{CachingCatalogProvider, CatalogCacheStats, TmdbCatalogClient};
