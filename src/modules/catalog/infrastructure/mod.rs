pub mod caching_provider;
pub mod tmdb;

pub use caching_provider::{CachingCatalogProvider, CatalogCacheStats};
pub use tmdb::TmdbCatalogClient;
