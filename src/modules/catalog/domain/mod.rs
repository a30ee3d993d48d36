pub mod entities;
pub mod provider;

pub use entities::{CatalogEpisode, SeasonDetails, TvShowDetails};
pub use provider::CatalogProvider;
