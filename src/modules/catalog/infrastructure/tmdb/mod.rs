mod client;
mod mapper;
mod models;

pub use client::TmdbCatalogClient;
