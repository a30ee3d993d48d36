pub mod models;
pub mod repository_impl;

pub use repository_impl::ReviewRepositoryImpl;
