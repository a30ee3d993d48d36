pub mod in_memory;
pub mod progress_repository_impl;

pub use in_memory::InMemoryWatchStore;
pub use progress_repository_impl::ProgressRepositoryImpl;
