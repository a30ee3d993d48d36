pub mod catalog;
pub mod reviews;
pub mod tv_progress;
