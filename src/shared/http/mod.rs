//! Request-boundary helpers shared by every module's routes

pub mod extractors;

pub use extractors::{ApiJson, ApiQuery, CurrentUser, USER_ID_HEADER};
