mod handler;
mod query;
mod result;

pub use handler::PendingBackfillHandler;
pub use query::PendingBackfillQuery;
pub use result::PendingBackfillResult;
