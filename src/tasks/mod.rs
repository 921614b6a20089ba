//! Target catalog and sequential step dispatch

pub mod dispatcher;
pub mod error;
pub mod plan;
pub mod types;


// Re-export commonly used items
pub use dispatcher::TaskDispatcher;
pub use error::TaskResult;
pub use types::Target;
