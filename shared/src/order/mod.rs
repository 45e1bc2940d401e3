//! Order bookkeeping types
//!
//! - `types`: a single order line
//! - `snapshot`: the order being built and the copies frozen at save time

pub mod snapshot;
pub mod types;

// Re-exports
pub use snapshot::{ClientOrder, CurrentOrder, HistoryRecord};
pub use types::OrderLine;
