//! Order bookkeeping for the order-taking screen
//!
//! - **ledger**: `OrderLedger`, the single owner of menu, current order,
//!   open orders and daily history
//! - **event**: change notifications broadcast after every operation
//! - **export**: the daily history text format
//!
//! # Architecture
//!
//! ```text
//! key press → OrderLedger → LedgerEvent → UI
//!                  ↓
//!        export_history → ExportSink (file + share)
//! ```

pub mod event;
pub mod export;
pub mod ledger;

// Re-exports
pub use event::LedgerEvent;
pub use export::{EXPORT_FILE_NAME, render_history};
pub use ledger::{ExportJob, ExportOutcome, LedgerError, LedgerResult, OrderLedger};
