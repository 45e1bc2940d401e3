//! Cardapio Rapido - counter order taking
//!
//! Takes orders from a fixed menu, keeps the orders waiting to be served
//! and a daily history of every saved order, and exports that history as
//! a text file handed to a share program.
//!
//! # Modules
//!
//! - [`orders`] - `OrderLedger`, its events and the export text format
//! - [`core`] - configuration from the environment
//! - [`tui`] - the ratatui screen
//! - [`utils`] - logging setup

pub mod core;
pub mod orders;
pub mod tui;
pub mod utils;

// Re-export public types
pub use self::core::Config;
pub use orders::{ExportJob, ExportOutcome, LedgerError, LedgerEvent, LedgerResult, OrderLedger};
