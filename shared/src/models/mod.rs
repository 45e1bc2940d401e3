//! Data models
//!
//! Catalog types shared between the ledger and the terminal UI.

pub mod menu;

// Re-exports
pub use menu::*;
