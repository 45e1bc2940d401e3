//! Shared types for Cardapio
//!
//! Menu catalog, order bookkeeping types, money formatting and the
//! user-facing notices shared by the ledger and the terminal UI.

pub mod message;
pub mod models;
pub mod money;
pub mod order;

// Re-exports
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};

pub use message::{Notice, NoticeLevel};
pub use models::{Menu, MenuError, MenuItem};
pub use order::{ClientOrder, CurrentOrder, HistoryRecord, OrderLine};
