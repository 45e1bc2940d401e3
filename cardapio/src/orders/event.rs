//! Ledger change notifications
//!
//! Published on a broadcast channel after every transition so the
//! presentation layer can re-render and surface notices.

use shared::{Decimal, Notice};

#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    /// One unit added to the current order
    ItemAdded {
        item_id: String,
        quantity: u32,
        total: Decimal,
    },
    /// Current order saved for a client
    OrderSaved {
        client_label: String,
        total: Decimal,
        open_orders: usize,
        history_len: usize,
    },
    /// Open order removed after being marked ready
    OrderReady { index: usize, client_label: String },
    /// Current order and open orders cleared
    OrdersReset,
    /// History emptied
    HistoryCleared { removed: usize },
    /// History handed to the export sink
    HistoryExported { records: usize },
    /// Something to show the user
    Notice(Notice),
}
