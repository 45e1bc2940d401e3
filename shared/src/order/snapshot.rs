//! Order state: the order being built and the frozen copies taken at save time
//!
//! `CurrentOrder::total` is maintained incrementally on every add; since
//! lines are never removed or repriced after being added, it always equals
//! the recomputed sum of `price * quantity`. `ClientOrder` totals are frozen
//! at save time and never recomputed.

use super::types::OrderLine;
use crate::models::MenuItem;
use rust_decimal::Decimal;
use std::sync::Arc;

/// The order being assembled for the client currently being served
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentOrder {
    lines: Vec<OrderLine>,
    total: Decimal,
}

impl CurrentOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a menu item
    ///
    /// Increments the quantity of an existing line with the same id, or
    /// appends a new line. Returns the line's new quantity.
    pub fn add(&mut self, item: &MenuItem) -> u32 {
        let quantity = match self.lines.iter_mut().find(|line| line.id == item.id) {
            Some(line) => {
                line.quantity += 1;
                line.quantity
            }
            None => {
                self.lines.push(OrderLine::from_menu_item(item));
                1
            }
        };
        self.total += item.price;
        debug_assert_eq!(self.total, self.recomputed_total());
        quantity
    }

    /// Lines in insertion order
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Σ(price × quantity) over all lines
    pub fn recomputed_total(&self) -> Decimal {
        self.lines.iter().map(OrderLine::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Reset to no lines and total 0
    pub fn clear(&mut self) {
        self.lines.clear();
        self.total = Decimal::ZERO;
    }

    /// Freeze into a client order, leaving this order empty
    pub fn take(&mut self, client_label: impl Into<String>) -> ClientOrder {
        let lines: Arc<[OrderLine]> = std::mem::take(&mut self.lines).into();
        let total = std::mem::take(&mut self.total);
        ClientOrder {
            client_label: client_label.into(),
            lines,
            total,
        }
    }
}

/// A saved order for one table or client
///
/// Cloning shares the (immutable) lines but copies label and total, so the
/// open-order entry and its history entry are independent values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOrder {
    /// Table number or client name (non-empty)
    pub client_label: String,
    /// Lines as they were when the order was saved
    pub lines: Arc<[OrderLine]>,
    /// Total frozen at save time
    pub total: Decimal,
}

/// An entry of the daily history; same shape as an open order
pub type HistoryRecord = ClientOrder;

impl ClientOrder {
    /// Number of lines in the order
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total number of units across all lines
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}
