//! OrderLedger - owns all order bookkeeping for the screen
//!
//! # Flow
//!
//! ```text
//! UI event → OrderLedger operation → state mutated → LedgerEvent broadcast
//!                                                          ↓
//!                                                 UI re-renders / shows notice
//! ```
//!
//! Every operation runs to completion on the caller's task. Only the
//! export leaves the process (through an [`ExportSink`]) and it never
//! mutates the ledger, so a failed export can simply be repeated.
//!
//! The export is split so the sink can run elsewhere:
//!
//! ```text
//! begin_export() → ExportJob → sink.export(..) on any task → complete_export(job, result)
//! ```
//!
//! `export_history` does all three inline.

mod error;

#[cfg(test)]
mod tests;

pub use error::{LedgerError, LedgerResult};

use super::event::LedgerEvent;
use super::export::{EXPORT_FILE_NAME, render_history};
use cardapio_export::{ExportResult, ExportSink};
use shared::{ClientOrder, CurrentOrder, HistoryRecord, Menu, MenuItem, Notice};
use tokio::sync::broadcast;

/// Event broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Result of an export request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// History was empty; the sink was not called
    Empty,
    /// History handed to the sink
    Exported { records: usize, bytes: usize },
}

/// A rendered history waiting to be handed to a sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    pub file_name: String,
    pub text: String,
    /// History records rendered into `text`
    pub records: usize,
}

/// Menu, current order, open orders and daily history for one session
pub struct OrderLedger {
    menu: Menu,
    current: CurrentOrder,
    /// Text of the table/client input field
    client_label: String,
    open_orders: Vec<ClientOrder>,
    history: Vec<HistoryRecord>,
    export_file_name: String,
    event_tx: broadcast::Sender<LedgerEvent>,
}

impl std::fmt::Debug for OrderLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderLedger")
            .field("menu_items", &self.menu.len())
            .field("current", &self.current)
            .field("client_label", &self.client_label)
            .field("open_orders", &self.open_orders.len())
            .field("history", &self.history.len())
            .field("event_tx", &"<broadcast::Sender>")
            .finish()
    }
}

impl Default for OrderLedger {
    fn default() -> Self {
        Self::new(Menu::default())
    }
}

impl OrderLedger {
    /// Create an empty ledger over a catalog
    pub fn new(menu: Menu) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        tracing::info!(menu_items = menu.len(), "OrderLedger started");
        Self {
            menu,
            current: CurrentOrder::new(),
            client_label: String::new(),
            open_orders: Vec::new(),
            history: Vec::new(),
            export_file_name: EXPORT_FILE_NAME.to_string(),
            event_tx,
        }
    }

    /// Override the exported file name
    pub fn with_export_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.export_file_name = file_name.into();
        self
    }

    /// Subscribe to ledger events
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.event_tx.subscribe()
    }

    fn publish(&self, event: LedgerEvent) {
        // No subscribers is fine
        let _ = self.event_tx.send(event);
    }

    fn notify(&self, notice: Notice) {
        tracing::debug!(level = %notice.level(), "{}", notice);
        self.publish(LedgerEvent::Notice(notice));
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn current_order(&self) -> &CurrentOrder {
        &self.current
    }

    pub fn open_orders(&self) -> &[ClientOrder] {
        &self.open_orders
    }

    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    pub fn client_label(&self) -> &str {
        &self.client_label
    }

    /// Set the table/client input text
    pub fn set_client_label(&mut self, label: impl Into<String>) {
        self.client_label = label.into();
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Add one unit of a catalog item to the current order
    ///
    /// Returns the item's quantity in the current order after the add.
    pub fn add_item(&mut self, item: &MenuItem) -> u32 {
        let quantity = self.current.add(item);
        let total = self.current.total();
        tracing::info!(item_id = %item.id, quantity, total = %total, "Item added");
        self.publish(LedgerEvent::ItemAdded {
            item_id: item.id.clone(),
            quantity,
            total,
        });
        quantity
    }

    /// Add one unit of the catalog item with this id
    pub fn add_item_by_id(&mut self, id: &str) -> LedgerResult<u32> {
        let Some(item) = self.menu.get(id).cloned() else {
            tracing::warn!(item_id = %id, "Unknown menu item");
            let err = LedgerError::UnknownMenuItem(id.to_string());
            self.notify(err.notice());
            return Err(err);
        };
        Ok(self.add_item(&item))
    }

    /// Save the current order for a table or client
    ///
    /// A blank label leaves everything untouched. Otherwise the order is
    /// appended to both the open orders and the history, then the current
    /// order and the label input are cleared.
    pub fn save_order(&mut self, client_label: &str) -> LedgerResult<&ClientOrder> {
        if client_label.trim().is_empty() {
            tracing::warn!("Save rejected: empty client label");
            let err = LedgerError::Validation("client label must not be empty".to_string());
            self.notify(err.notice());
            return Err(err);
        }

        let order = self.current.take(client_label);
        self.client_label.clear();

        tracing::info!(
            client = %order.client_label,
            lines = order.line_count(),
            items = order.item_count(),
            total = %order.total,
            "Order saved"
        );

        self.history.push(order.clone());
        self.open_orders.push(order);

        let saved = &self.open_orders[self.open_orders.len() - 1];
        self.publish(LedgerEvent::OrderSaved {
            client_label: saved.client_label.clone(),
            total: saved.total,
            open_orders: self.open_orders.len(),
            history_len: self.history.len(),
        });
        Ok(saved)
    }

    /// Save the current order under the label currently in the input field
    pub fn save_pending_order(&mut self) -> LedgerResult<&ClientOrder> {
        let label = self.client_label.clone();
        self.save_order(&label)
    }

    /// Remove an open order once it is ready
    ///
    /// Out-of-range indexes are ignored. History is not touched.
    pub fn mark_ready(&mut self, index: usize) -> Option<ClientOrder> {
        if index >= self.open_orders.len() {
            tracing::debug!(index, open = self.open_orders.len(), "mark_ready out of range");
            return None;
        }

        let order = self.open_orders.remove(index);
        tracing::info!(index, client = %order.client_label, "Order ready");
        self.publish(LedgerEvent::OrderReady {
            index,
            client_label: order.client_label.clone(),
        });
        Some(order)
    }

    /// Clear the current order, the open orders and the label input
    pub fn reset_all(&mut self) {
        self.current.clear();
        self.open_orders.clear();
        self.client_label.clear();
        tracing::info!("Orders reset");
        self.publish(LedgerEvent::OrdersReset);
    }

    /// Empty the daily history
    pub fn clear_history(&mut self) {
        let removed = self.history.len();
        self.history.clear();
        tracing::info!(removed, "History cleared");
        self.publish(LedgerEvent::HistoryCleared { removed });
        self.notify(Notice::HistoryCleared);
    }

    /// Render the history in export format
    pub fn render_history(&self) -> String {
        render_history(&self.history)
    }

    /// Render the history for export
    ///
    /// Returns `None` (and notifies `HistoryEmpty`) when there is nothing
    /// to export.
    pub fn begin_export(&self) -> Option<ExportJob> {
        if self.history.is_empty() {
            tracing::info!("Export skipped: history is empty");
            self.notify(Notice::HistoryEmpty);
            return None;
        }

        let job = ExportJob {
            file_name: self.export_file_name.clone(),
            text: self.render_history(),
            records: self.history.len(),
        };
        tracing::info!(records = job.records, file = %job.file_name, "Exporting history");
        Some(job)
    }

    /// Report the sink's result for a job from [`begin_export`](Self::begin_export)
    pub fn complete_export(
        &self,
        job: &ExportJob,
        result: ExportResult<()>,
    ) -> LedgerResult<ExportOutcome> {
        if let Err(e) = result {
            tracing::error!(error = %e, records = job.records, "Export sink failure");
            let err = LedgerError::from(e);
            self.notify(err.notice());
            return Err(err);
        }

        self.publish(LedgerEvent::HistoryExported {
            records: job.records,
        });
        self.notify(Notice::ExportCompleted);
        Ok(ExportOutcome::Exported {
            records: job.records,
            bytes: job.text.len(),
        })
    }

    /// Hand the rendered history to an export sink and wait for it
    ///
    /// An empty history short-circuits without calling the sink.
    pub async fn export_history<S: ExportSink>(&self, sink: &S) -> LedgerResult<ExportOutcome> {
        let Some(job) = self.begin_export() else {
            return Ok(ExportOutcome::Empty);
        };
        let result = sink.export(&job.file_name, &job.text).await;
        self.complete_export(&job, result)
    }
}
