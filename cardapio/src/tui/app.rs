//! Screen state and key handling

use crate::orders::{ExportJob, ExportOutcome, LedgerEvent, OrderLedger};
use cardapio_export::{ExportError, ExportResult, ExportSink};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::widgets::ListState;
use shared::Notice;
use std::sync::Arc;
use tokio::sync::{broadcast, oneshot};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;
use tui_logger::{TuiWidgetEvent, TuiWidgetState};

/// Which panel receives keys
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Menu,
    Label,
    Orders,
    History,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Menu => Focus::Label,
            Focus::Label => Focus::Orders,
            Focus::Orders => Focus::History,
            Focus::History => Focus::Menu,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Menu => Focus::History,
            Focus::Label => Focus::Menu,
            Focus::Orders => Focus::Label,
            Focus::History => Focus::Orders,
        }
    }
}

/// Export running on its own task
struct PendingExport {
    job: ExportJob,
    result_rx: oneshot::Receiver<ExportResult<()>>,
}

pub struct App<S> {
    pub(super) ledger: OrderLedger,
    sink: Arc<S>,
    events: broadcast::Receiver<LedgerEvent>,
    pending_export: Option<PendingExport>,
    /// Table/client field
    pub(super) input: Input,
    pub(super) focus: Focus,
    pub(super) menu_state: ListState,
    pub(super) orders_state: ListState,
    pub(super) history_state: ListState,
    /// Latest notice, shown until replaced
    pub(super) notice: Option<Notice>,
    pub(super) logger_state: TuiWidgetState,
    should_quit: bool,
}

impl<S: ExportSink + Send + Sync + 'static> App<S> {
    pub fn new(ledger: OrderLedger, sink: S) -> Self {
        let events = ledger.subscribe();
        let mut menu_state = ListState::default();
        if !ledger.menu().is_empty() {
            menu_state.select(Some(0));
        }
        Self {
            input: Input::new(ledger.client_label().to_string()),
            ledger,
            sink: Arc::new(sink),
            events,
            pending_export: None,
            focus: Focus::default(),
            menu_state,
            orders_state: ListState::default(),
            history_state: ListState::default(),
            notice: None,
            logger_state: TuiWidgetState::new(),
            should_quit: false,
        }
    }

    pub fn ledger(&self) -> &OrderLedger {
        &self.ledger
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// An export was handed to the sink and has not reported back yet
    pub fn export_pending(&self) -> bool {
        self.pending_export.is_some()
    }

    /// Apply one key press, then pull ledger events into screen state
    ///
    /// Must be called inside a tokio runtime: exports are spawned.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            return;
        }

        match key.code {
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::PageUp => self.logger_state.transition(TuiWidgetEvent::PrevPageKey),
            KeyCode::PageDown => self.logger_state.transition(TuiWidgetEvent::NextPageKey),
            _ => match self.focus {
                Focus::Label => self.handle_label_key(key),
                Focus::Menu | Focus::Orders | Focus::History => self.handle_panel_key(key),
            },
        }

        self.drain_events();
    }

    fn handle_label_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.save_order(),
            KeyCode::Esc => self.focus = Focus::Menu,
            _ => {
                if self.input.handle_event(&Event::Key(key)).is_some() {
                    self.ledger.set_client_label(self.input.value());
                }
            }
        }
    }

    fn handle_panel_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up => self.select_prev(),
            KeyCode::Down => self.select_next(),
            KeyCode::Enter if self.focus == Focus::Menu => self.add_selected_item(),
            KeyCode::Enter if self.focus == Focus::Orders => self.mark_selected_ready(),
            KeyCode::Char('s') => self.save_order(),
            KeyCode::Char('x') => self.start_export(),
            KeyCode::Char('z') => self.ledger.clear_history(),
            KeyCode::Char('r') => self.ledger.reset_all(),
            _ => {}
        }
    }

    fn add_selected_item(&mut self) {
        let selected = self
            .menu_state
            .selected()
            .and_then(|idx| self.ledger.menu().items().get(idx))
            .cloned();
        if let Some(item) = selected {
            self.ledger.add_item(&item);
        }
    }

    fn mark_selected_ready(&mut self) {
        if let Some(idx) = self.orders_state.selected() {
            self.ledger.mark_ready(idx);
        }
    }

    fn save_order(&mut self) {
        if self.ledger.save_pending_order().is_ok() {
            self.focus = Focus::Menu;
        }
    }

    /// Hand the rendered history to the sink on a separate task
    fn start_export(&mut self) {
        if self.pending_export.is_some() {
            tracing::info!("Export already in progress");
            return;
        }
        let Some(job) = self.ledger.begin_export() else {
            return;
        };

        let (result_tx, result_rx) = oneshot::channel();
        let sink = Arc::clone(&self.sink);
        let file_name = job.file_name.clone();
        let text = job.text.clone();
        tokio::spawn(async move {
            let result = sink.export(&file_name, &text).await;
            // Screen already closed if the receiver is gone
            let _ = result_tx.send(result);
        });

        self.pending_export = Some(PendingExport { job, result_rx });
    }

    /// Report a finished export to the ledger
    fn poll_export(&mut self) {
        let Some(pending) = self.pending_export.as_mut() else {
            return;
        };
        let result = match pending.result_rx.try_recv() {
            Ok(result) => result,
            Err(oneshot::error::TryRecvError::Empty) => return,
            Err(oneshot::error::TryRecvError::Closed) => Err(ExportError::ShareUnavailable(
                "export task stopped before reporting".to_string(),
            )),
        };

        let Some(PendingExport { job, .. }) = self.pending_export.take() else {
            return;
        };
        match self.ledger.complete_export(&job, result) {
            Ok(ExportOutcome::Exported { records, bytes }) => {
                tracing::debug!(records, bytes, "Export delivered");
            }
            Ok(ExportOutcome::Empty) => {}
            Err(e) => tracing::debug!(error = %e, "Export not delivered"),
        }
    }

    fn select_prev(&mut self) {
        let (state, len) = self.focused_list();
        if len == 0 {
            return;
        }
        let idx = state.selected().map_or(0, |i| i.saturating_sub(1));
        state.select(Some(idx));
    }

    fn select_next(&mut self) {
        let (state, len) = self.focused_list();
        if len == 0 {
            return;
        }
        let idx = state.selected().map_or(0, |i| (i + 1).min(len - 1));
        state.select(Some(idx));
    }

    fn focused_list(&mut self) -> (&mut ListState, usize) {
        match self.focus {
            Focus::Orders => (&mut self.orders_state, self.ledger.open_orders().len()),
            Focus::History => (&mut self.history_state, self.ledger.history().len()),
            Focus::Menu | Focus::Label => (&mut self.menu_state, self.ledger.menu().len()),
        }
    }

    /// Pull pending ledger events and export results into screen state
    pub fn drain_events(&mut self) {
        self.poll_export();

        loop {
            match self.events.try_recv() {
                Ok(LedgerEvent::Notice(notice)) => self.notice = Some(notice),
                Ok(LedgerEvent::OrderSaved {
                    open_orders,
                    history_len,
                    ..
                }) => {
                    // Keep the newest order in view
                    self.orders_state.select(open_orders.checked_sub(1));
                    self.history_state.select(history_len.checked_sub(1));
                }
                Ok(_) => {}
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "UI lagged behind ledger events");
                }
                Err(broadcast::error::TryRecvError::Empty | broadcast::error::TryRecvError::Closed) => {
                    break;
                }
            }
        }

        if self.input.value() != self.ledger.client_label() {
            self.input = Input::new(self.ledger.client_label().to_string());
        }

        clamp_selection(&mut self.orders_state, self.ledger.open_orders().len());
        clamp_selection(&mut self.history_state, self.ledger.history().len());
    }
}

/// Keep a selection inside `0..len`, selecting the first entry when unset
fn clamp_selection(state: &mut ListState, len: usize) {
    match state.selected() {
        _ if len == 0 => state.select(None),
        Some(idx) if idx >= len => state.select(Some(len - 1)),
        None => state.select(Some(0)),
        Some(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardapio_export::MemorySink;
    use crossterm::event::KeyModifiers;
    use shared::Decimal;
    use std::time::Duration;
    use tokio::sync::Semaphore;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn create_test_app() -> App<MemorySink> {
        App::new(OrderLedger::default(), MemorySink::new())
    }

    fn type_text<S: ExportSink + Send + Sync + 'static>(app: &mut App<S>, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    /// Add the selected menu item and save it under `label`
    fn save_order_as<S: ExportSink + Send + Sync + 'static>(app: &mut App<S>, label: &str) {
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Tab));
        type_text(app, label);
        app.handle_key(key(KeyCode::Enter));
    }

    async fn wait_for_export<S: ExportSink + Send + Sync + 'static>(app: &mut App<S>) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while app.export_pending() {
                tokio::task::yield_now().await;
                app.drain_events();
            }
        })
        .await
        .unwrap();
    }

    /// Sink that holds every export until a permit is released
    struct GatedSink {
        gate: Semaphore,
        inner: MemorySink,
    }

    impl GatedSink {
        fn closed() -> Self {
            Self {
                gate: Semaphore::new(0),
                inner: MemorySink::new(),
            }
        }
    }

    impl ExportSink for GatedSink {
        async fn export(&self, file_name: &str, text: &str) -> ExportResult<()> {
            let _permit = self
                .gate
                .acquire()
                .await
                .map_err(|e| ExportError::ShareUnavailable(e.to_string()))?;
            self.inner.export(file_name, text).await
        }
    }

    #[tokio::test]
    async fn test_enter_on_menu_adds_selected_item() {
        let mut app = create_test_app();

        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));

        let current = app.ledger().current_order();
        assert_eq!(current.lines().len(), 2);
        assert_eq!(current.lines()[0].quantity, 2);
        assert_eq!(current.lines()[1].quantity, 1);
        assert_eq!(current.total(), current.recomputed_total());
    }

    #[tokio::test]
    async fn test_label_field_saves_order() {
        let mut app = create_test_app();
        app.handle_key(key(KeyCode::Enter));

        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus(), Focus::Label);
        type_text(&mut app, "Mesa 3");
        assert_eq!(app.ledger().client_label(), "Mesa 3");

        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.ledger().open_orders().len(), 1);
        assert_eq!(app.ledger().open_orders()[0].client_label, "Mesa 3");
        assert_eq!(app.ledger().history().len(), 1);
        assert_eq!(app.ledger().current_order().total(), Decimal::ZERO);
        assert_eq!(app.input.value(), "");
        assert_eq!(app.focus(), Focus::Menu);
        assert_eq!(app.orders_state.selected(), Some(0));
        assert_eq!(app.history_state.selected(), Some(0));
    }

    #[tokio::test]
    async fn test_save_without_label_shows_notice() {
        let mut app = create_test_app();
        app.handle_key(key(KeyCode::Enter));

        app.handle_key(key(KeyCode::Char('s')));

        assert_eq!(app.notice(), Some(&Notice::MissingClientLabel));
        assert!(app.ledger().open_orders().is_empty());
        assert!(!app.ledger().current_order().is_empty());
    }

    #[tokio::test]
    async fn test_shortcut_letters_are_text_in_label_field() {
        let mut app = create_test_app();
        app.handle_key(key(KeyCode::Tab));

        type_text(&mut app, "qxzr");

        assert!(!app.should_quit());
        assert_eq!(app.ledger().client_label(), "qxzr");

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.focus(), Focus::Menu);
        assert!(!app.should_quit());

        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_newest_order_selected_after_save() {
        let mut app = create_test_app();
        for label in ["Mesa 1", "Mesa 2", "Mesa 3"] {
            save_order_as(&mut app, label);
        }

        assert_eq!(app.orders_state.selected(), Some(2));
        assert_eq!(app.history_state.selected(), Some(2));
    }

    #[tokio::test]
    async fn test_enter_on_orders_marks_ready() {
        let mut app = create_test_app();
        save_order_as(&mut app, "Mesa 1");
        save_order_as(&mut app, "Mesa 2");

        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus(), Focus::Orders);
        app.handle_key(key(KeyCode::Up));
        app.handle_key(key(KeyCode::Enter));

        let open = app.ledger().open_orders();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].client_label, "Mesa 2");
        assert_eq!(app.ledger().history().len(), 2);
        assert_eq!(app.orders_state.selected(), Some(0));
    }

    #[tokio::test]
    async fn test_history_panel_scrolls_with_arrows() {
        let mut app = create_test_app();
        for label in ["Mesa 1", "Mesa 2", "Mesa 3"] {
            save_order_as(&mut app, label);
        }

        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.focus(), Focus::History);
        app.handle_key(key(KeyCode::Up));
        app.handle_key(key(KeyCode::Up));
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.history_state.selected(), Some(0));

        // Enter does nothing in the history panel
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.ledger().open_orders().len(), 3);

        app.handle_key(key(KeyCode::Char('z')));
        assert_eq!(app.history_state.selected(), None);
    }

    #[tokio::test]
    async fn test_export_and_clear_shortcuts() {
        let mut app = create_test_app();

        app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(app.notice(), Some(&Notice::HistoryEmpty));
        assert!(!app.export_pending());

        app.handle_key(key(KeyCode::Enter));
        app.ledger.set_client_label("Balcão");
        app.handle_key(key(KeyCode::Char('s')));
        app.handle_key(key(KeyCode::Char('x')));
        wait_for_export(&mut app).await;

        assert_eq!(app.notice(), Some(&Notice::ExportCompleted));
        assert_eq!(app.sink.export_count(), 1);

        app.handle_key(key(KeyCode::Char('z')));
        assert_eq!(app.notice(), Some(&Notice::HistoryCleared));
        assert!(app.ledger().history().is_empty());
        assert_eq!(app.ledger().open_orders().len(), 1);
    }

    #[tokio::test]
    async fn test_keys_handled_while_export_pending() {
        let mut app = App::new(OrderLedger::default(), GatedSink::closed());
        save_order_as(&mut app, "Mesa 4");

        app.handle_key(key(KeyCode::Char('x')));
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        app.drain_events();
        assert!(app.export_pending());
        assert_eq!(app.sink.inner.export_count(), 0);

        // The screen keeps taking orders meanwhile
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.ledger().current_order().lines().len(), 1);
        app.handle_key(key(KeyCode::Char('x')));
        assert_ne!(app.notice(), Some(&Notice::ExportCompleted));

        app.sink.gate.add_permits(1);
        wait_for_export(&mut app).await;

        assert_eq!(app.notice(), Some(&Notice::ExportCompleted));
        // The second 'x' did not start another export
        assert_eq!(app.sink.inner.export_count(), 1);
        assert_eq!(app.sink.inner.exports()[0].1, app.ledger().render_history());
    }

    #[tokio::test]
    async fn test_failed_export_reported_from_task() {
        let mut app = create_test_app();
        save_order_as(&mut app, "Mesa 5");
        app.sink.fail_with("share dismissed");

        app.handle_key(key(KeyCode::Char('x')));
        wait_for_export(&mut app).await;

        assert_eq!(app.notice(), Some(&Notice::ExportFailed));
        assert_eq!(app.ledger().history().len(), 1);
    }

    #[tokio::test]
    async fn test_reset_clears_label_field() {
        let mut app = create_test_app();
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "Mesa 9");
        app.handle_key(key(KeyCode::Tab));

        app.handle_key(key(KeyCode::Char('r')));

        assert_eq!(app.input.value(), "");
        assert!(app.ledger().current_order().is_empty());
    }
}
