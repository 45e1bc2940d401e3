use super::*;
use shared::Decimal;
use std::io;
use std::sync::{Arc, Mutex};


fn create_test_ledger() -> OrderLedger {
    OrderLedger::new(Menu::default())
}

fn menu_item(ledger: &OrderLedger, id: &str) -> MenuItem {
    ledger.menu().get(id).cloned().unwrap()
}

/// Add catalog items by id, in order
fn add_items(ledger: &mut OrderLedger, ids: &[&str]) {
    for id in ids {
        ledger.add_item_by_id(id).unwrap();
    }
}

/// Drain every event currently buffered on a receiver
fn drain_events(rx: &mut broadcast::Receiver<LedgerEvent>) -> Vec<LedgerEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn notices(events: &[LedgerEvent]) -> Vec<Notice> {
    events
        .iter()
        .filter_map(|event| match event {
            LedgerEvent::Notice(notice) => Some(notice.clone()),
            _ => None,
        })
        .collect()
}

/// Formatted log output captured from a test-local subscriber
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Install as the default subscriber for the current thread
    fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
