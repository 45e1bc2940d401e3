//! # cardapio-export
//!
//! Export sink for the daily history - delivery only.
//!
//! ## Scope
//!
//! This crate handles HOW an export is delivered:
//! - Writing the UTF-8 payload into an application-private directory
//! - Handing the written file to a share action (`text/plain`)
//! - An in-memory sink for tests and dry runs
//!
//! WHAT is exported (the history text format) stays in the `cardapio` crate.
//!
//! ## Example
//!
//! ```ignore
//! use cardapio_export::{ExportSink, FileShareSink, ShareAction};
//!
//! let sink = FileShareSink::new("./data")
//!     .with_share(ShareAction::parse("xdg-open")?);
//! sink.export("historico_diario.txt", "Pedido 1\n...").await?;
//! ```

mod error;
mod sink;

// Re-exports
pub use error::{ExportError, ExportResult};
pub use sink::{ExportSink, FileShareSink, MemorySink, ShareAction, validate_file_name};

/// MIME type handed to the share action
pub const EXPORT_MIME_TYPE: &str = "text/plain";

/// Title shown by the share dialog
pub const SHARE_DIALOG_TITLE: &str = "Exportar Histórico Diário";
