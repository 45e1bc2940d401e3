use cardapio_export::ExportError;
use shared::Notice;
use thiserror::Error;

/// Ledger errors
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Client label missing or blank at save time
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Menu item not found: {0}")]
    UnknownMenuItem(String),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

impl LedgerError {
    /// The notice shown to the user for this error
    pub fn notice(&self) -> Notice {
        match self {
            LedgerError::Validation(_) => Notice::MissingClientLabel,
            LedgerError::UnknownMenuItem(id) => Notice::UnknownMenuItem { id: id.clone() },
            LedgerError::Export(_) => Notice::ExportFailed,
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
