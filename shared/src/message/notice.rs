use serde::{Deserialize, Serialize};
use std::fmt;

// ==================== Notice Level ====================

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

// ==================== Notices ====================

/// A message shown to the user after an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "params", rename_all = "snake_case")]
pub enum Notice {
    /// Save attempted without a table number or client name
    MissingClientLabel,
    /// Menu lookup by an id that is not in the catalog
    UnknownMenuItem { id: String },
    /// Daily history was cleared
    HistoryCleared,
    /// Export requested with nothing in the history
    HistoryEmpty,
    /// History handed to the export sink
    ExportCompleted,
    /// Export sink reported a failure
    ExportFailed,
}

impl Notice {
    pub fn level(&self) -> NoticeLevel {
        match self {
            Self::HistoryCleared | Self::ExportCompleted => NoticeLevel::Info,
            Self::MissingClientLabel | Self::HistoryEmpty | Self::UnknownMenuItem { .. } => {
                NoticeLevel::Warning
            }
            Self::ExportFailed => NoticeLevel::Error,
        }
    }

    /// Dialog title
    pub fn title(&self) -> &'static str {
        match self {
            Self::MissingClientLabel => "Atenção",
            Self::UnknownMenuItem { .. } => "Item inválido",
            Self::HistoryCleared => "Histórico zerado",
            Self::HistoryEmpty => "Histórico vazio",
            Self::ExportCompleted => "Exportação concluída",
            Self::ExportFailed => "Erro ao exportar",
        }
    }

    /// Dialog body
    pub fn message(&self) -> String {
        match self {
            Self::MissingClientLabel => "Insira o nome ou número da mesa!".to_string(),
            Self::UnknownMenuItem { id } => format!("Item {} não está no cardápio.", id),
            Self::HistoryCleared => "Histórico diário foi zerado.".to_string(),
            Self::HistoryEmpty => "Nenhum pedido registrado no histórico.".to_string(),
            Self::ExportCompleted => "Histórico exportado com sucesso!".to_string(),
            Self::ExportFailed => "Ocorreu um erro ao exportar o histórico.".to_string(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title(), self.message())
    }
}
