use crate::orders::EXPORT_FILE_NAME;
use cardapio_export::{ExportResult, FileShareSink, ShareAction, validate_file_name};
use shared::models::{Menu, MenuResult};
use std::path::PathBuf;

/// Application configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | Application-private directory (exports) |
/// | EXPORT_FILE_NAME | historico_diario.txt | Exported file name |
/// | SHARE_COMMAND | - | Program run with the exported file path |
/// | MENU_FILE | - | JSON catalog replacing the built-in menu |
/// | LOG_LEVEL | info | Log filter when RUST_LOG is unset |
/// | LOG_DIR | - | Directory for daily rolling log files |
/// | ENVIRONMENT | development | Runtime environment |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/tmp/cardapio SHARE_COMMAND=xdg-open cargo run
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory the history export is written to
    pub work_dir: String,
    /// Name of the exported history file
    pub export_file_name: String,
    /// Share action command line, run after the file is written
    pub share_command: Option<String>,
    /// Optional JSON menu file
    pub menu_file: Option<String>,
    /// Default log level
    pub log_level: String,
    /// Rolling log file directory (file logging off when unset)
    pub log_dir: Option<String>,
    /// development | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            work_dir: non_empty("WORK_DIR").unwrap_or_else(|| "./data".into()),
            export_file_name: non_empty("EXPORT_FILE_NAME")
                .unwrap_or_else(|| EXPORT_FILE_NAME.into()),
            share_command: non_empty("SHARE_COMMAND"),
            menu_file: non_empty("MENU_FILE"),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: non_empty("LOG_DIR"),
            environment: non_empty("ENVIRONMENT").unwrap_or_else(|| "development".into()),
        }
    }

    /// Environment config with a custom work directory
    ///
    /// Mostly for tests
    pub fn with_overrides(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config
    }

    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir)
    }

    /// Built-in catalog, or the configured menu file
    pub fn load_menu(&self) -> MenuResult<Menu> {
        match &self.menu_file {
            Some(path) => Menu::load(path),
            None => Ok(Menu::default()),
        }
    }

    /// Export sink writing into the work directory
    ///
    /// Fails on a share command or export file name that could never work.
    pub fn export_sink(&self) -> ExportResult<FileShareSink> {
        validate_file_name(&self.export_file_name)?;
        let sink = FileShareSink::new(self.work_dir());
        match &self.share_command {
            Some(command) => Ok(sink.with_share(ShareAction::parse(command)?)),
            None => Ok(sink),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
