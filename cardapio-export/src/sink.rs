//! Export sinks for delivering the history text
//!
//! Supports:
//! - File + share action (writes into an app-private directory, then runs a
//!   share program with the file path)
//! - In-memory capture

use crate::error::{ExportError, ExportResult};
use crate::{EXPORT_MIME_TYPE, SHARE_DIALOG_TITLE};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{info, instrument, warn};

/// Trait for export sinks
///
/// The returned future is `Send` so an export can run on its own task
/// while the screen keeps handling keys.
pub trait ExportSink {
    /// Deliver a UTF-8 text payload under the given file name
    fn export(&self, file_name: &str, text: &str)
    -> impl Future<Output = ExportResult<()>> + Send;
}

/// Reject names that would escape the export directory
pub fn validate_file_name(file_name: &str) -> ExportResult<()> {
    if file_name.is_empty()
        || file_name == "."
        || file_name == ".."
        || file_name.contains(['/', '\\'])
    {
        return Err(ExportError::InvalidConfig(format!(
            "Invalid export file name: {:?}",
            file_name
        )));
    }
    Ok(())
}

/// External program that shares an exported file
///
/// The program receives its configured arguments followed by the file path.
/// `SHARE_MIME_TYPE` and `SHARE_TITLE` are set in its environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareAction {
    program: String,
    args: Vec<String>,
}

impl ShareAction {
    /// Parse a whitespace-separated command line (e.g. "xdg-open" or "mail -s x")
    pub fn parse(command: &str) -> ExportResult<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| ExportError::InvalidConfig("Empty share command".to_string()))?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    #[instrument(skip(self), fields(program = %self.program))]
    async fn share(&self, path: &Path) -> ExportResult<()> {
        info!(path = %path.display(), "Invoking share action");

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .env("SHARE_MIME_TYPE", EXPORT_MIME_TYPE)
            .env("SHARE_TITLE", SHARE_DIALOG_TITLE)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| ExportError::ShareUnavailable(format!("{}: {}", self.program, e)))?;

        if !status.success() {
            warn!(%status, "Share action did not complete");
            return Err(ExportError::ShareCancelled(format!(
                "{} exited with {}",
                self.program, status
            )));
        }

        info!("Share action completed");
        Ok(())
    }
}

/// Writes the export into a directory, then optionally shares it
#[derive(Debug, Clone)]
pub struct FileShareSink {
    dir: PathBuf,
    share: Option<ShareAction>,
}

impl FileShareSink {
    /// Create a sink writing into `dir` (created on first export)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            share: None,
        }
    }

    /// Set the share action run after each write
    pub fn with_share(mut self, share: ShareAction) -> Self {
        self.share = Some(share);
        self
    }

    /// Get the export directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path an export with this file name is written to
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

impl ExportSink for FileShareSink {
    #[instrument(skip(self, text), fields(dir = %self.dir.display(), text_len = text.len()))]
    async fn export(&self, file_name: &str, text: &str) -> ExportResult<()> {
        validate_file_name(file_name)?;

        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(file_name);
        tokio::fs::write(&path, text.as_bytes()).await?;
        info!(path = %path.display(), "Export file written");

        match &self.share {
            Some(share) => share.share(&path).await,
            None => Ok(()),
        }
    }
}

/// Keeps exports in memory
///
/// Can be switched to fail every export, to exercise error paths.
#[derive(Debug, Default)]
pub struct MemorySink {
    exports: Mutex<Vec<(String, String)>>,
    fail_with: Mutex<Option<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following export fail as a cancelled share
    pub fn fail_with(&self, reason: impl Into<String>) {
        *self.fail_with.lock() = Some(reason.into());
    }

    /// Let following exports succeed again
    pub fn recover(&self) {
        *self.fail_with.lock() = None;
    }

    /// (file name, text) of every successful export, oldest first
    pub fn exports(&self) -> Vec<(String, String)> {
        self.exports.lock().clone()
    }

    /// Number of export calls that succeeded
    pub fn export_count(&self) -> usize {
        self.exports.lock().len()
    }
}

impl ExportSink for MemorySink {
    async fn export(&self, file_name: &str, text: &str) -> ExportResult<()> {
        validate_file_name(file_name)?;
        if let Some(reason) = self.fail_with.lock().clone() {
            return Err(ExportError::ShareCancelled(reason));
        }
        self.exports
            .lock()
            .push((file_name.to_string(), text.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_share_action() {
        let action = ShareAction::parse("mail -s historico").unwrap();
        assert_eq!(action.program(), "mail");
        assert_eq!(action.args(), &["-s".to_string(), "historico".to_string()]);

        let action = ShareAction::parse("  xdg-open  ").unwrap();
        assert_eq!(action.program(), "xdg-open");
        assert!(action.args().is_empty());
    }

    #[test]
    fn test_parse_empty_share_action() {
        assert!(matches!(
            ShareAction::parse("   "),
            Err(ExportError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("historico_diario.txt").is_ok());
        assert!(validate_file_name("").is_err());
        assert!(validate_file_name("..").is_err());
        assert!(validate_file_name("../escape.txt").is_err());
        assert!(validate_file_name("a\\b.txt").is_err());
    }

    #[tokio::test]
    async fn test_file_sink_writes_payload() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileShareSink::new(dir.path().join("exports"));

        sink.export("historico_diario.txt", "Pedido 1\nCliente: Mesa 3\n")
            .await
            .unwrap();

        let written = std::fs::read_to_string(sink.path_for("historico_diario.txt")).unwrap();
        assert_eq!(written, "Pedido 1\nCliente: Mesa 3\n");
    }

    #[tokio::test]
    async fn test_file_sink_overwrites_previous_export() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileShareSink::new(dir.path());

        sink.export("h.txt", "first").await.unwrap();
        sink.export("h.txt", "second").await.unwrap();

        let written = std::fs::read_to_string(sink.path_for("h.txt")).unwrap();
        assert_eq!(written, "second");
    }

    #[tokio::test]
    async fn test_file_sink_rejects_bad_name() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileShareSink::new(dir.path());

        let result = sink.export("../h.txt", "x").await;
        assert!(matches!(result, Err(ExportError::InvalidConfig(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_share_success() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileShareSink::new(dir.path()).with_share(ShareAction::parse("true").unwrap());

        assert!(sink.export("h.txt", "x").await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_share_failure_is_cancellation() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileShareSink::new(dir.path()).with_share(ShareAction::parse("false").unwrap());

        let result = sink.export("h.txt", "x").await;
        assert!(matches!(result, Err(ExportError::ShareCancelled(_))));
        // The file is still written before the share step
        assert!(sink.path_for("h.txt").exists());
    }

    #[tokio::test]
    async fn test_share_program_missing() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileShareSink::new(dir.path())
            .with_share(ShareAction::parse("cardapio-no-such-share-program").unwrap());

        let result = sink.export("h.txt", "x").await;
        assert!(matches!(result, Err(ExportError::ShareUnavailable(_))));
    }

    #[tokio::test]
    async fn test_export_on_spawned_task() {
        let sink = std::sync::Arc::new(MemorySink::new());
        let task_sink = std::sync::Arc::clone(&sink);

        tokio::spawn(async move { task_sink.export("h.txt", "x").await })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(sink.export_count(), 1);
    }

    #[tokio::test]
    async fn test_memory_sink() {
        let sink = MemorySink::new();
        sink.export("h.txt", "one").await.unwrap();

        sink.fail_with("dismissed");
        assert!(matches!(
            sink.export("h.txt", "two").await,
            Err(ExportError::ShareCancelled(_))
        ));

        sink.recover();
        sink.export("h.txt", "three").await.unwrap();

        assert_eq!(sink.export_count(), 2);
        assert_eq!(sink.exports()[1], ("h.txt".to_string(), "three".to_string()));
    }
}
