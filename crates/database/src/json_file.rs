use crate::error::DbError;
use crate::store::LedgerStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use core_types::{Ledger, SaleRecord};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// A `LedgerStore` backed by one pretty-printed JSON document on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the document, absorbing every failure.
    async fn read_ledger(&self) -> Ledger {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No ledger document yet, starting empty.");
                return Ledger::new();
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read ledger document, starting empty.");
                return Ledger::new();
            }
        };

        match serde_json::from_str::<Ledger>(&raw) {
            Ok(ledger) => ledger,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ledger document is not valid, starting empty.");
                Ledger::new()
            }
        }
    }

    /// Writes the full document to a sibling temp file and renames it into place.
    async fn write_ledger(&self, ledger: &Ledger) -> Result<(), DbError> {
        let body = serde_json::to_string_pretty(ledger)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp_path = self.tmp_path();
        tokio::fs::write(&tmp_path, body).await?;
        if let Err(e) = tokio::fs::rename(&tmp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        tracing::debug!(path = %self.path.display(), sales = ledger.sales.len(), "Ledger saved.");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Runs one load-mutate-save cycle under the write lock.
    async fn mutate<F>(&self, f: F) -> Result<(), DbError>
    where
        F: FnOnce(&mut Ledger) + Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut ledger = self.read_ledger().await;
        f(&mut ledger);
        self.write_ledger(&ledger).await
    }
}

#[async_trait]
impl LedgerStore for JsonFileStore {
    async fn load(&self) -> Ledger {
        self.read_ledger().await
    }

    async fn save(&self, ledger: &Ledger) -> Result<(), DbError> {
        let _guard = self.write_lock.lock().await;
        self.write_ledger(ledger).await
    }

    async fn append(&self, record: SaleRecord) -> Result<(), DbError> {
        self.mutate(move |ledger| ledger.append(record)).await
    }

    async fn reset_all(&self) -> Result<(), DbError> {
        self.mutate(Ledger::reset).await
    }

    async fn set_report_window_start(&self, since: DateTime<Utc>) -> Result<(), DbError> {
        self.mutate(move |ledger| ledger.set_report_window_start(since))
            .await
    }

    async fn roll_report_window(&self, at: DateTime<Utc>) -> Result<Ledger, DbError> {
        let _guard = self.write_lock.lock().await;
        let mut ledger = self.read_ledger().await;
        let closed = ledger.clone();
        ledger.set_report_window_start(at);
        self.write_ledger(&ledger).await?;
        Ok(closed)
    }
}
