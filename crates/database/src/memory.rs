use crate::error::DbError;
use crate::store::LedgerStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use core_types::{Ledger, SaleRecord};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

/// An in-process `LedgerStore`.
///
/// Used as the fake store in tests. Writes can be made to fail on demand to
/// exercise the write-failure path of the callers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    ledger: Mutex<Ledger>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ledger(ledger: Ledger) -> Self {
        Self {
            ledger: Mutex::new(ledger),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// When set, every mutating call returns an I/O error and leaves the ledger untouched.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), DbError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DbError::Io(std::io::Error::other("writes disabled")));
        }
        Ok(())
    }

    async fn mutate<F>(&self, f: F) -> Result<(), DbError>
    where
        F: FnOnce(&mut Ledger) + Send,
    {
        let mut guard = self.ledger.lock().await;
        self.check_writable()?;
        f(&mut guard);
        Ok(())
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn load(&self) -> Ledger {
        self.ledger.lock().await.clone()
    }

    async fn save(&self, ledger: &Ledger) -> Result<(), DbError> {
        let ledger = ledger.clone();
        self.mutate(move |current| *current = ledger).await
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
        let mut guard = self.ledger.lock().await;
        self.check_writable()?;
        let closed = guard.clone();
        guard.set_report_window_start(at);
        Ok(closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failed_write_leaves_ledger_untouched() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);
        assert!(store.set_report_window_start(Utc::now()).await.is_err());
        assert_eq!(store.load().await, Ledger::new());

        store.set_fail_writes(false);
        store.set_report_window_start(Utc::now()).await.unwrap();
        assert!(store.load().await.report_window_start.is_some());
    }
}
