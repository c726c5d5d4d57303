use crate::error::DbError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use core_types::{Ledger, SaleRecord};

/// Persistence for the sales ledger.
///
/// Implementations must make every mutating method all-or-nothing from the
/// caller's point of view: either the full load-mutate-save cycle completes,
/// or the stored ledger is left untouched and an error is returned.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Returns the current ledger, or an empty one if nothing usable is stored.
    async fn load(&self) -> Ledger;

    /// Replaces the stored ledger with `ledger`.
    async fn save(&self, ledger: &Ledger) -> Result<(), DbError>;

    /// Appends a sale to the end of the ledger.
    async fn append(&self, record: SaleRecord) -> Result<(), DbError>;

    /// Drops every sale and closes the report window.
    async fn reset_all(&self) -> Result<(), DbError>;

    /// Opens a new report window starting at `since`.
    async fn set_report_window_start(&self, since: DateTime<Utc>) -> Result<(), DbError>;

    /// Opens a new report window at `at` and returns the ledger as it was
    /// just before, in one cycle. No sale can be appended between the
    /// snapshot and the window change.
    async fn roll_report_window(&self, at: DateTime<Utc>) -> Result<Ledger, DbError>;
}
