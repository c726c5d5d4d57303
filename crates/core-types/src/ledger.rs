use crate::sale::SaleRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The complete persisted state of the bot.
///
/// `sales` is append-only and kept in insertion order, which is also
/// chronological order. `report_window_start` marks the beginning of the
/// current reporting period; `None` means no period has been opened yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub sales: Vec<SaleRecord>,
    #[serde(rename = "report_start_date", default)]
    pub report_window_start: Option<DateTime<Utc>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: SaleRecord) {
        self.sales.push(record);
    }

    /// Drops every sale and closes the reporting window.
    pub fn reset(&mut self) {
        self.sales.clear();
        self.report_window_start = None;
    }

    pub fn set_report_window_start(&mut self, since: DateTime<Utc>) {
        self.report_window_start = Some(since);
    }

    /// The effective lower bound of the current window.
    ///
    /// With no window open every sale is in range, so this falls back to the
    /// Unix epoch.
    pub fn window_start_or_epoch(&self) -> DateTime<Utc> {
        self.report_window_start.unwrap_or(DateTime::UNIX_EPOCH)
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }
}
