use crate::engine::{aggregate, commission_for, filter_by_agent, filter_by_window, group_by_agent};
use chrono::{DateTime, Utc};
use core_types::{Ledger, SaleRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Totals over a set of sales.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub count: usize,
    pub total_value: u64,
    pub commission: Decimal,
}

/// Totals for one agent inside a period report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentTotals {
    pub agent: String,
    pub count: usize,
    pub total_value: u64,
}

impl AgentTotals {
    pub fn new(agent: String) -> Self {
        Self {
            agent,
            count: 0,
            total_value: 0,
        }
    }

    pub fn commission(&self) -> Decimal {
        commission_for(self.total_value)
    }
}

/// Which sales an agent report looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportScope {
    /// Every sale ever recorded.
    AllTime,
    /// Sales since the current report window opened.
    CurrentWindow,
}

/// The answer to a `general-sales` or `weekly-sales` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentReport {
    pub query: String,
    pub scope: ReportScope,
    pub summary: SalesSummary,
    /// The matching sales, in ledger order.
    pub sales: Vec<SaleRecord>,
}

/// The end-of-period report posted by `finalize-report`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodReport {
    /// Start of the period; `None` when no window had been opened.
    pub since: Option<DateTime<Utc>>,
    /// End of the period (exclusive): the instant the report was finalized.
    pub until: DateTime<Utc>,
    pub summary: SalesSummary,
    pub agents: Vec<AgentTotals>,
}

impl PeriodReport {
    pub fn is_empty(&self) -> bool {
        self.summary.count == 0
    }
}

/// Sales matching `query`, over the whole ledger or the current window.
pub fn agent_report(ledger: &Ledger, query: &str, scope: ReportScope) -> AgentReport {
    let since = match scope {
        ReportScope::AllTime => None,
        ReportScope::CurrentWindow => Some(ledger.window_start_or_epoch()),
    };

    let sales: Vec<SaleRecord> = filter_by_agent(ledger, query)
        .into_iter()
        .filter(|sale| since.is_none_or(|since| sale.timestamp >= since))
        .cloned()
        .collect();

    tracing::debug!(query, ?scope, matched = sales.len(), "Built agent report.");

    AgentReport {
        query: query.to_string(),
        scope,
        summary: aggregate(&sales),
        sales,
    }
}

/// Per-agent totals for the sales of the current report window recorded
/// before `until`.
///
/// A sale stamped exactly at `until` belongs to the next window.
pub fn period_report(ledger: &Ledger, until: DateTime<Utc>) -> PeriodReport {
    let in_window: Vec<&SaleRecord> = filter_by_window(ledger, ledger.window_start_or_epoch())
        .into_iter()
        .filter(|sale| sale.timestamp < until)
        .collect();

    PeriodReport {
        since: ledger.report_window_start,
        until,
        summary: aggregate(in_window.iter().copied()),
        agents: group_by_agent(in_window.iter().copied()),
    }
}
