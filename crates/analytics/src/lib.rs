//! # Sales Analytics
//!
//! The report engine: totals and commissions over a snapshot of the ledger.
//!
//! ## Architectural Principles
//!
//! - **Pure logic.** Nothing in this crate reads or writes storage. Callers
//!   pass a `Ledger` snapshot and get plain report structs back.
//! - **Literal agent identity.** Sales are grouped by the agent name exactly
//!   as typed (minus backticks); differently spelled names stay separate.
//!
//! ## Public API
//!
//! - `filter_by_agent`, `filter_by_window`, `aggregate`, `group_by_agent`:
//!   the building blocks.
//! - `agent_report` / `period_report`: the two reports the bot serves.
//! - `COMMISSION_RATE`: the fixed 10% rate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{
    aggregate, commission_for, filter_by_agent, filter_by_window, group_by_agent, COMMISSION_RATE,
};
pub use report::{
    agent_report, period_report, AgentReport, AgentTotals, PeriodReport, ReportScope, SalesSummary,
};
