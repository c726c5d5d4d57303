//! # Core Types
//!
//! The foundational data structures shared by every crate in the workspace:
//! the immutable `SaleRecord`, the `Ledger` document that holds all of them,
//! and the `SaleForm` submitted by agents before it becomes a record.
//!
//! This crate has no knowledge of storage or of the chat platform.

pub mod error;
pub mod ledger;
pub mod sale;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use ledger::Ledger;
pub use sale::{parse_interior_value, SaleForm, SaleRecord};
