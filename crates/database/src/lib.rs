//! # Ledger Storage
//!
//! This crate is the bot's "permanent archive": a single JSON document holding
//! every recorded sale and the current report window marker.
//!
//! ## Behaviour
//!
//! - **Reads never fail.** A missing or unparseable document is logged and
//!   treated as an empty ledger so the bot keeps answering.
//! - **Writes replace the whole document.** Failures propagate to the caller
//!   as `DbError`; nothing is retried.
//! - **One mutation at a time.** Every load-mutate-save cycle runs under a
//!   store-wide async mutex, so two interactions handled back to back cannot
//!   lose each other's write.
//!
//! ## Public API
//!
//! - `LedgerStore`: the trait handlers depend on.
//! - `JsonFileStore`: the production, file-backed implementation.
//! - `MemoryStore`: an in-process implementation used by tests.

pub mod error;
pub mod json_file;
pub mod memory;
pub mod store;

pub use error::DbError;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use store::LedgerStore;
