use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to write the ledger document: {0}")]
    Io(#[from] std::io::Error),

    #[error("An error occurred during JSON serialization of the ledger: {0}")]
    Serialization(#[from] serde_json::Error),
}
