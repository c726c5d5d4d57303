use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid numeric input for {field}: {value:?}")]
    InvalidNumericInput { field: String, value: String },

    #[error("Required field '{0}' is empty")]
    MissingField(String),
}
