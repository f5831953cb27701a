// buzz_sink/src/error.rs
// Defines custom error types for the buzz_sink crate.

use thiserror::Error;

#[derive(Debug, Error,)]
pub enum SinkError {
    #[error("Failed to connect to document store: {0}")]
    ConnectionError(String,),
    #[error("Invalid message record: {0}")]
    ValidationError(String,),
    #[error("Invalid configuration: {0}")]
    ConfigurationError(String,),
    #[error("Document store error: {0}")]
    DatabaseError(String,),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error,),
    #[error("Other error: {0}")]
    Other(String,),
}

pub type Result<T,> = std::result::Result<T, SinkError,>;
