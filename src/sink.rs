// buzz_sink/src/sink.rs
// Core sink configuration and traits.

use async_trait::async_trait;

use crate::error::Result;
use crate::message::MessageRecord;

/// Configuration for a document sink.
#[derive(Debug, Clone,)]
pub struct SinkConfig {
    // Common configuration options for all sinks
    pub connection_uri: String,
    pub database_name:  String,
}

/// Outcome of a point delete.
///
/// "Not found" and "already deleted" are indistinguishable; both are
/// reported as `NotFound`, never as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Trait for all document sinks.
#[async_trait]
pub trait DocumentSink: Send + Sync {
    /// Creates a new sink instance with the given configuration.
    async fn new(config: SinkConfig,) -> Result<Self,>
    where
        Self: Sized;

    /// Stores one message record in its category derived collection and
    /// returns the store assigned document id in text form.
    async fn insert(&self, record: MessageRecord,) -> Result<String,>;

    /// Removes one previously stored message by id, re-deriving the
    /// collection from the category.
    async fn delete(&self, message_id: &str, category: &str,) -> Result<DeleteOutcome,>;
}
