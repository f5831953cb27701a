// buzz_sink/src/message.rs
// Message record validation and category based collection routing.

use serde_json::{Map, Value};

use crate::error::{Result, SinkError};

/// Derives the destination collection name from a category.
///
/// The category is lowercased, spaces become underscores, and the result
/// is prefixed with `messages_`; `"Deep Thoughts"` routes to
/// `messages_deep_thoughts`. Insert, delete, and lookup all go through
/// this one function.
pub fn collection_for(category: &str,) -> String {
    format!(
        "{}{}",
        crate::COLLECTION_PREFIX,
        category.to_lowercase().replace(' ', "_",)
    )
}

/// A pre-processed message record.
///
/// The `category` field is required and must be a string; every other
/// field is opaque payload stored verbatim.
#[derive(Debug, Clone,)]
pub struct MessageRecord {
    fields:   Map<String, Value,>,
    category: String,
}

impl MessageRecord {
    /// Validates a JSON value into a message record.
    ///
    /// Rejection happens here, before any store interaction is attempted.
    pub fn from_json(value: Value,) -> Result<Self,> {
        let fields = match value {
            Value::Object(map,) => map,
            _ => {
                return Err(SinkError::ValidationError(
                    "Message record must be a JSON object".to_string(),
                ),);
            },
        };

        let category = match fields.get("category",) {
            Some(Value::String(s,),) => s.clone(),
            Some(_,) => {
                return Err(SinkError::ValidationError(
                    "Message field 'category' must be a string".to_string(),
                ),);
            },
            None => {
                return Err(SinkError::ValidationError(
                    "Message record is missing required field 'category'".to_string(),
                ),);
            },
        };

        Ok(MessageRecord { fields, category, },)
    }

    pub fn category(&self,) -> &str {
        &self.category
    }

    /// Destination collection for this record.
    pub fn collection_name(&self,) -> String {
        collection_for(&self.category,)
    }

    pub fn fields(&self,) -> &Map<String, Value,> {
        &self.fields
    }
}
