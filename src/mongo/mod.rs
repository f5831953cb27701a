// buzz_sink/src/mongo/mod.rs
// MongoDB specific sink logic.

use async_trait::async_trait;
use mongodb::Client;
use mongodb::bson::Document;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::options::ClientOptions;
use tracing::{info, warn};

use crate::error::{Result, SinkError};
use crate::message::{MessageRecord, collection_for};
use crate::sink::{DeleteOutcome, DocumentSink, SinkConfig};

/// Converts a text message id into the store's native id type.
pub fn parse_message_id(message_id: &str,) -> Result<ObjectId,> {
    ObjectId::parse_str(message_id,).map_err(|e| {
        SinkError::ValidationError(format!("Invalid message id '{}': {}", message_id, e),)
    },)
}

pub struct MongoSink {
    #[allow(dead_code)]
    config:   SinkConfig,
    database: mongodb::Database,
}

#[async_trait]
impl DocumentSink for MongoSink {
    async fn new(config: SinkConfig,) -> Result<Self,> {
        let client_options = ClientOptions::parse(&config.connection_uri,)
            .await
            .map_err(|e| {
                SinkError::ConnectionError(format!("Failed to parse MongoDB URI: {}", e),)
            },)?;
        let client = Client::with_options(client_options,).map_err(|e| {
            SinkError::ConnectionError(format!("Failed to create MongoDB client: {}", e),)
        },)?;

        // Connections are lazy; the database and collections are created
        // implicitly on first write, so nothing is verified here.
        let database = client.database(&config.database_name,);

        info!(
            "Connected to MongoDB at {}, DB: {}",
            config.connection_uri, config.database_name
        );

        Ok(MongoSink { config, database, },)
    }

    async fn insert(&self, record: MessageRecord,) -> Result<String,> {
        let collection_name = record.collection_name();
        info!(
            "Inserting message from author {:?} into collection: {}",
            record.fields().get("author",),
            collection_name
        );

        let bson_document = mongodb::bson::to_document(record.fields(),).map_err(|e| {
            SinkError::ValidationError(format!("Failed to serialize message to BSON: {}", e),)
        },)?;

        let collection = self.database.collection::<Document,>(&collection_name,);
        let result = collection.insert_one(bson_document, None,).await.map_err(|e| {
            SinkError::DatabaseError(format!("Failed to insert message into MongoDB: {}", e),)
        },)?;

        let message_id = match result.inserted_id.as_object_id() {
            Some(oid,) => oid.to_hex(),
            None => result.inserted_id.to_string(),
        };

        info!(
            "Inserted message with _id: {} into collection: {}",
            message_id, collection_name
        );
        Ok(message_id,)
    }

    async fn delete(&self, message_id: &str, category: &str,) -> Result<DeleteOutcome,> {
        let collection_name = collection_for(category,);
        let object_id = parse_message_id(message_id,)?;

        let collection = self.database.collection::<Document,>(&collection_name,);
        let result = collection
            .delete_one(doc! { "_id": object_id }, None,)
            .await
            .map_err(|e| {
                SinkError::DatabaseError(format!("Failed to delete message from MongoDB: {}", e),)
            },)?;

        if result.deleted_count == 1 {
            info!(
                "Deleted message with _id: {} from collection: {}",
                message_id, collection_name
            );
            Ok(DeleteOutcome::Deleted,)
        } else {
            warn!(
                "No message with _id: {} found in collection: {}",
                message_id, collection_name
            );
            Ok(DeleteOutcome::NotFound,)
        }
    }
}

impl MongoSink {
    /// Point lookup by id, used by the self-test and integration tests.
    pub async fn find_by_id(
        &self,
        message_id: &str,
        category: &str,
    ) -> Result<Option<Document,>,> {
        let collection_name = collection_for(category,);
        let object_id = parse_message_id(message_id,)?;

        let collection = self.database.collection::<Document,>(&collection_name,);
        collection
            .find_one(doc! { "_id": object_id }, None,)
            .await
            .map_err(|e| {
                SinkError::DatabaseError(format!("Failed to look up message in MongoDB: {}", e),)
            },)
    }
}
