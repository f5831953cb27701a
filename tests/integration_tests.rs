// buzz_sink/tests/integration_tests.rs

use std::sync::Arc;

use buzz_sink::error::SinkError;
use buzz_sink::message::{MessageRecord, collection_for};
use buzz_sink::mongo::{MongoSink, parse_message_id};
use buzz_sink::sink::{DeleteOutcome, DocumentSink, SinkConfig};
use mongodb::Client;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;

#[test]
fn test_collection_routing() {
    assert_eq!(collection_for("humor",), "messages_humor");
    assert_eq!(collection_for("Humor",), "messages_humor");
    assert_eq!(collection_for("Deep Thoughts",), "messages_deep_thoughts");
    assert_eq!(collection_for("sports",), "messages_sports");
}

#[test]
fn test_record_routing_matches_category() {
    let record = MessageRecord::from_json(serde_json::json!({
        "message": "I just shared a meme! It was amazing.",
        "author": "Charlie",
        "category": "humor",
        "sentiment": 0.87,
    }),)
    .expect("Failed to validate sample record",);

    assert_eq!(record.category(), "humor");
    assert_eq!(record.collection_name(), "messages_humor");
}

#[test]
fn test_missing_category_is_rejected() {
    let res = MessageRecord::from_json(serde_json::json!({
        "message": "No category here.",
        "author": "Charlie",
    }),);

    assert!(matches!(res, Err(SinkError::ValidationError(_,),)));
}

#[test]
fn test_non_string_category_is_rejected() {
    let res = MessageRecord::from_json(serde_json::json!({
        "message": "Numeric category.",
        "category": 7,
    }),);

    assert!(matches!(res, Err(SinkError::ValidationError(_,),)));
}

#[test]
fn test_non_object_record_is_rejected() {
    let res = MessageRecord::from_json(serde_json::json!(["not", "an", "object"]),);

    assert!(matches!(res, Err(SinkError::ValidationError(_,),)));
}

#[test]
fn test_malformed_message_id_is_rejected() {
    let res = parse_message_id("not-a-valid-object-id",);

    assert!(matches!(res, Err(SinkError::ValidationError(_,),)));
}

#[tokio::test]
async fn test_mongodb_insert_then_delete() {
    // This test assumes a local MongoDB instance is running at the default port.
    // For CI/CD environments, this might need to be mocked or run against a test container.
    if std::env::var("RUN_MONGO_TESTS",).is_err() {
        println!("Skipping MongoDB sink test: RUN_MONGO_TESTS environment variable not set.");
        return;
    }
    let mongo_uri = "mongodb://localhost:27017";
    let database_name = "buzz_test_db";

    let config = SinkConfig {
        connection_uri: mongo_uri.to_string(),
        database_name:  database_name.to_string(),
    };
    let sink = MongoSink::new(config,)
        .await
        .expect("Failed to create MongoSink",);

    let record = MessageRecord::from_json(serde_json::json!({
        "message": "I just shared a meme! It was amazing.",
        "author": "Charlie",
        "timestamp": "2025-01-29 14:35:20",
        "category": "Deep Thoughts",
        "sentiment": 0.87,
        "keyword_mentioned": "meme",
        "message_length": 42,
    }),)
    .expect("Failed to validate test record",);

    let message_id = sink
        .insert(record,)
        .await
        .expect("Failed to insert test record",);

    // Verify placement with a separate client
    let client_options = ClientOptions::parse(mongo_uri,).await.unwrap();
    let client = Client::with_options(client_options,).unwrap();
    let collection = client
        .database(database_name,)
        .collection::<mongodb::bson::Document>("messages_deep_thoughts",);

    let object_id = parse_message_id(&message_id,).expect("Insert returned a malformed id",);
    let fetched_document = collection
        .find_one(doc! { "_id": object_id }, None,)
        .await
        .unwrap();
    assert!(fetched_document.is_some());

    let found = sink
        .find_by_id(&message_id, "Deep Thoughts",)
        .await
        .expect("Failed to look up test record",);
    assert!(found.is_some());

    // Delete is effective exactly once; the repeat reports not-found.
    let first = sink
        .delete(&message_id, "Deep Thoughts",)
        .await
        .expect("Failed to delete test record",);
    assert_eq!(first, DeleteOutcome::Deleted);

    let gone = sink
        .find_by_id(&message_id, "Deep Thoughts",)
        .await
        .expect("Failed to re-look up test record",);
    assert!(gone.is_none());

    let second = sink
        .delete(&message_id, "Deep Thoughts",)
        .await
        .expect("Repeat delete should not error",);
    assert_eq!(second, DeleteOutcome::NotFound);

    // Clean up
    collection.delete_many(doc! {}, None,).await.unwrap();
}

#[tokio::test]
async fn test_mongodb_concurrent_category_routing() {
    // This test assumes a local MongoDB instance is running at the default port.
    if std::env::var("RUN_MONGO_TESTS",).is_err() {
        println!("Skipping MongoDB sink test: RUN_MONGO_TESTS environment variable not set.");
        return;
    }
    let mongo_uri = "mongodb://localhost:27017";
    let database_name = "buzz_test_db";
    let marker = format!("concurrent_routing_{}", std::process::id());
    let categories = ["humor", "sports", "tech", "food", "Deep Thoughts"];

    let config = SinkConfig {
        connection_uri: mongo_uri.to_string(),
        database_name:  database_name.to_string(),
    };
    let sink = Arc::new(
        MongoSink::new(config,)
            .await
            .expect("Failed to create MongoSink",),
    );

    let mut join_set = tokio::task::JoinSet::new();
    for category in categories {
        let sink_task = Arc::clone(&sink,);
        let marker_task = marker.clone();
        join_set.spawn(async move {
            let record = MessageRecord::from_json(serde_json::json!({
                "message": format!("A {} message.", category),
                "author": "Charlie",
                "category": category,
                "test_marker": marker_task,
            }),)
            .expect("Failed to validate concurrent test record",);
            sink_task
                .insert(record,)
                .await
                .expect("Failed to insert concurrent test record",)
        },);
    }

    while let Some(res,) = join_set.join_next().await {
        res.expect("Insert task panicked",);
    }

    // Each category routed to its own collection, exactly one record apiece.
    let client_options = ClientOptions::parse(mongo_uri,).await.unwrap();
    let client = Client::with_options(client_options,).unwrap();
    let database = client.database(database_name,);

    for category in categories {
        let collection =
            database.collection::<mongodb::bson::Document>(&collection_for(category,),);
        let count = collection
            .count_documents(doc! { "test_marker": &marker }, None,)
            .await
            .unwrap();
        assert_eq!(count, 1, "collection {} should hold one record", collection_for(category));

        // Clean up
        collection
            .delete_many(doc! { "test_marker": &marker }, None,)
            .await
            .unwrap();
    }
}
