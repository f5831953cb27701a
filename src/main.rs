// buzz_sink/src/main.rs
// This file contains the main entry point for the buzz-sink CLI application.

use buzz_sink::cli::{Cli, Commands, ConnectionArgs, DeleteArgs, InsertArgs, SelfTestArgs};
use buzz_sink::error::{Result, SinkError};
use buzz_sink::message::MessageRecord;
use buzz_sink::mongo::MongoSink;
use buzz_sink::sink::{DocumentSink, SinkConfig};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(),> {
    // Initialize tracing
    let file_appender = tracing_appender::rolling::never(".", "buzz_sink.log",);
    let (non_blocking, _guard,) = tracing_appender::non_blocking(file_appender,);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info",),),)
        .with(fmt::layer().with_writer(std::io::stderr,),)
        .with(fmt::layer().with_writer(non_blocking,).with_ansi(false,),)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Insert(args,) => run_insert(args,).await,
        Commands::Delete(args,) => run_delete(args,).await,
        Commands::SelfTest(args,) => run_self_test(args,).await,
    }
}

fn sink_config(connection: &ConnectionArgs,) -> SinkConfig {
    SinkConfig {
        connection_uri: connection.uri.clone(),
        database_name:  connection.database.clone(),
    }
}

async fn run_insert(args: &InsertArgs,) -> Result<(),> {
    let raw = match (&args.path, &args.json,) {
        (Some(path,), None,) => std::fs::read_to_string(path,)?,
        (None, Some(json,),) => json.clone(),
        _ => {
            return Err(SinkError::ConfigurationError(
                "Provide the message record via --path or --json".to_string(),
            ),);
        },
    };

    let value: serde_json::Value = serde_json::from_str(&raw,).map_err(|e| {
        SinkError::ValidationError(format!("Message record is not valid JSON: {}", e),)
    },)?;
    let record = MessageRecord::from_json(value,)?;

    let sink = MongoSink::new(sink_config(&args.connection,),).await?;
    let message_id = sink.insert(record,).await?;
    info!("Insert completed with document id: {}", message_id);
    Ok((),)
}

async fn run_delete(args: &DeleteArgs,) -> Result<(),> {
    let sink = MongoSink::new(sink_config(&args.connection,),).await?;
    sink.delete(&args.id, &args.category,).await?;
    Ok((),)
}

async fn run_self_test(args: &SelfTestArgs,) -> Result<(),> {
    info!("Starting MongoDB sink self-test.");

    let config = SinkConfig {
        connection_uri: args.uri.clone(),
        database_name:  args.database.clone(),
    };
    let sink = MongoSink::new(config,).await?;

    let record = sample_record()?;
    let category = record.category().to_string();
    let message_id = sink.insert(record,).await?;

    match sink.find_by_id(&message_id, &category,).await? {
        Some(_,) => {
            sink.delete(&message_id, &category,).await?;
        },
        None => {
            warn!("Sample record not found; nothing to delete.");
        },
    }

    info!("Finished MongoDB sink self-test.");
    Ok((),)
}

fn sample_record() -> Result<MessageRecord,> {
    let value = serde_json::json!({
        "message": "I just shared a meme! It was amazing.",
        "author": "Charlie",
        "timestamp": "2025-01-29 14:35:20",
        "category": "humor",
        "sentiment": 0.87,
        "keyword_mentioned": "meme",
        "message_length": 42,
    });
    MessageRecord::from_json(value,)
}
