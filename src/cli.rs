// buzz_sink/src/cli.rs
// Command Line Interface (CLI) specific logic for buzz_sink.

use std::path::PathBuf;

use clap::Parser;

use crate::{SELF_TEST_DATABASE, SELF_TEST_URI};

/// Command Line Interface for the buzz_sink crate.
#[derive(Parser, Debug,)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Parser, Debug,)]
pub enum Commands {
    /// Insert a single processed message record
    Insert(InsertArgs,),
    /// Delete a stored message by its document id
    Delete(DeleteArgs,),
    /// Insert a fixed sample record, look it up, and delete it
    SelfTest(SelfTestArgs,),
}

#[derive(Parser, Debug,)]
pub struct ConnectionArgs {
    /// Connection string for MongoDB
    #[clap(long, env = "MONGO_URI")]
    pub uri:      String,

    /// Name of the target database
    #[clap(long, env = "MONGO_DB_NAME")]
    pub database: String,
}

#[derive(Parser, Debug,)]
pub struct InsertArgs {
    #[clap(flatten)]
    pub connection: ConnectionArgs,

    /// Path to a JSON file containing the message record
    #[clap(short, long, conflicts_with = "json")]
    pub path: Option<PathBuf,>,

    /// Inline JSON message record
    #[clap(long)]
    pub json: Option<String,>,
}

#[derive(Parser, Debug,)]
pub struct DeleteArgs {
    #[clap(flatten)]
    pub connection: ConnectionArgs,

    /// Document id returned at insert time
    #[clap(long)]
    pub id:       String,

    /// Category of the stored message, used to re-derive its collection
    #[clap(long)]
    pub category: String,
}

#[derive(Parser, Debug,)]
pub struct SelfTestArgs {
    /// Connection string for MongoDB
    #[clap(long, env = "MONGO_URI", default_value = SELF_TEST_URI)]
    pub uri:      String,

    /// Name of the target database
    #[clap(long, env = "MONGO_DB_NAME", default_value = SELF_TEST_DATABASE)]
    pub database: String,
}
