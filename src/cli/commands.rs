use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{DEFAULT_BIND, DEFAULT_DB};

#[derive(Parser, Debug)]
#[command(name = "personal-notes")]
#[command(version, about = "A small REST backend for personal notes")]
#[command(propagate_version = true)]
pub struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "NOTES_DB", default_value = DEFAULT_DB)]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the notes API over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, env = "NOTES_BIND", default_value = DEFAULT_BIND)]
        bind: SocketAddr,

        /// Keep notes in memory instead of the database file
        #[arg(long)]
        in_memory: bool,
    },

    /// List all notes
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single note
    Get {
        /// Note ID
        id: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the number of notes
    Count,
}
