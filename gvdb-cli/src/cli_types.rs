//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gvdb")]
#[command(about = "Browse the production catalog", long_about = None)]
pub(crate) struct Cli {
    /// Snapshot directory holding the JSON export (defaults to saved setting, then ./data)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Read through the SQLite cache, optionally at PATH (imports the snapshot when empty)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<Option<PathBuf>>,

    /// Emit JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Paging arguments shared by the browse commands.
#[derive(Args, Clone)]
pub(crate) struct PageArgs {
    /// Page number, starting at 1
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Results per page (defaults to saved setting, then 30)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

#[derive(Args, Clone)]
pub(crate) struct ActorArgs {
    /// Stage name substring or exact actor id
    #[arg(short, long)]
    pub search: Option<String>,

    /// Studio ids (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub studios: Vec<i64>,

    /// Include studio, pooled and unknown placeholder actors
    #[arg(long)]
    pub show_anonymous: bool,

    /// Sort field: name, count, latest, newest_edit
    #[arg(long)]
    pub sort: Option<String>,

    #[command(flatten)]
    pub paging: PageArgs,
}

#[derive(Args, Clone)]
pub(crate) struct ProductionArgs {
    /// Studio ids (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub studios: Vec<i64>,

    /// Production types: single, album, segment (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub types: Vec<String>,

    /// Stage name ids (comma-separated, see `gvdb suggest`)
    #[arg(long, value_delimiter = ',')]
    pub actors: Vec<i64>,

    /// Earliest release date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest release date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Sex act tags (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub sex_acts: Vec<String>,

    /// Style tags (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub styles: Vec<String>,

    /// Body type tags (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub body_types: Vec<String>,

    /// Source tags (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub sources: Vec<String>,

    /// Keyword matched against code, title and comment
    #[arg(short, long)]
    pub keyword: Option<String>,

    /// Sort field: studio, code, title, date, updated
    #[arg(long)]
    pub sort: Option<String>,

    #[command(flatten)]
    pub paging: PageArgs,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Import the JSON snapshot into the SQLite cache (replacing its contents)
    Import,

    /// Show record counts and dangling references
    Stats {
        /// List every dangling reference
        #[arg(long)]
        details: bool,
    },

    /// Browse actors
    Actors(ActorArgs),

    /// Browse productions (albums stand in for their segments)
    Productions(ProductionArgs),

    /// Show one production's cast and tags
    Production {
        /// Production id
        id: i64,
    },

    /// Show one actor's statistics
    Actor {
        /// Actor id
        id: i64,
    },

    /// List the segments of an album
    Segments {
        /// Album production id
        album_id: i64,
    },

    /// Suggest stage names matching a query
    Suggest {
        /// Stage name substring
        query: String,
    },

    /// List available studios and tags for filtering
    Filters,

    /// Manage settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings and resolved paths
    Show,
    /// Print the settings file path
    Path,
    /// Save the snapshot directory (omit to clear)
    SetDataDir {
        /// Snapshot directory
        path: Option<PathBuf>,
    },
    /// Save the SQLite cache path (omit to clear)
    SetCacheDb {
        /// Cache database file
        path: Option<PathBuf>,
    },
}
