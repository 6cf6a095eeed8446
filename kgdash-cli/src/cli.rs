use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kgdash", about = "Knowledge-graph pipeline control panel", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (overrides .kgdash/config.toml)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a .kgdash/ config directory
    Init,

    /// Check backend connectivity
    Status,

    /// Upload a JSON file and run the RDF build pipeline
    Run {
        /// JSON file to upload
        file: PathBuf,

        /// Save the produced output.ttl into this directory
        #[arg(long)]
        download: Option<PathBuf>,
    },

    /// Import the produced output into GraphDB
    Import,

    /// Delete all triples in the repository
    Clear {
        /// Required flag to confirm deletion
        #[arg(long)]
        force: bool,
    },

    /// Preset query catalog
    Queries {
        #[command(subcommand)]
        command: QueriesCommands,
    },

    /// Translate a natural-language question to SPARQL
    Translate {
        /// The question, in plain language
        question: String,

        /// Also run the generated query
        #[arg(long)]
        run: bool,

        /// Output format for --run results (json, table, or csv)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Run a raw SPARQL query
    Raw {
        /// Query file; omit to use -e or stdin
        file: Option<PathBuf>,

        /// Inline query expression
        #[arg(short = 'e', long = "expr")]
        expr: Option<String>,

        /// Output format (json, table, or csv)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum QueriesCommands {
    /// List available preset queries
    List,

    /// Run a preset query by name
    Run {
        /// Preset name as listed
        name: String,

        /// Output format (json, table, or csv)
        #[arg(long, default_value = "table")]
        format: String,
    },
}
