use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quire")]
#[command(about = "quire - markdown notes with wikilinks, tags, tasks and queries")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (debug level for quire crates)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (.toml, .yaml or .yml)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a note and print it as JSON
    Parse {
        /// Markdown file
        file: PathBuf,

        /// Note id (defaults to the file stem)
        #[arg(long)]
        id: Option<String>,
    },

    /// Query the notes (or tasks) of a directory
    Query {
        /// Notes directory
        dir: PathBuf,

        /// Query string, e.g. `tag:work -completed:true sort:date`
        query: String,

        /// Query tasks instead of notes
        #[arg(long)]
        tasks: bool,

        /// Print matches as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set a frontmatter key, or delete it when no value is given
    Set {
        file: PathBuf,
        key: String,
        value: Option<String>,

        /// Store the value as a string even if it looks like a number, bool or date
        #[arg(long)]
        string: bool,
    },

    /// Rename a frontmatter key
    RenameKey {
        file: PathBuf,
        old: String,
        new: String,
    },

    /// Toggle the task whose list marker is at a byte offset
    Toggle {
        file: PathBuf,
        /// Byte offset reported by `parse` or `query --tasks`
        offset: usize,
    },

    /// Print a note with its embeds inlined
    Export {
        /// Notes directory
        dir: PathBuf,

        /// Note id, relative path without `.md`
        id: String,

        /// Maximum embed nesting depth (defaults to the configured value)
        #[arg(long)]
        depth: Option<usize>,
    },
}
