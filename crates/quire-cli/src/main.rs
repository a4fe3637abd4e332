use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use quire_cli::{
    cli::{Cli, Commands},
    commands, config,
};
use quire_parser::NoteParser;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over -v
    let log_level = if cli.verbose { "debug" } else { "info" };
    let default_filter = ["quire_cli", "quire_core", "quire_parser", "quire_query"]
        .iter()
        .map(|target| format!("{target}={log_level}"))
        .collect::<Vec<_>>()
        .join(",");
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with_writer(std::io::stderr)
        .init();

    let config = config::load(cli.config.as_deref())?;
    let parser = NoteParser::from_config(&config);

    match cli.command {
        Commands::Parse { file, id } => commands::parse::execute(&parser, &file, id)?,

        Commands::Query {
            dir,
            query,
            tasks,
            json,
        } => commands::query::execute(&config, &parser, &dir, &query, tasks, json)?,

        Commands::Set {
            file,
            key,
            value,
            string,
        } => commands::frontmatter::set(&config, &file, &key, value.as_deref(), string)?,

        Commands::RenameKey { file, old, new } => commands::frontmatter::rename_key(&file, &old, &new)?,

        Commands::Toggle { file, offset } => commands::toggle::execute(&file, offset)?,

        Commands::Export { dir, id, depth } => commands::export::execute(&config, &dir, &id, depth)?,
    }

    Ok(())
}
