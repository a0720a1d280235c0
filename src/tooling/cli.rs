//! CLI Tooling
//!
//! Command-line interface for lookup operations. Each invocation is a
//! single request/response: build what the command needs, run it, render
//! the outcome as text or JSON.

use crate::config::{AppConfig, ConfigLoader};
use crate::error::FindError;
use crate::index;
use crate::launch;
use crate::logging::LoggingConfig;
use crate::lookup::{LookupSession, Outcome};
use crate::metadata;
use crate::store::sqlite::SqliteRecordStore;
use crate::store::RecordStore;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;

/// Imagefind CLI - locate the image file behind a row of tabular metadata
#[derive(Parser)]
#[command(name = "imagefind")]
#[command(about = "Cross-references tabular names against an on-disk image directory")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a display name and open the matching image
    Find {
        /// Display name to resolve (a join-key value from the name file)
        name: String,
        /// Record store database file
        #[arg(long)]
        database: PathBuf,
        /// Image directory to index
        #[arg(long)]
        images: PathBuf,
        /// Delimited name file whose first column is the join key
        #[arg(long)]
        names: PathBuf,
        /// Report the outcome without opening the file
        #[arg(long)]
        no_launch: bool,
    },
    /// Build the base-name index for a directory tree and summarize it
    Index {
        /// Image directory to index
        #[arg(long)]
        images: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Open a record store and report its designated table and columns
    Inspect {
        /// Record store database file
        #[arg(long)]
        database: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List the display names in a name file
    Names {
        /// Delimited name file whose first column is the join key
        #[arg(long)]
        names: PathBuf,
    },
}

/// Per-invocation context: resolved configuration.
pub struct CliContext {
    config: AppConfig,
}

impl CliContext {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Load configuration and fold the CLI logging flags into it.
    pub fn from_cli(cli: &Cli) -> Result<Self, FindError> {
        let mut config = ConfigLoader::load(cli.config.as_deref())?;
        if let Some(level) = &cli.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &cli.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &cli.log_output {
            config.logging.output = output.clone();
        }
        if let Some(file) = &cli.log_file {
            config.logging.file = Some(file.clone());
        }
        Ok(Self { config })
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.config.logging
    }

    pub fn execute(&self, command: &Commands) -> Result<String, FindError> {
        match command {
            Commands::Find {
                name,
                database,
                images,
                names,
                no_launch,
            } => self.execute_find(name, database, images, names, *no_launch),
            Commands::Index { images, format } => self.execute_index(images, format),
            Commands::Inspect { database, format } => self.execute_inspect(database, format),
            Commands::Names { names } => self.execute_names(names),
        }
    }

    fn execute_find(
        &self,
        name: &str,
        database: &Path,
        images: &Path,
        names: &Path,
        no_launch: bool,
    ) -> Result<String, FindError> {
        let mut session = LookupSession::new(self.config.store.clone());
        session.set_store(database)?;
        let entries = session.index_directory(images)?;
        info!(entries, "image directory indexed");
        session.load_names(names, self.config.metadata.delimiter)?;

        let outcome = session.find_image(name)?;
        if let Outcome::Launch(path) = &outcome {
            if !no_launch {
                launch::open_path(path)?;
            }
        }
        Ok(render_outcome(name, &outcome))
    }

    fn execute_index(&self, images: &Path, format: &str) -> Result<String, FindError> {
        let index = index::build_index(images)?;
        match parse_format(format)? {
            OutputFormat::Json => Ok(json!({
                "root": images.display().to_string(),
                "entries": index.len(),
            })
            .to_string()),
            OutputFormat::Text => Ok(format!(
                "Indexed {} files under {}",
                index.len(),
                images.display()
            )),
        }
    }

    fn execute_inspect(&self, database: &Path, format: &str) -> Result<String, FindError> {
        let store = SqliteRecordStore::open(database)?;
        let table = store.first_table()?;
        let columns = match &table {
            Some(table) => store.column_names(table)?,
            None => Vec::new(),
        };
        match parse_format(format)? {
            OutputFormat::Json => Ok(json!({
                "table": table,
                "columns": columns,
            })
            .to_string()),
            OutputFormat::Text => Ok(match table {
                Some(table) => format!("Table {}: {}", table, columns.join(", ")),
                None => "Store has no tables".to_string(),
            }),
        }
    }

    fn execute_names(&self, names: &Path) -> Result<String, FindError> {
        let table = metadata::load_name_table(names, self.config.metadata.delimiter)?;
        Ok(table.display_names().collect::<Vec<_>>().join("\n"))
    }
}

enum OutputFormat {
    Text,
    Json,
}

fn parse_format(format: &str) -> Result<OutputFormat, FindError> {
    match format {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => Err(FindError::Config(format!(
            "invalid output format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

/// Render an outcome with the message shapes users already know.
pub fn render_outcome(name: &str, outcome: &Outcome) -> String {
    match outcome {
        Outcome::Launch(path) => format!("Found '{}': {}", name, path.display()),
        Outcome::SchemaMismatch { column } => format!("Can't find '{}' in database", column),
        Outcome::RecordNotFound { name } => format!("Can't find '{}' in database", name),
        Outcome::FileNotIndexed { base_name } => {
            format!("Can't find '{}' in directory", base_name)
        }
        Outcome::NotReady => {
            "Record store, image directory, and name file must all be loaded".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_render_outcome_messages() {
        assert_eq!(
            render_outcome("Jane", &Outcome::Launch(Path::new("/a/b.png").to_path_buf())),
            "Found 'Jane': /a/b.png"
        );
        assert_eq!(
            render_outcome(
                "Jane",
                &Outcome::SchemaMismatch {
                    column: "FULL_NAME".to_string()
                }
            ),
            "Can't find 'FULL_NAME' in database"
        );
        assert_eq!(
            render_outcome(
                "Jane",
                &Outcome::RecordNotFound {
                    name: "Jane".to_string()
                }
            ),
            "Can't find 'Jane' in database"
        );
        assert_eq!(
            render_outcome(
                "Jane",
                &Outcome::FileNotIndexed {
                    base_name: "IMG001.png".to_string()
                }
            ),
            "Can't find 'IMG001.png' in directory"
        );
    }

    #[test]
    fn test_parse_format_rejects_unknown() {
        assert!(parse_format("text").is_ok());
        assert!(parse_format("json").is_ok());
        assert!(parse_format("yaml").is_err());
    }
}
