//! wadinfo library
//!
//! This library provides the command handlers for the wadinfo CLI tool.

pub mod commands;
pub mod output;

// Re-export command handlers
pub use crate::commands::{
    level::handle as handle_level, lumps::handle as handle_lumps, maps::handle as handle_maps,
};

use anyhow::Context;
use clap::Subcommand;
use doomwad_formats::{ArchiveOptions, WadArchive};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the lump directory
    Lumps {
        /// Path to the WAD file
        wad: PathBuf,

        /// Only show lumps whose name contains this text (case-insensitive)
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// List the maps found in the archive
    Maps {
        /// Path to the WAD file
        wad: PathBuf,
    },

    /// Build one map and summarize its topology
    Level {
        /// Path to the WAD file
        wad: PathBuf,

        /// Map name (e.g., E1M1, MAP01)
        map: String,

        /// Ignore GL nodes and use the classic BSP tables
        #[arg(long)]
        classic_nodes: bool,
    },
}

/// Output format for command results
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Tables and plain text
    Text,
    /// JSON output
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

/// Context for command execution
#[derive(Clone, Debug)]
pub struct CommandContext {
    /// Output format
    pub format: OutputFormat,
    /// Whether to disable colors
    pub no_color: bool,
    /// How archives are loaded
    pub archive_options: ArchiveOptions,
}

impl CommandContext {
    /// Open an archive with the configured options
    pub fn open_archive(&self, path: &Path) -> anyhow::Result<WadArchive> {
        let archive = WadArchive::open_with_options(path, &self.archive_options)
            .with_context(|| format!("Failed to open WAD {}", path.display()))?;
        debug!(
            "Opened {} ({} lumps, memory-mapped: {})",
            path.display(),
            archive.lump_count(),
            archive.is_memory_mapped()
        );
        Ok(archive)
    }

    /// Print a serializable value as JSON in the selected style
    pub fn print_json<T: serde::Serialize + ?Sized>(&self, value: &T) -> anyhow::Result<()> {
        let output = if self.format == OutputFormat::JsonPretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        println!("{output}");
        Ok(())
    }
}

/// Dispatch a command
pub fn run(command: Commands, ctx: &CommandContext) -> anyhow::Result<()> {
    match command {
        Commands::Lumps { wad, filter } => handle_lumps(&wad, filter.as_deref(), ctx),
        Commands::Maps { wad } => handle_maps(&wad, ctx),
        Commands::Level {
            wad,
            map,
            classic_nodes,
        } => handle_level(&wad, &map, !classic_nodes, ctx),
    }
}
