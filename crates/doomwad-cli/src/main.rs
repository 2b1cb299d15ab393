use clap::Parser;
use tracing::Level;

use doomwad_cli::{CommandContext, Commands, OutputFormat};
use doomwad_formats::ArchiveOptions;

#[derive(Parser)]
#[command(
    name = "wadinfo",
    about = "Inspect Doom WAD archives: lumps, maps and level topology",
    version,
    author,
    long_about = "A command-line tool for reading Doom-engine WAD archives. It lists the lump directory, detects maps (Doom, Hexen, UDMF, with glBSP v2 companions) and builds a map to report its topology."
)]
struct Cli {
    /// Set the logging level
    #[arg(short, long, value_enum, global = true, default_value = "warn")]
    log_level: LogLevel,

    /// Output format
    #[arg(short = 'o', long, value_enum, global = true, default_value = "text")]
    format: OutputFormat,

    /// Read archives into memory instead of memory-mapping them
    #[arg(long, global = true, env = "WADINFO_NO_MMAP")]
    no_mmap: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON on stdout stays parseable
    tracing_subscriber::fmt()
        .with_max_level(Level::from(cli.log_level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let archive_options = if cli.no_mmap {
        ArchiveOptions::buffered()
    } else {
        ArchiveOptions::default()
    };

    let ctx = CommandContext {
        format: cli.format,
        no_color: cli.no_color,
        archive_options,
    };

    doomwad_cli::run(cli.command, &ctx)
}
