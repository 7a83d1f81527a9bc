use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use bookstore_cli::config::{paths::DATA_DIR_ENV, BookstorePaths, Settings};
use bookstore_cli::interpreter::Interpreter;
use bookstore_cli::logging::{init_logging, LogConfig, LogFormat};
use bookstore_cli::storage::Storage;

#[derive(Parser)]
#[command(
    name = "bookstore",
    version,
    about = "Line-oriented bookstore command interpreter",
    long_about = "Reads bookstore commands from stdin, one per line, and writes \
                  their output to stdout. Accounts, books and the finance ledger \
                  are kept as JSON files under the data directory."
)]
struct Cli {
    /// Base directory for data files
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    /// Prefix log lines with a timestamp
    #[arg(long, global = true)]
    log_timestamps: bool,

    /// Do not record operations in the audit log
    #[arg(long)]
    no_audit: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = LogConfig::from_verbosity(cli.verbose)
        .with_format(cli.log_format)
        .with_timestamps(cli.log_timestamps)
        .with_ansi(io::stderr().is_terminal());
    init_logging(&log_config).context("failed to initialise logging")?;

    let paths = match cli.data_dir {
        Some(dir) => BookstorePaths::with_base_dir(dir),
        None => BookstorePaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Init) => {
            settings.save(&paths)?;
            println!("Wrote {}", paths.settings_file().display());
        }
        Some(Commands::Config) => {
            println!("Bookstore Configuration");
            println!("=======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Bootstrap account: {}", settings.bootstrap.user_id);
            println!("  Audit enabled:     {}", settings.audit_enabled);
        }
        None => {
            let mut storage = Storage::open(paths, &settings.bootstrap)?;
            if settings.audit_enabled && !cli.no_audit {
                storage = storage.with_audit_log();
            }

            info!(base_dir = %storage.paths().base_dir().display(), "starting interpreter");
            let mut interpreter = Interpreter::new(storage);
            interpreter.run(io::stdin().lock(), &mut io::stdout().lock())?;
        }
    }

    Ok(())
}
