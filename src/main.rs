mod commands;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use commands::GlobalOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Program to sort Sims 4 mods into load order folders
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    /// Mods folder to work on (defaults to the configured or standard one)
    #[arg(short, long, global = true)]
    mods_dir: Option<PathBuf>,

    /// Skip mod files larger than this many megabytes
    #[arg(long, global = true)]
    max_size_mb: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Writes the settings file
    Init {
        /// Replace an existing settings file, if found
        #[arg(short, long)]
        force: bool,
    },
    /// Scans the mods folder and reports what was found
    Scan {
        /// Verify file size and checksum of every mod
        #[arg(short, long)]
        verify: bool,

        /// List every mod found
        #[arg(short, long)]
        details: bool,
    },
    /// Shows the load order and where every mod belongs
    Plan {
        /// Write the plan as JSON for the installer
        #[arg(short, long)]
        json: Option<PathBuf>,
    },
    /// Lists mods with identical contents
    Duplicates,
    /// Shows load order categories
    Categories {
        /// Adds a custom category, given as NAME:SLOT
        #[arg(short, long)]
        add: Option<String>,
    },
    /// Open the Sims 4 mod directory in a file explorer
    OpenModDir,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    info!(
        "Starting sims4modsorter version {}",
        env!("CARGO_PKG_VERSION")
    );
    let args = Args::parse();
    let options = GlobalOptions {
        mods_dir: args.mods_dir,
        max_size_mb: args.max_size_mb,
    };
    match args.command {
        Command::Init { force } => commands::init(force),
        Command::Scan { verify, details } => commands::scan(&options, verify, details),
        Command::Plan { json } => commands::plan(&options, json),
        Command::Duplicates => commands::duplicates(&options),
        Command::Categories { add } => commands::categories(add),
        Command::OpenModDir => {
            let workspace = commands::Workspace::open(&options)?;
            if !workspace.mods_dir.is_dir() {
                eprintln!("Could not locate Sims 4 mods folder.");
                std::process::exit(1);
            }
            opener::open(&workspace.mods_dir).map_err(|e| e.into())
        }
    }
}
