use std::path::PathBuf;

use colored::*;
use sims4modsorter::{config::Settings, model::SkipReason, Catalog, ModScanner};
use tracing::debug;

use crate::Result as CrateResult;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub mods_dir: Option<PathBuf>,
    pub max_size_mb: Option<u64>,
}

pub struct Workspace {
    pub settings: Settings,
    pub mods_dir: PathBuf,
    pub scanner: ModScanner,
}

impl Workspace {
    pub fn open(options: &GlobalOptions) -> CrateResult<Workspace> {
        let settings = Settings::load()?;
        let mods_dir = std::path::absolute(settings.resolve_mods_path(options.mods_dir.clone())?)?;
        let scanner = match options.max_size_mb {
            Some(0) => return Err("--max-size-mb must be greater than 0".into()),
            Some(mb) => ModScanner::with_max_size_mb(mb),
            None => settings.scanner(),
        };
        debug!(
            "Mods directory: {}, size limit: {} bytes",
            mods_dir.display(),
            scanner.max_file_size()
        );
        Ok(Workspace {
            settings,
            mods_dir,
            scanner,
        })
    }

    pub fn scan(&self) -> CrateResult<Catalog> {
        Ok(self.scanner.scan(&self.mods_dir)?)
    }
}

pub fn print_skipped(catalog: &Catalog) {
    if catalog.skipped().is_empty() {
        return;
    }
    println!(
        "Skipped {} files.",
        catalog.skipped().len().to_string().yellow().bold()
    );
    for skipped in catalog.skipped() {
        let reason = match &skipped.reason {
            SkipReason::Oversized { size, limit } => format!(
                "{:.1}MB exceeds {:.1}MB",
                megabytes(*size),
                megabytes(*limit)
            ),
            SkipReason::Unreadable { error } => error.clone(),
        };
        println!(
            "Skipped: {} ({})",
            skipped.path.display().to_string().yellow(),
            reason
        );
    }
}

pub fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}
