use colored::*;
use sims4modsorter::ModKind;
use tracing::{debug, info};

use super::util::{megabytes, print_skipped, GlobalOptions, Workspace};
use crate::Result as CrateResult;

pub fn scan(options: &GlobalOptions, verify: bool, details: bool) -> CrateResult<()> {
    debug!("Scanning mods");
    let workspace = Workspace::open(options)?;
    let catalog = workspace.scan()?;

    println!(
        "Found {} mods in {}.",
        catalog.len().to_string().blue().bold(),
        workspace.mods_dir.display()
    );
    for kind in ModKind::RECOGNIZED {
        println!(
            "  {:<8} {}",
            kind.as_str(),
            catalog.records(kind).len().to_string().bold()
        );
    }

    if details {
        for (kind, records) in catalog.kinds() {
            for record in records {
                println!(
                    "- {} [{}] ({:.2}MB) {}",
                    record.name().bold(),
                    kind,
                    megabytes(record.size()),
                    record.path().display().to_string().dimmed()
                );
            }
        }
    }

    print_skipped(&catalog);

    let misplaced = catalog.misplaced_scripts(&workspace.mods_dir);
    for record in misplaced.iter() {
        println!(
            "Script not at mods root: {}",
            record.path().display().to_string().red().bold()
        );
    }

    if verify && !catalog.is_empty() {
        println!(
            "Checking {} mods.",
            catalog.len().to_string().bold()
        );
        let mut failed = 0;
        for record in catalog.iter() {
            if workspace.scanner.validate(record) {
                let checksum = record.cached_checksum().unwrap_or_default();
                println!(
                    "Validated mod: {} ({:08X})",
                    record.name().bold().green(),
                    checksum
                );
            } else {
                failed += 1;
                println!(
                    "Mod {} validation: {}",
                    "failed".red(),
                    record.name().bold().red()
                );
            }
        }
        info!("Verification finished with {} failures", failed);
    }
    Ok(())
}
