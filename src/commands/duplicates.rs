use colored::*;
use sims4modsorter::duplicates::find_duplicates;
use tracing::debug;

use super::util::{GlobalOptions, Workspace};
use crate::Result as CrateResult;

pub fn duplicates(options: &GlobalOptions) -> CrateResult<()> {
    let workspace = Workspace::open(options)?;
    let catalog = workspace.scan()?;

    debug!("Hashing {} mods for duplicate detection", catalog.len());
    let groups = find_duplicates(&catalog);
    if groups.is_empty() {
        println!("{}", "No duplicate mods found.".green());
        return Ok(());
    }

    println!(
        "Found {} sets of duplicate mods.",
        groups.len().to_string().red().bold()
    );
    for group in groups.iter() {
        println!(
            "Hash:  {}  Size: {} bytes",
            format!("{:08X}", group.checksum).bold().yellow(),
            group.size
        );
        for record in group.records.iter() {
            println!("  File: {}", record.path().display().to_string().red());
        }
    }
    Ok(())
}
