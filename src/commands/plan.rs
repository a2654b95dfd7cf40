use std::path::PathBuf;

use colored::*;
use itertools::Itertools;
use sims4modsorter::ModKind;
use tracing::{debug, info};
use tracing_unwrap::OptionExt;

use super::util::{print_skipped, GlobalOptions, Workspace};
use crate::Result as CrateResult;

pub fn plan(options: &GlobalOptions, json: Option<PathBuf>) -> CrateResult<()> {
    let workspace = Workspace::open(options)?;
    let manager = workspace.settings.load_order_manager()?;
    let catalog = workspace.scan()?;
    print_skipped(&catalog);

    let records = catalog.into_records();
    let plan = manager.plan(&records, &workspace.mods_dir)?;

    let title_corner = boxy::Char::upper_left(boxy::Weight::Thick);
    let title_side_h = boxy::Char::horizontal(boxy::Weight::Thick).to_string();
    let title_side_v = boxy::Char::vertical(boxy::Weight::Thick);
    let title_branch = boxy::Char::right_tee(boxy::Weight::Thick).down(boxy::Weight::Normal);
    let left_branch_more = boxy::Char::right_tee(boxy::Weight::Normal);
    let left_branch_done = boxy::Char::lower_left(boxy::Weight::Normal);
    let left_node = boxy::Char::left_half(boxy::Weight::Normal);

    for (category, entries) in &plan.entries.iter().group_by(|entry| entry.category.clone()) {
        let slot = manager
            .get_slot(&category)
            .expect_or_log("Planned category missing from table");
        let title = format!("{} {}", slot, category);
        let title_width = title.chars().count();
        println!(
            "{}{}{}",
            title_corner,
            title_side_h.repeat(title_width + 2),
            title_corner.rotate_cw(1)
        );
        println!("{} {} {}", title_side_v, title.bold(), title_side_v);
        println!(
            "{}{}{}",
            title_branch,
            title_side_h.repeat(title_width + 2),
            title_corner.rotate_cw(2)
        );

        let mut entries = entries.peekable();
        while let Some(entry) = entries.next() {
            let moved = entry.source != entry.target;
            println!(
                "{}{}{} {}",
                if entries.peek().is_some() {
                    left_branch_more
                } else {
                    left_branch_done
                },
                left_node,
                entry
                    .source
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default()
                    .bold(),
                if moved {
                    format!("-> {}", entry.target.display()).yellow()
                } else {
                    "(in place)".green()
                }
            );
        }
    }

    let to_move = plan
        .entries
        .iter()
        .filter(|entry| entry.source != entry.target)
        .count();
    println!(
        "{} of {} mods need to move.",
        to_move.to_string().yellow().bold(),
        plan.entries.len()
    );

    let misplaced_scripts = plan
        .entries
        .iter()
        .filter(|entry| entry.kind == ModKind::Script && entry.source != entry.target)
        .count();
    if misplaced_scripts > 0 {
        println!(
            "{} script mods are nested and will not load until moved to the mods root.",
            misplaced_scripts.to_string().red().bold()
        );
    }

    if let Some(json) = json {
        debug!("Writing plan to {}", json.display());
        std::fs::write(&json, plan.to_json()?)?;
        info!("Wrote load order plan to {}", json.display());
        println!("Plan written to {}", json.display().to_string().blue());
    }
    Ok(())
}
