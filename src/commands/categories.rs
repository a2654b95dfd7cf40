use colored::*;
use sims4modsorter::config::{parse_category, Settings};
use tracing::info;

use crate::Result as CrateResult;

pub fn categories(add: Option<String>) -> CrateResult<()> {
    let mut settings = Settings::load()?;

    if let Some(add) = add {
        let (name, slot) = parse_category(&add)?;
        settings.add_category(&name, slot)?;
        settings.save()?;
        info!("Saved category {} (slot {})", name, slot.get());
        println!("Added category {} at slot {}", name.bold().blue(), slot);
    }

    let manager = settings.load_order_manager()?;
    for (name, slot) in manager.categories().iter() {
        let custom = settings.categories.iter().any(|c| c.name == name);
        println!(
            "{} {}{}",
            slot.to_string().bold(),
            name,
            if custom { " (custom)".dimmed() } else { "".normal() }
        );
    }
    Ok(())
}
