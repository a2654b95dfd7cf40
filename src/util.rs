use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{OrganizerError, Result};

const DATA_DIR_NAME: &str = "com.familiar.sims4modsorganizer";

/// `Documents/Electronic Arts/The Sims 4/Mods`. Not checked for existence.
pub fn default_sims_mod_dir() -> Result<PathBuf> {
    let documents = dirs::document_dir()
        .ok_or_else(|| OrganizerError::Config("Failed to get Documents directory".into()))?;
    Ok(documents
        .join("Electronic Arts")
        .join("The Sims 4")
        .join("Mods"))
}

pub fn data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| OrganizerError::Config("Failed to get user data directory".into()))?
        .join(DATA_DIR_NAME);
    debug!("Data directory: {}", data_dir.display());
    Ok(data_dir)
}

pub fn ensure_dir(dir: &std::path::Path) -> Result<()> {
    if !dir.is_dir() {
        info!("Creating directory {}", dir.display());
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

pub fn settings_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("config.json"))
}
