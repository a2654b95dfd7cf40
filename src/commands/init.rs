use std::io::{Error as IOError, ErrorKind as IOErrorKind};

use inquire::{CustomType, Text};
use sims4modsorter::{config::Settings, scanner::DEFAULT_MAX_SIZE_MB, util};
use tracing::{debug, info};

use crate::Result as CrateResult;

pub fn init(force: bool) -> CrateResult<()> {
    debug!("Initializing settings");
    let settings_path = util::settings_path()?;
    if settings_path.is_file() && !force {
        return Err(IOError::new(IOErrorKind::AlreadyExists, "Settings file exists!").into());
    }

    let default_mods = util::default_sims_mod_dir()?;
    let mods_path = Text::new("Mods folder:")
        .with_default(&default_mods.display().to_string())
        .with_validator(inquire::required!())
        .prompt()?;

    let max_mod_size_mb = CustomType::<u64>::new("Maximum mod size (MB):")
        .with_default(DEFAULT_MAX_SIZE_MB)
        .with_error_message("Please enter a whole number of megabytes")
        .prompt()?;

    let settings = Settings {
        mods_path: Some(mods_path.into()),
        max_mod_size_mb,
        ..Default::default()
    };
    settings.save_to(&settings_path)?;
    info!("Settings written to {}", settings_path.display());
    Ok(())
}
