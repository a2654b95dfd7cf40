use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    error::{OrganizerError, Result},
    load_order::{CategoryTable, LoadOrderManager, Slot},
    scanner::{ModScanner, DEFAULT_MAX_SIZE_MB},
    util,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomCategory {
    pub name: String,
    pub slot: Slot,
}

/// User settings, stored as JSON in the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mods_path: Option<PathBuf>,
    pub max_mod_size_mb: u64,
    pub categories: Vec<CustomCategory>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            mods_path: None,
            max_mod_size_mb: DEFAULT_MAX_SIZE_MB,
            categories: Vec::new(),
        }
    }
}

impl Settings {
    /// Missing file means defaults. A file that does not parse is an error.
    pub fn load_from(path: &Path) -> Result<Settings> {
        if !path.is_file() {
            debug!("No settings at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        debug!("Loading settings from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            OrganizerError::Config(format!("Invalid settings file {}: {}", path.display(), e))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load() -> Result<Settings> {
        Self::load_from(&util::settings_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            util::ensure_dir(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("Saved settings to {}", path.display());
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&util::settings_path()?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_mod_size_mb == 0 {
            return Err(OrganizerError::Config(
                "max_mod_size_mb must be greater than 0".into(),
            ));
        }
        self.category_table().map(|_| ())
    }

    pub fn category_table(&self) -> Result<CategoryTable> {
        CategoryTable::with_overrides(
            self.categories
                .iter()
                .map(|category| (category.name.as_str(), category.slot)),
        )
    }

    pub fn load_order_manager(&self) -> Result<LoadOrderManager> {
        Ok(LoadOrderManager::with_categories(self.category_table()?))
    }

    pub fn scanner(&self) -> ModScanner {
        ModScanner::with_max_size_mb(self.max_mod_size_mb)
    }

    /// Explicit path first, then the stored one, then the game's default.
    pub fn resolve_mods_path(&self, explicit: Option<PathBuf>) -> Result<PathBuf> {
        match explicit.or_else(|| self.mods_path.clone()) {
            Some(path) => Ok(path),
            None => util::default_sims_mod_dir(),
        }
    }

    /// Records a custom category after checking it against the effective
    /// table.
    pub fn add_category(&mut self, name: &str, slot: Slot) -> Result<()> {
        let mut table = self.category_table()?;
        table.insert(name, slot)?;
        match self.categories.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.slot = slot,
            None => self.categories.push(CustomCategory {
                name: name.to_string(),
                slot,
            }),
        }
        Ok(())
    }
}

/// Parses `Name:slot`.
pub fn parse_category(input: &str) -> Result<(String, Slot)> {
    let (name, slot) = input
        .rsplit_once(':')
        .ok_or_else(|| OrganizerError::Config(format!("Expected NAME:SLOT, got '{}'", input)))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(OrganizerError::Config("Category name is empty".into()));
    }
    let slot: i64 = slot
        .trim()
        .parse()
        .map_err(|_| OrganizerError::Config(format!("Invalid slot '{}'", slot)))?;
    Ok((name.to_string(), Slot::new(slot)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.scanner().max_file_size(), 500 * 1024 * 1024);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut settings = Settings {
            mods_path: Some(PathBuf::from("/games/Mods")),
            max_mod_size_mb: 750,
            ..Default::default()
        };
        settings.add_category("Custom", Slot::new(50).unwrap()).unwrap();
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
        let manager = loaded.load_order_manager().unwrap();
        assert_eq!(manager.get_slot("Custom").map(Slot::get), Some(50));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"max_mod_size_mb": 100}"#).unwrap();
        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.max_mod_size_mb, 100);
        assert!(settings.mods_path.is_none());
        assert!(settings.categories.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Settings::load_from(&path),
            Err(OrganizerError::Config(_))
        ));
    }

    #[test]
    fn test_out_of_range_slot_rejected_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"categories": [{"name": "Bad", "slot": 1000}]}"#).unwrap();
        assert!(Settings::load_from(&path).is_err());
    }

    #[test]
    fn test_colliding_category_rejected() {
        let mut settings = Settings::default();
        let err = settings
            .add_category("Mine", Slot::new(4).unwrap())
            .unwrap_err();
        assert!(err.to_string().contains("Gameplay"));
        assert!(settings.categories.is_empty());

        settings.categories.push(CustomCategory {
            name: "Mine".into(),
            slot: Slot::new(999).unwrap(),
        });
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_moving_a_default_twice_keeps_settings_valid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut settings = Settings::default();
        settings.add_category("Gameplay", Slot::new(10).unwrap()).unwrap();
        settings.add_category("X", Slot::new(4).unwrap()).unwrap();
        settings.add_category("Gameplay", Slot::new(11).unwrap()).unwrap();

        settings.validate().unwrap();
        settings.save_to(&path).unwrap();
        let manager = Settings::load_from(&path)
            .unwrap()
            .load_order_manager()
            .unwrap();
        assert_eq!(manager.get_slot("Gameplay").map(Slot::get), Some(11));
        assert_eq!(manager.get_slot("X").map(Slot::get), Some(4));
        assert_eq!(manager.categories().owner_of(Slot::new(10).unwrap()), None);
    }

    #[test]
    fn test_zero_size_limit_rejected() {
        let settings = Settings {
            max_mod_size_mb: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_resolve_mods_path_precedence() {
        let settings = Settings {
            mods_path: Some(PathBuf::from("/stored")),
            ..Default::default()
        };
        assert_eq!(
            settings
                .resolve_mods_path(Some(PathBuf::from("/cli")))
                .unwrap(),
            PathBuf::from("/cli")
        );
        assert_eq!(
            settings.resolve_mods_path(None).unwrap(),
            PathBuf::from("/stored")
        );
    }

    #[test]
    fn test_parse_category() {
        let (name, slot) = parse_category("Animations:42").unwrap();
        assert_eq!(name, "Animations");
        assert_eq!(slot.get(), 42);
        assert!(parse_category("NoSlot").is_err());
        assert!(parse_category(":5").is_err());
        assert!(parse_category("Bad:abc").is_err());
        assert!(matches!(
            parse_category("Big:1000"),
            Err(OrganizerError::SlotOutOfRange(1000))
        ));
    }
}
