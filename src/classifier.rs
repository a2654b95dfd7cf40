use serde::{Deserialize, Serialize};
use std::{fmt, path::Path};

pub const SCRIPT_EXTENSION: &str = "ts4script";
pub const PACKAGE_EXTENSION: &str = "package";
pub const PROJECT_EXTENSION: &str = "bpi";

/// Kind of a mod file, decided from its extension alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModKind {
    /// Script payload. Must live directly in the mods root.
    Script,
    /// General package payload.
    Package,
    /// Build project definition.
    Project,
    Unknown,
}

impl ModKind {
    pub const RECOGNIZED: [ModKind; 3] = [ModKind::Script, ModKind::Package, ModKind::Project];

    /// Maps a lower or mixed case extension (without the dot).
    pub fn from_extension(extension: &str) -> ModKind {
        match extension.to_ascii_lowercase().as_str() {
            SCRIPT_EXTENSION => ModKind::Script,
            PACKAGE_EXTENSION => ModKind::Package,
            PROJECT_EXTENSION => ModKind::Project,
            _ => ModKind::Unknown,
        }
    }

    pub fn is_recognized(self) -> bool {
        self != ModKind::Unknown
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ModKind::Script => "script",
            ModKind::Package => "package",
            ModKind::Project => "project",
            ModKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ModKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn classify(path: &Path) -> ModKind {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(ModKind::from_extension)
        .unwrap_or(ModKind::Unknown)
}

pub fn is_script_mod(path: &Path) -> bool {
    classify(path) == ModKind::Script
}

/// Scripts are only loaded from the top level of the mods folder. Every
/// other kind may sit anywhere below it.
pub fn validate_script_placement(path: &Path, mods_root: &Path) -> bool {
    if is_script_mod(path) {
        path.parent() == Some(mods_root)
    } else {
        true
    }
}
