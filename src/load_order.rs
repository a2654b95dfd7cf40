//! Slot based load order.
//!
//! Every category owns a unique slot between 1 and 999. Non-script mods are
//! placed in a `<slot>_<category>` folder below the mods root so the game's
//! alphabetical folder walk loads them in slot order. Script mods stay at
//! the root because the game ignores nested scripts.

use std::{
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    classifier::ModKind,
    error::{OrganizerError, Result},
    model::ModEntry,
};

pub const SCRIPT_CATEGORY: &str = "ScriptMods";
pub const GAMEPLAY_CATEGORY: &str = "Gameplay";

/// A load order position between 1 and 999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u16")]
pub struct Slot(u16);

impl Slot {
    pub const MIN: u16 = 1;
    pub const MAX: u16 = 999;

    pub fn new(value: i64) -> Result<Slot> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Slot(value as u16))
        } else {
            Err(OrganizerError::SlotOutOfRange(value))
        }
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

impl TryFrom<i64> for Slot {
    type Error = OrganizerError;

    fn try_from(value: i64) -> Result<Slot> {
        Slot::new(value)
    }
}

impl From<Slot> for u16 {
    fn from(slot: Slot) -> u16 {
        slot.0
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

/// Folder prefix such as `001_ScriptMods`.
pub fn format_load_order(category: &str, slot: i64) -> Result<String> {
    Ok(folder_name(category, Slot::new(slot)?))
}

fn folder_name(category: &str, slot: Slot) -> String {
    format!("{}_{}", slot, category)
}

const DEFAULT_CATEGORIES: [(&str, u16); 6] = [
    (SCRIPT_CATEGORY, 1),
    ("CAS", 2),
    ("BuildBuy", 3),
    (GAMEPLAY_CATEGORY, 4),
    ("UI", 5),
    ("Overrides", 999),
];

/// Category name to slot mapping. Slots are unique at all times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    slots: BTreeMap<String, Slot>,
}

impl Default for CategoryTable {
    fn default() -> Self {
        CategoryTable {
            slots: DEFAULT_CATEGORIES
                .iter()
                .map(|(name, slot)| (name.to_string(), Slot(*slot)))
                .collect(),
        }
    }
}

impl CategoryTable {
    /// Defaults with `overrides` applied. A default category named in
    /// `overrides` gives up its slot before any slot is checked, so the
    /// result only depends on the final name to slot pairs.
    pub fn with_overrides<'a>(
        overrides: impl IntoIterator<Item = (&'a str, Slot)>,
    ) -> Result<CategoryTable> {
        let overrides: Vec<(&str, Slot)> = overrides.into_iter().collect();
        let mut table = CategoryTable {
            slots: DEFAULT_CATEGORIES
                .iter()
                .filter(|(name, _)| !overrides.iter().any(|(o, _)| o == name))
                .map(|(name, slot)| (name.to_string(), Slot(*slot)))
                .collect(),
        };
        for (name, slot) in overrides {
            table.insert(name, slot)?;
        }
        Ok(table)
    }

    pub fn get(&self, category: &str) -> Option<Slot> {
        self.slots.get(category).copied()
    }

    pub fn owner_of(&self, slot: Slot) -> Option<&str> {
        self.slots
            .iter()
            .find(|(_, s)| **s == slot)
            .map(|(name, _)| name.as_str())
    }

    /// Inserts or moves a category. Fails without touching the table when
    /// another category already owns the slot.
    pub fn insert(&mut self, name: &str, slot: Slot) -> Result<()> {
        if let Some(existing) = self.owner_of(slot) {
            if existing != name {
                return Err(OrganizerError::SlotTaken {
                    slot: slot.get(),
                    existing: existing.to_string(),
                });
            }
        }
        self.slots.insert(name.to_string(), slot);
        Ok(())
    }

    /// Categories ordered by slot.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Slot)> {
        let mut entries: Vec<_> = self
            .slots
            .iter()
            .map(|(name, slot)| (name.as_str(), *slot))
            .collect();
        entries.sort_by_key(|(_, slot)| *slot);
        entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadOrderAssignment {
    pub category: String,
    pub slot: Slot,
}

impl LoadOrderAssignment {
    pub fn folder_name(&self) -> String {
        folder_name(&self.category, self.slot)
    }
}

pub type PathMapping = BTreeMap<PathBuf, PathBuf>;

#[derive(Debug, Clone, Serialize)]
pub struct PlanEntry {
    pub source: PathBuf,
    pub target: PathBuf,
    pub kind: ModKind,
    pub category: String,
    pub slot: Slot,
}

/// Sorted placement of a set of mods, handed to whatever moves the files.
#[derive(Debug, Clone, Serialize)]
pub struct LoadOrderPlan {
    pub generated: DateTime<Local>,
    pub mods_root: PathBuf,
    pub entries: Vec<PlanEntry>,
}

impl LoadOrderPlan {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn mapping(&self) -> PathMapping {
        self.entries
            .iter()
            .map(|entry| (entry.source.clone(), entry.target.clone()))
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadOrderManager {
    categories: CategoryTable,
}

impl LoadOrderManager {
    pub fn new() -> LoadOrderManager {
        Self::default()
    }

    pub fn with_categories(categories: CategoryTable) -> LoadOrderManager {
        LoadOrderManager { categories }
    }

    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    pub fn add_category(&mut self, name: &str, slot: i64) -> Result<()> {
        let slot = Slot::new(slot)?;
        self.categories.insert(name, slot)?;
        info!("Added category: {} (slot {})", name, slot.get());
        Ok(())
    }

    pub fn get_slot(&self, category: &str) -> Option<Slot> {
        self.categories.get(category)
    }

    /// Scripts go to the script slot. Everything else is filed under
    /// Gameplay until package contents can be inspected.
    pub fn assign_category<T: ModEntry + ?Sized>(&self, entry: &T) -> LoadOrderAssignment {
        let category = match entry.kind() {
            ModKind::Script => SCRIPT_CATEGORY,
            ModKind::Package | ModKind::Project | ModKind::Unknown => GAMEPLAY_CATEGORY,
        };
        LoadOrderAssignment {
            category: category.to_string(),
            slot: self.default_slot(category),
        }
    }

    // Every table starts from the defaults and entries are never removed,
    // so ScriptMods and Gameplay are always present.
    fn default_slot(&self, category: &str) -> Slot {
        self.categories.get(category).unwrap_or(Slot(Slot::MAX))
    }

    /// Orders by category slot, then by case-insensitive stem. Equal stems
    /// keep their input order.
    pub fn sort_within_categories<'a, T: ModEntry>(&self, mods: &'a [T]) -> Vec<&'a T> {
        let mut sorted: Vec<&T> = mods.iter().collect();
        sorted.sort_by_cached_key(|entry| (self.assign_category(*entry).slot, entry.sort_key()));
        sorted
    }

    pub fn target_path<T: ModEntry + ?Sized>(&self, entry: &T, mods_root: &Path) -> Result<PathBuf> {
        let file_name = entry
            .mod_path()
            .file_name()
            .ok_or_else(|| OrganizerError::NoFileName(entry.mod_path().to_path_buf()))?;
        if entry.kind() == ModKind::Script {
            return Ok(mods_root.join(file_name));
        }
        let assignment = self.assign_category(entry);
        Ok(mods_root.join(assignment.folder_name()).join(file_name))
    }

    pub fn build_target_paths<T: ModEntry>(&self, mods: &[T], mods_root: &Path) -> Result<PathMapping> {
        mods.iter()
            .map(|entry| {
                let target = self.target_path(entry, mods_root)?;
                debug!(
                    "{} -> {}",
                    entry.mod_path().display(),
                    target.display()
                );
                Ok((entry.mod_path().to_path_buf(), target))
            })
            .collect()
    }

    pub fn plan<T: ModEntry>(&self, mods: &[T], mods_root: &Path) -> Result<LoadOrderPlan> {
        let entries = self
            .sort_within_categories(mods)
            .into_iter()
            .map(|entry| {
                let assignment = self.assign_category(entry);
                Ok(PlanEntry {
                    source: entry.mod_path().to_path_buf(),
                    target: self.target_path(entry, mods_root)?,
                    kind: entry.kind(),
                    category: assignment.category,
                    slot: assignment.slot,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        info!("Planned {} mods", entries.len());
        Ok(LoadOrderPlan {
            generated: Local::now(),
            mods_root: mods_root.to_path_buf(),
            entries,
        })
    }
}
