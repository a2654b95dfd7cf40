use std::{fs, path::Path};

use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::{
    classifier::classify,
    error::{OrganizerError, Result},
    model::{Catalog, ModRecord, SkipReason},
};

pub const DEFAULT_MAX_SIZE_MB: u64 = 500;
const BYTES_PER_MB: u64 = 1024 * 1024;

/// Walks a mods tree and catalogs recognized files.
///
/// Symbolic links are never followed. A link is not a regular file, so
/// linked mods are skipped along with directories and special files.
#[derive(Debug, Clone)]
pub struct ModScanner {
    max_file_size: u64,
}

impl Default for ModScanner {
    fn default() -> Self {
        Self::with_max_size_mb(DEFAULT_MAX_SIZE_MB)
    }
}

impl ModScanner {
    /// Files larger than `max_file_size` bytes are skipped. A file of
    /// exactly the limit is accepted.
    pub fn new(max_file_size: u64) -> ModScanner {
        ModScanner { max_file_size }
    }

    pub fn with_max_size_mb(max_size_mb: u64) -> ModScanner {
        Self::new(max_size_mb.saturating_mul(BYTES_PER_MB))
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    pub fn scan(&self, root: &Path) -> Result<Catalog> {
        if !root.exists() {
            return Err(OrganizerError::DirectoryNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(OrganizerError::NotADirectory(root.to_path_buf()));
        }

        info!("Scanning directory: {}", root.display());
        let mut catalog = Catalog::new();

        for entry in WalkDir::new(root).follow_links(false).min_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    if let Some(path) = e.path() {
                        catalog.skip(
                            path.to_path_buf(),
                            SkipReason::Unreadable {
                                error: e.to_string(),
                            },
                        );
                    }
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            self.catalog_entry(&mut catalog, entry.path());
        }

        info!(
            "Scan complete: {} mods found, {} skipped",
            catalog.len(),
            catalog.skipped().len()
        );
        Ok(catalog)
    }

    /// Adds one discovered file to the catalog. Unrecognized files are
    /// ignored; oversized or unreadable ones are logged and recorded as
    /// skipped.
    fn catalog_entry(&self, catalog: &mut Catalog, path: &Path) {
        if !classify(path).is_recognized() {
            return;
        }

        let record = match ModRecord::new(path) {
            Ok(record) => record,
            Err(e) => {
                error!("Error processing {}: {}", path.display(), e);
                catalog.skip(
                    path.to_path_buf(),
                    SkipReason::Unreadable {
                        error: e.to_string(),
                    },
                );
                return;
            }
        };

        if record.size() > self.max_file_size {
            warn!(
                "Skipping oversized mod: {} ({:.1}MB)",
                record.file_name().to_string_lossy(),
                record.size() as f64 / BYTES_PER_MB as f64
            );
            catalog.skip(
                record.path().to_path_buf(),
                SkipReason::Oversized {
                    size: record.size(),
                    limit: self.max_file_size,
                },
            );
            return;
        }

        debug!("Found mod: {} ({}, {} bytes)", record.name(), record.kind(), record.size());
        catalog.push(record);
    }

    /// Checks the record against the file system. Any mismatch or missing
    /// file yields `false`.
    pub fn validate(&self, record: &ModRecord) -> bool {
        let metadata = match fs::metadata(record.path()) {
            Ok(metadata) if metadata.is_file() => metadata,
            Ok(_) | Err(_) => {
                error!("Mod file missing: {}", record.path().display());
                return false;
            }
        };

        if metadata.len() != record.size() {
            error!(
                "Mod file size mismatch: {} ({} -> {})",
                record.path().display(),
                record.size(),
                metadata.len()
            );
            return false;
        }

        let cached = match record.checksum() {
            Ok(checksum) => checksum,
            Err(e) => {
                error!("Failed to hash {}: {}", record.path().display(), e);
                return false;
            }
        };
        match record.recompute_checksum() {
            Ok(current) if current == cached => true,
            Ok(current) => {
                error!(
                    "Mod file hash mismatch: {} ({:08X} -> {:08X})",
                    record.path().display(),
                    cached,
                    current
                );
                false
            }
            Err(e) => {
                error!("Failed to hash {}: {}", record.path().display(), e);
                false
            }
        }
    }
}
