use std::{
    collections::BTreeMap,
    ffi::OsStr,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use serde::Serialize;

use crate::{
    classifier::{classify, validate_script_placement, ModKind},
    error::{OrganizerError, Result},
    hasher,
};

/// Anything that can be placed in the load order.
pub trait ModEntry {
    fn mod_path(&self) -> &Path;

    fn kind(&self) -> ModKind {
        classify(self.mod_path())
    }

    /// Lower-cased file stem used for alphabetical ordering.
    fn sort_key(&self) -> String {
        self.mod_path()
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }
}

impl ModEntry for Path {
    fn mod_path(&self) -> &Path {
        self
    }
}

impl ModEntry for PathBuf {
    fn mod_path(&self) -> &Path {
        self.as_path()
    }
}

impl<T: ModEntry + ?Sized> ModEntry for &T {
    fn mod_path(&self) -> &Path {
        (**self).mod_path()
    }

    fn kind(&self) -> ModKind {
        (**self).kind()
    }

    fn sort_key(&self) -> String {
        (**self).sort_key()
    }
}

/// A discovered mod file. The size is captured once; staleness is only
/// detected through explicit validation.
#[derive(Debug)]
pub struct ModRecord {
    path: PathBuf,
    name: String,
    extension: String,
    size: u64,
    kind: ModKind,
    checksum: OnceLock<u32>,
}

impl ModRecord {
    pub fn new(path: impl AsRef<Path>) -> Result<ModRecord> {
        let path = std::path::absolute(path.as_ref())?;
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(OrganizerError::MissingFile(path))
            }
            Err(e) => return Err(e.into()),
        };

        let kind = classify(&path);
        if !kind.is_recognized() {
            let extension = path
                .extension()
                .map(|ext| format!(".{}", ext.to_string_lossy()))
                .unwrap_or_default();
            return Err(OrganizerError::InvalidType(extension));
        }
        if !metadata.is_file() {
            return Err(OrganizerError::NotAFile(path));
        }

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        Ok(ModRecord {
            path,
            name,
            extension,
            size: metadata.len(),
            kind,
            checksum: OnceLock::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file_name(&self) -> &OsStr {
        self.path.file_name().unwrap_or(self.path.as_os_str())
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn kind(&self) -> ModKind {
        self.kind
    }

    /// Memoized checksum. The file is read at most once per record.
    pub fn checksum(&self) -> std::io::Result<u32> {
        if let Some(checksum) = self.checksum.get() {
            return Ok(*checksum);
        }
        let computed = hasher::checksum_file(&self.path)?;
        Ok(*self.checksum.get_or_init(|| computed))
    }

    pub fn cached_checksum(&self) -> Option<u32> {
        self.checksum.get().copied()
    }

    /// Reads the file again, ignoring and leaving the cache untouched.
    pub fn recompute_checksum(&self) -> std::io::Result<u32> {
        hasher::checksum_file(&self.path)
    }
}

impl ModEntry for ModRecord {
    fn mod_path(&self) -> &Path {
        &self.path
    }

    fn kind(&self) -> ModKind {
        self.kind
    }

    fn sort_key(&self) -> String {
        self.name.to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    Oversized { size: u64, limit: u64 },
    Unreadable { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Records of one scan, bucketed by kind in traversal order.
#[derive(Debug)]
pub struct Catalog {
    buckets: BTreeMap<ModKind, Vec<ModRecord>>,
    skipped: Vec<SkippedFile>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Catalog {
        Catalog {
            buckets: ModKind::RECOGNIZED
                .iter()
                .map(|kind| (*kind, Vec::new()))
                .collect(),
            skipped: Vec::new(),
        }
    }

    pub fn push(&mut self, record: ModRecord) {
        self.buckets.entry(record.kind()).or_default().push(record);
    }

    pub fn skip(&mut self, path: PathBuf, reason: SkipReason) {
        self.skipped.push(SkippedFile { path, reason });
    }

    pub fn records(&self, kind: ModKind) -> &[ModRecord] {
        self.buckets.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn kinds(&self) -> impl Iterator<Item = (ModKind, &[ModRecord])> {
        self.buckets
            .iter()
            .map(|(kind, records)| (*kind, records.as_slice()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModRecord> {
        self.buckets.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    /// Script mods sitting in a subfolder of `mods_root`.
    pub fn misplaced_scripts(&self, mods_root: &Path) -> Vec<&ModRecord> {
        self.records(ModKind::Script)
            .iter()
            .filter(|record| !validate_script_placement(record.path(), mods_root))
            .collect()
    }

    pub fn into_records(self) -> Vec<ModRecord> {
        self.buckets.into_values().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_record_metadata() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Cool Hair.PACKAGE");
        fs::write(&path, b"DBPF-ish bytes").unwrap();

        let record = ModRecord::new(&path).unwrap();
        assert_eq!(record.name(), "Cool Hair");
        assert_eq!(record.extension(), "package");
        assert_eq!(record.size(), 14);
        assert_eq!(record.kind(), ModKind::Package);
        assert!(record.path().is_absolute());
        assert_eq!(record.cached_checksum(), None);
    }

    #[test]
    fn test_record_invalid_type() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("readme.txt");
        fs::write(&path, b"hello").unwrap();

        let err = ModRecord::new(&path).unwrap_err();
        assert!(matches!(err, OrganizerError::InvalidType(ref ext) if ext == ".txt"));
    }

    #[test]
    fn test_record_missing_file() {
        let dir = tempdir().unwrap();
        let err = ModRecord::new(dir.path().join("gone.package")).unwrap_err();
        assert!(matches!(err, OrganizerError::MissingFile(_)));
    }

    #[test]
    fn test_record_directory_is_not_a_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("folder.package");
        fs::create_dir(&path).unwrap();
        let err = ModRecord::new(&path).unwrap_err();
        assert!(matches!(err, OrganizerError::NotAFile(_)));
    }

    #[test]
    fn test_checksum_is_memoized() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mod.package");
        fs::write(&path, b"123456789").unwrap();

        let record = ModRecord::new(&path).unwrap();
        let first = record.checksum().unwrap();
        assert_eq!(first, 0xCBF4_3926);
        assert_eq!(record.cached_checksum(), Some(first));

        fs::write(&path, b"987654321").unwrap();
        assert_eq!(record.checksum().unwrap(), first);
        assert_ne!(record.recompute_checksum().unwrap(), first);
        assert_eq!(record.cached_checksum(), Some(first));
    }

    #[test]
    fn test_path_entries_classify_from_extension() {
        let path = PathBuf::from("/mods/Zebra.TS4SCRIPT");
        assert_eq!(path.kind(), ModKind::Script);
        assert_eq!(path.sort_key(), "zebra");
    }

    #[test]
    fn test_catalog_buckets_and_misplaced_scripts() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("Scripts");
        fs::create_dir(&nested).unwrap();
        for path in [
            dir.path().join("root.ts4script"),
            nested.join("deep.ts4script"),
            nested.join("hair.package"),
        ] {
            fs::write(&path, b"x").unwrap();
        }

        let mut catalog = Catalog::new();
        assert!(catalog.is_empty());
        catalog.push(ModRecord::new(dir.path().join("root.ts4script")).unwrap());
        catalog.push(ModRecord::new(nested.join("deep.ts4script")).unwrap());
        catalog.push(ModRecord::new(nested.join("hair.package")).unwrap());

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.records(ModKind::Script).len(), 2);
        assert_eq!(catalog.records(ModKind::Package).len(), 1);
        assert!(catalog.records(ModKind::Project).is_empty());

        let root = std::path::absolute(dir.path()).unwrap();
        let misplaced = catalog.misplaced_scripts(&root);
        assert_eq!(misplaced.len(), 1);
        assert_eq!(misplaced[0].name(), "deep");
    }
}
