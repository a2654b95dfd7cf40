use itertools::Itertools;
use tracing::{debug, warn};

use crate::model::{Catalog, ModRecord};

/// Files with identical size and checksum.
#[derive(Debug)]
pub struct DuplicateGroup<'a> {
    pub checksum: u32,
    pub size: u64,
    pub records: Vec<&'a ModRecord>,
}

/// Groups catalog records sharing the same payload. Only files whose size
/// matches at least one other file are hashed.
pub fn find_duplicates(catalog: &Catalog) -> Vec<DuplicateGroup<'_>> {
    let size_groups = catalog.iter().into_group_map_by(|record| record.size());

    let mut groups: Vec<DuplicateGroup> = size_groups
        .into_iter()
        .filter(|(_, records)| records.len() > 1)
        .flat_map(|(size, records)| {
            records
                .into_iter()
                .filter_map(|record| match record.checksum() {
                    Ok(checksum) => Some((checksum, record)),
                    Err(e) => {
                        warn!("Failed to hash {}: {}", record.path().display(), e);
                        None
                    }
                })
                .into_group_map()
                .into_iter()
                .filter(|(_, records)| records.len() > 1)
                .map(move |(checksum, mut records)| {
                    records.sort_by(|a, b| a.path().cmp(b.path()));
                    DuplicateGroup {
                        checksum,
                        size,
                        records,
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect();

    groups.sort_by(|a, b| a.records[0].path().cmp(b.records[0].path()));
    debug!("Found {} duplicate groups", groups.len());
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::ModScanner;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_finds_identical_payloads() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("Old")).unwrap();
        fs::write(dir.path().join("hair.package"), b"same bytes").unwrap();
        fs::write(dir.path().join("Old/hair copy.package"), b"same bytes").unwrap();
        fs::write(dir.path().join("other.package"), b"diff bytes").unwrap();
        fs::write(dir.path().join("unique.ts4script"), b"script").unwrap();

        let catalog = ModScanner::default().scan(dir.path()).unwrap();
        let groups = find_duplicates(&catalog);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].size, 10);
        assert_eq!(groups[0].checksum, crc32fast::hash(b"same bytes"));
        let mut names: Vec<_> = groups[0].records.iter().map(|r| r.name()).collect();
        names.sort();
        assert_eq!(names, vec!["hair", "hair copy"]);
    }

    #[test]
    fn test_no_duplicates() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.package"), b"a").unwrap();
        fs::write(dir.path().join("b.package"), b"bb").unwrap();

        let catalog = ModScanner::default().scan(dir.path()).unwrap();
        assert!(find_duplicates(&catalog).is_empty());
        assert!(catalog.iter().all(|r| r.cached_checksum().is_none()));
    }
}
