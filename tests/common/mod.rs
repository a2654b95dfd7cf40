use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Mods folder with a handful of files spread over subfolders.
pub fn setup_mods_dir(files: &[(&str, &str)]) -> (TempDir, PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let root = std::path::absolute(tmp.path()).unwrap();
    for (relative, contents) in files {
        write_file(&root.join(relative), contents.as_bytes());
    }
    (tmp, root)
}

pub fn write_file(path: &Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Sparse file of the given length; no data blocks are written.
pub fn sparse_file(path: &Path, len: u64) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let file = fs::File::create(path).unwrap();
    file.set_len(len).unwrap();
}

pub fn file_names<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Vec<String> {
    paths
        .into_iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}
