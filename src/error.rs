//! Error types for scanning and load order operations

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrganizerError {
    #[error("Mod file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("Invalid mod file type: {0}")]
    InvalidType(String),

    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Slot must be 1-999, got {0}")]
    SlotOutOfRange(i64),

    #[error("Slot {slot} already used by: {existing}")]
    SlotTaken { slot: u16, existing: String },

    #[error("Path has no file name: {}", .0.display())]
    NoFileName(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OrganizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_taken_names_existing_category() {
        let err = OrganizerError::SlotTaken {
            slot: 1,
            existing: "ScriptMods".to_string(),
        };
        assert_eq!(err.to_string(), "Slot 1 already used by: ScriptMods");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: OrganizerError = io_err.into();
        assert!(matches!(err, OrganizerError::Io(_)));
    }

    #[test]
    fn test_slot_out_of_range_display() {
        assert_eq!(
            OrganizerError::SlotOutOfRange(1000).to_string(),
            "Slot must be 1-999, got 1000"
        );
    }
}
