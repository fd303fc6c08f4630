pub mod memory;
pub mod txt;

use crate::prelude::{AppError, ContactStore};
use std::fs;
use std::path::Path;

pub use memory::MemStorage;
pub use txt::TxtStorage;

pub const DEFAULT_CONTACTS_FILE: &str = "contacts.txt";

/// How an export ended. An empty store writes nothing and says so.
#[derive(Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Written(usize),
    NothingToWrite,
}

pub trait ContactStorage {
    /// Reads every persisted contact. `NotFound` when nothing has been persisted yet.
    fn load(&self) -> Result<ContactStore, AppError>;

    fn save(&self, store: &ContactStore) -> Result<SaveOutcome, AppError>;

    fn exists(&self) -> bool;

    fn location(&self) -> String;
}

#[derive(Debug)]
pub enum StorageMediums {
    Txt,
    Mem,
}

impl StorageMediums {
    pub fn is_txt(&self) -> bool {
        matches!(self, StorageMediums::Txt)
    }

    pub fn is_mem(&self) -> bool {
        matches!(self, StorageMediums::Mem)
    }

    pub fn is_which(&self) -> &str {
        if self.is_txt() { "txt" } else { "mem" }
    }

    pub fn from(str: &str) -> Result<Self, AppError> {
        match str.to_lowercase().as_str() {
            "txt" => Ok(StorageMediums::Txt),
            "mem" => Ok(StorageMediums::Mem),
            _ => Err(AppError::Validation(format!(
                "Not a recognized storage medium: '{}' (expected txt or mem)",
                str
            ))),
        }
    }
}

pub fn parse_storage_type(
    medium: StorageMediums,
    path: &Path,
) -> Box<dyn ContactStorage> {
    match medium {
        StorageMediums::Txt => Box::new(TxtStorage::new(path)),
        StorageMediums::Mem => Box::new(MemStorage::new()),
    }
}

pub fn create_file_parent(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
