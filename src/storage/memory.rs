use super::*;
use std::cell::RefCell;

/// Keeps the last export for the lifetime of the process only.
#[derive(Default)]
pub struct MemStorage {
    data: RefCell<Option<ContactStore>>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self {
            data: RefCell::new(None),
        }
    }

    pub fn with_contacts(store: ContactStore) -> Self {
        Self {
            data: RefCell::new(Some(store)),
        }
    }
}

impl ContactStorage for MemStorage {
    fn load(&self) -> Result<ContactStore, AppError> {
        self.data
            .borrow()
            .clone()
            .ok_or_else(|| AppError::NotFound(format!("Storage {}", self.location())))
    }

    fn save(&self, store: &ContactStore) -> Result<SaveOutcome, AppError> {
        if store.is_empty() {
            return Ok(SaveOutcome::NothingToWrite);
        }
        *self.data.borrow_mut() = Some(store.clone());
        Ok(SaveOutcome::Written(store.len()))
    }

    fn exists(&self) -> bool {
        self.data.borrow().is_some()
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
