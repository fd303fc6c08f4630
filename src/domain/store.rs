use std::fmt;

use super::*;
use super::contact::ensure_valid;

/// Result of a successful store mutation, rendered as the user-facing message.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Added { name: String, phone: String },
    PhoneAppended { name: String, phone: String },
    PhoneExists { name: String },
    Replaced { name: String, phone: String },
    Removed { name: String },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Added { name, phone } => {
                write!(f, "Contact '{}' added with phone '{}'.", name, phone)
            }
            Outcome::PhoneAppended { name, phone } => {
                write!(f, "New phone added to '{}': {}", name, phone)
            }
            Outcome::PhoneExists { name } => {
                write!(f, "This phone number already exists for '{}'.", name)
            }
            Outcome::Replaced { name, phone } => {
                write!(f, "Contact '{}' updated with new phone '{}'.", name, phone)
            }
            Outcome::Removed { name } => write!(f, "Contact '{}' deleted.", name),
        }
    }
}

/// Contacts keyed by name, kept in insertion order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContactStore {
    contacts: Vec<Contact>,
}

impl ContactStore {
    pub fn new() -> Self {
        Self {
            contacts: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Contact> {
        self.contacts.iter()
    }

    fn get_index_by_name(&self, name: &str) -> Option<usize> {
        self.contacts.iter().position(|c| c.name == name)
    }

    pub fn add(&mut self, name: &str, phone: &str) -> Result<Outcome, AppError> {
        ensure_valid(name, phone)?;

        match self.get_index_by_name(name) {
            Some(index) => {
                let contact = &mut self.contacts[index];
                if contact.has_phone(phone) {
                    return Ok(Outcome::PhoneExists {
                        name: name.to_string(),
                    });
                }
                contact.phones.push(phone.to_string());
                Ok(Outcome::PhoneAppended {
                    name: name.to_string(),
                    phone: phone.to_string(),
                })
            }
            None => {
                self.contacts
                    .push(Contact::new(name.to_string(), phone.to_string()));
                Ok(Outcome::Added {
                    name: name.to_string(),
                    phone: phone.to_string(),
                })
            }
        }
    }

    /// Discards every phone the contact had and keeps only `phone`.
    pub fn replace(&mut self, name: &str, phone: &str) -> Result<Outcome, AppError> {
        ensure_valid(name, phone)?;

        let index = self
            .get_index_by_name(name)
            .ok_or_else(|| AppError::NotFound("Contact".to_string()))?;

        self.contacts[index].phones = vec![phone.to_string()];
        Ok(Outcome::Replaced {
            name: name.to_string(),
            phone: phone.to_string(),
        })
    }

    pub fn remove(&mut self, name: &str) -> Result<Outcome, AppError> {
        let index = self
            .get_index_by_name(name)
            .ok_or_else(|| AppError::NotFound("Contact".to_string()))?;

        let removed = self.contacts.remove(index);
        Ok(Outcome::Removed { name: removed.name })
    }

    pub fn lookup(&self, name: &str) -> Result<&[String], AppError> {
        self.contacts
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.phones.as_slice())
            .ok_or_else(|| AppError::NotFound("Contact".to_string()))
    }

    pub fn search(&self, query: &str) -> Vec<&Contact> {
        let query = query.to_lowercase();
        self.contacts
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&query))
            .collect()
    }

    pub fn list_all(&self) -> &[Contact] {
        &self.contacts
    }

    /// Overwrites the phones of an existing name in place, otherwise appends.
    /// Returns true when an existing entry was overwritten.
    pub fn insert(&mut self, contact: Contact) -> bool {
        match self.get_index_by_name(&contact.name) {
            Some(index) => {
                self.contacts[index] = contact;
                true
            }
            None => {
                self.contacts.push(contact);
                false
            }
        }
    }

    /// Folds `other` into this store with `insert` semantics.
    /// Returns how many contacts were taken from `other`.
    pub fn merge(&mut self, other: ContactStore) -> usize {
        let total = other.len();
        for contact in other.contacts {
            self.insert(contact);
        }
        total
    }
}

impl<'a> IntoIterator for &'a ContactStore {
    type Item = &'a Contact;
    type IntoIter = std::slice::Iter<'a, Contact>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
