use std::fmt;
use std::sync::LazyLock;

use super::*;
use regex::Regex;

// Comma separates name from phones on disk, line break separates records
static NAME_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^,\r\n]+$"));
static PHONE_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$"));

fn compiled(re: &'static LazyLock<Result<Regex, regex::Error>>) -> Result<&'static Regex, AppError> {
    re.as_ref().map_err(|e| AppError::Regex(e.clone()))
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Contact {
    pub name: String,
    pub phones: Vec<String>,
}

pub enum ValidationReq {
    __,
}

impl ValidationReq {
    pub fn name_req() -> String {
        "Name must not be empty and must not contain a comma or a line break".to_string()
    }

    pub fn phone_req() -> String {
        "Phone number must contain digits only.".to_string()
    }
}

impl Contact {
    pub fn new(name: String, phone: String) -> Self {
        Contact {
            name,
            phones: vec![phone],
        }
    }

    pub fn has_phone(&self, phone: &str) -> bool {
        self.phones.iter().any(|p| p == phone)
    }

    /// Phones joined for display, in insertion order.
    pub fn phone_list(&self) -> String {
        self.phones.join(", ")
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.phone_list())
    }
}

pub fn validate_name(name: &str) -> Result<bool, AppError> {
    // Must not be empty
    Ok(compiled(&NAME_RE)?.is_match(name))
}

pub fn validate_phone(phone: &str) -> Result<bool, AppError> {
    // Every character must be an ASCII digit
    Ok(compiled(&PHONE_RE)?.is_match(phone))
}

pub fn ensure_valid(name: &str, phone: &str) -> Result<(), AppError> {
    if !validate_name(name)? {
        return Err(AppError::Validation(ValidationReq::name_req()));
    }
    if !validate_phone(phone)? {
        return Err(AppError::Validation(ValidationReq::phone_req()));
    }
    Ok(())
}
