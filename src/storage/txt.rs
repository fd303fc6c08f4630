use super::*;
use crate::domain::contact::{Contact, validate_name, validate_phone};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, Trim, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;

const PHONE_SEPARATOR: char = '|';

/// One line of the contacts file: `name,phone1|phone2|...`
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedRecord {
    pub name: String,
    pub phones: String,
}

pub struct TxtStorage {
    pub path: PathBuf,
}

impl TxtStorage {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

fn format_error(line: u64, record: String, reason: String) -> AppError {
    AppError::Format {
        line,
        record,
        reason,
    }
}

/// The record as it reads in the file, minus surrounding whitespace.
fn raw_text(record: &StringRecord) -> String {
    record.iter().collect::<Vec<&str>>().join(",")
}

/// Refuses anything that would not read back as the same contact.
pub fn encode_record(contact: &Contact) -> Result<PersistedRecord, AppError> {
    let text = || {
        format!(
            "{},{}",
            contact.name,
            contact.phones.join(&PHONE_SEPARATOR.to_string())
        )
    };
    if !validate_name(&contact.name)? {
        return Err(format_error(
            0,
            text(),
            format!("name '{}' cannot be stored as a record", contact.name),
        ));
    }
    if contact.phones.is_empty() {
        return Err(format_error(
            0,
            text(),
            format!("contact '{}' has no phone to store", contact.name),
        ));
    }
    for phone in &contact.phones {
        if !validate_phone(phone)? {
            return Err(format_error(
                0,
                text(),
                format!("phone '{}' of '{}' is not digits only", phone, contact.name),
            ));
        }
    }

    Ok(PersistedRecord {
        name: contact.name.clone(),
        phones: contact.phones.join(&PHONE_SEPARATOR.to_string()),
    })
}

pub fn decode_record(record: &StringRecord, line: u64) -> Result<Contact, AppError> {
    let bad = |reason: String| format_error(line, raw_text(record), reason);

    if record.len() < 2 {
        return Err(bad("missing comma between name and phones".to_string()));
    }
    if record.len() > 2 {
        return Err(bad("unexpected comma in phone list".to_string()));
    }

    let raw: PersistedRecord = record.deserialize(None)?;
    if raw.name.is_empty() {
        return Err(bad("empty name".to_string()));
    }

    let mut phones: Vec<String> = Vec::new();
    for phone in raw.phones.split(PHONE_SEPARATOR) {
        if phone.is_empty() {
            return Err(bad("empty phone segment".to_string()));
        }
        if !validate_phone(phone)? {
            return Err(bad(format!("phone '{}' must contain digits only", phone)));
        }
        if phones.iter().any(|p| p == phone) {
            return Err(bad(format!("duplicate phone '{}'", phone)));
        }
        phones.push(phone.to_string());
    }

    Ok(Contact {
        name: raw.name,
        phones,
    })
}

/// Writes one record per contact in store order. Every contact is encoded
/// before the first byte reaches `wtr`.
pub fn encode_contacts<W: Write>(store: &ContactStore, wtr: W) -> Result<usize, AppError> {
    let records = store
        .iter()
        .map(encode_record)
        .collect::<Result<Vec<PersistedRecord>, AppError>>()?;

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(wtr);

    for record in &records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(records.len())
}

/// Parses a whole file into a fresh store. The first malformed line aborts
/// the decode and nothing is returned.
pub fn decode_contacts<R: Read>(rdr: R) -> Result<ContactStore, AppError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(rdr);

    let mut store = ContactStore::new();

    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|err| match err.kind() {
            csv::ErrorKind::Utf8 { pos, .. } => format_error(
                pos.as_ref().map_or(index as u64 + 1, |p| p.line()),
                String::new(),
                "line is not valid UTF-8".to_string(),
            ),
            _ => AppError::Csv(err),
        })?;

        // blank line
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }

        let line = record
            .position()
            .map_or(index as u64 + 1, |pos| pos.line());
        let contact = decode_record(&record, line)?;

        let name = contact.name.clone();
        if store.insert(contact) {
            tracing::warn!(line, name = %name, "duplicate record overwrites an earlier line");
        }
    }

    Ok(store)
}

impl ContactStorage for TxtStorage {
    fn load(&self) -> Result<ContactStore, AppError> {
        if !self.exists() {
            return Err(AppError::NotFound(format!("File {}", self.location())));
        }

        let file = File::open(&self.path)?;
        let store = decode_contacts(file)?;

        tracing::info!(path = %self.path.display(), contacts = store.len(), "contacts loaded");
        Ok(store)
    }

    fn save(&self, store: &ContactStore) -> Result<SaveOutcome, AppError> {
        if store.is_empty() {
            tracing::info!(path = %self.path.display(), "empty store, nothing exported");
            return Ok(SaveOutcome::NothingToWrite);
        }

        // Encode into memory first so a bad record never truncates the file
        let mut data: Vec<u8> = Vec::new();
        let total = encode_contacts(store, &mut data)?;

        create_file_parent(&self.path)?;
        let mut file = File::create(&self.path)?;
        file.write_all(&data)?;

        tracing::info!(path = %self.path.display(), contacts = total, "contacts exported");
        Ok(SaveOutcome::Written(total))
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn sample_store() -> Result<ContactStore, AppError> {
        let mut store = ContactStore::new();
        store.add("Alice", "12345")?;
        store.add("Alice", "67890")?;
        store.add("Bob", "111")?;
        Ok(store)
    }

    #[test]
    fn check_encoded_layout() -> Result<(), AppError> {
        let mut data: Vec<u8> = Vec::new();
        let total = encode_contacts(&sample_store()?, &mut data)?;

        assert_eq!(total, 2);
        assert_eq!(
            String::from_utf8_lossy(&data),
            "Alice,12345|67890\nBob,111\n"
        );
        Ok(())
    }

    #[test]
    fn save_then_load_round_trips_in_order() -> Result<(), AppError> {
        let dir = tempdir()?;
        let storage = TxtStorage::new(&dir.path().join("contacts.txt"));
        let store = sample_store()?;

        assert_eq!(storage.save(&store)?, SaveOutcome::Written(2));

        let loaded = storage.load()?;
        assert_eq!(loaded, store);
        assert_eq!(loaded.lookup("Alice")?, ["12345", "67890"]);
        Ok(())
    }

    #[test]
    fn save_overwrites_previous_file() -> Result<(), AppError> {
        let dir = tempdir()?;
        let path = dir.path().join("contacts.txt");
        fs::write(&path, "Old,999\nOlder,888\n")?;

        let storage = TxtStorage::new(&path);
        let mut store = ContactStore::new();
        store.add("New", "1")?;
        storage.save(&store)?;

        assert_eq!(fs::read_to_string(&path)?, "New,1\n");
        Ok(())
    }

    #[test]
    fn empty_store_writes_nothing() -> Result<(), AppError> {
        let dir = tempdir()?;
        let path = dir.path().join("contacts.txt");
        let storage = TxtStorage::new(&path);

        assert_eq!(storage.save(&ContactStore::new())?, SaveOutcome::NothingToWrite);
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn save_creates_missing_parent_directory() -> Result<(), AppError> {
        let dir = tempdir()?;
        let path = dir.path().join("data").join("contacts.txt");
        let storage = TxtStorage::new(&path);

        storage.save(&sample_store()?)?;
        assert!(path.is_file());
        Ok(())
    }

    #[test]
    fn load_missing_file_is_not_found() -> Result<(), AppError> {
        let dir = tempdir()?;
        let storage = TxtStorage::new(&dir.path().join("absent.txt"));

        let err = storage.load().unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(err.is_recoverable());
        Ok(())
    }

    #[test]
    fn decode_skips_blank_lines_and_trims() -> Result<(), AppError> {
        let data = "Alice, 12345|67890 \n\n  \r\nBob,111\r\n";
        let store = decode_contacts(data.as_bytes())?;

        assert_eq!(store.len(), 2);
        assert_eq!(store.lookup("Alice")?, ["12345", "67890"]);
        assert_eq!(store.lookup("Bob")?, ["111"]);
        Ok(())
    }

    #[test]
    fn decode_later_duplicate_name_wins() -> Result<(), AppError> {
        let store = decode_contacts("Alice,1\nBob,2\nAlice,3|4\n".as_bytes())?;

        assert_eq!(store.len(), 2);
        assert_eq!(store.list_all()[0].name, "Alice");
        assert_eq!(store.lookup("Alice")?, ["3", "4"]);
        Ok(())
    }

    #[test]
    fn decode_rejects_missing_comma_with_line_number() {
        let err = decode_contacts("Alice,1\nBob 2\n".as_bytes()).unwrap_err();
        match err {
            AppError::Format {
                line,
                record,
                reason,
            } => {
                assert_eq!(line, 2);
                assert_eq!(record, "Bob 2");
                assert!(reason.contains("missing comma"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn decode_rejects_malformed_phone_lists() {
        for data in ["Alice,\n", "Alice,1||2\n", "Alice,12a\n", "Alice,1|1\n", "Alice,1,2\n", ",123\n"] {
            let err = decode_contacts(data.as_bytes()).unwrap_err();
            assert!(
                matches!(err, AppError::Format { line: 1, .. }),
                "{data:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn encode_rejects_separator_in_name() {
        let contact = Contact::new("Smith,John".to_string(), "1".to_string());
        let err = encode_record(&contact).unwrap_err();
        assert!(matches!(err, AppError::Format { .. }));
    }

    #[test]
    fn malformed_line_is_quoted_in_the_message() {
        let err = decode_contacts("Alice,1
Carol,12a|5
".as_bytes()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Malformed record on line 2 (\"Carol,12a|5\"): phone '12a' must contain digits only"
        );
    }

    #[test]
    fn failed_encode_leaves_file_untouched() -> Result<(), AppError> {
        let dir = tempdir()?;
        let path = dir.path().join("contacts.txt");
        fs::write(&path, "Keep,1\n")?;

        let mut store = ContactStore::new();
        store.insert(Contact::new("Bad,Name".to_string(), "2".to_string()));

        let storage = TxtStorage::new(&path);
        assert!(storage.save(&store).is_err());
        assert_eq!(fs::read_to_string(&path)?, "Keep,1\n");
        Ok(())
    }
}
