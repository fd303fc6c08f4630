use crate::prelude::{AppError, ContactStorage, ContactStore, SaveOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Hello,
    Add,
    Change,
    Delete,
    Phone,
    Search,
    All,
    Export,
    Import,
    Help,
    Exit,
}

/// Every accepted keyword, aliases included. Matching is case-insensitive.
pub const KEYWORDS: &[(&str, Command)] = &[
    ("hello", Command::Hello),
    ("add", Command::Add),
    ("change", Command::Change),
    ("delete", Command::Delete),
    ("phone", Command::Phone),
    ("search", Command::Search),
    ("all", Command::All),
    ("export", Command::Export),
    ("import", Command::Import),
    ("help", Command::Help),
    ("?", Command::Help),
    ("exit", Command::Exit),
    ("close", Command::Exit),
];

impl Command {
    pub fn from_keyword(word: &str) -> Option<Self> {
        let word = word.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(keyword, _)| *keyword == word)
            .map(|(_, command)| *command)
    }

    pub fn keyword(&self) -> &'static str {
        KEYWORDS
            .iter()
            .find(|(_, command)| command == self)
            .map_or("", |(keyword, _)| *keyword)
    }

    pub fn params(&self) -> &'static [&'static str] {
        match self {
            Command::Add | Command::Change => &["name", "phone"],
            Command::Delete | Command::Phone => &["name"],
            Command::Search => &["query"],
            _ => &[],
        }
    }

    pub fn usage(&self) -> String {
        let mut usage = self.keyword().to_string();
        for param in self.params() {
            usage.push_str(&format!(" <{}>", param));
        }
        usage
    }

    /// Surplus tokens are ignored, except for the two-value `add`/`change`.
    fn check_arity(&self, args: &[String]) -> Result<(), AppError> {
        let expected = self.params().len();
        if args.len() < expected {
            return Err(AppError::Arity(self.usage()));
        }
        if args.len() > expected && matches!(self, Command::Add | Command::Change) {
            return Err(AppError::Validation(format!(
                "Too many arguments. Usage: {}",
                self.usage()
            )));
        }
        Ok(())
    }
}

/// Splits on whitespace; the first token is lowercased, the rest are kept verbatim.
/// `None` for a blank line.
pub fn parse_input(line: &str) -> Option<(String, Vec<String>)> {
    let mut tokens = line.split_whitespace();
    let keyword = tokens.next()?.to_lowercase();
    Some((keyword, tokens.map(str::to_string).collect()))
}

pub fn help_text() -> String {
    "Available commands:\n\
    - hello                     Greeting\n\
    - add <name> <phone>        Add new contact or new phone to existing\n\
    - change <name> <phone>     Replace all phones for a contact\n\
    - delete <name>             Delete contact\n\
    - phone <name>              Show contact phone(s)\n\
    - search <query>            Search contacts by name\n\
    - all                       Show all contacts\n\
    - import                    Import contacts from the contacts file\n\
    - export                    Export contacts to the contacts file\n\
    - help / ?                  Show this help\n\
    - exit / close              Exit bot (auto export)"
        .to_string()
}

/// Recoverable failures become their message, anything else is returned as is.
fn render(result: Result<String, AppError>) -> Result<String, AppError> {
    match result {
        Ok(message) => Ok(message),
        Err(err) if err.is_recoverable() => {
            tracing::warn!(error = %err, "command failed");
            Ok(err.to_string())
        }
        Err(err) => Err(err),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Terminated,
}

pub struct Interpreter {
    store: ContactStore,
    storage: Box<dyn ContactStorage>,
    state: State,
}

impl Interpreter {
    pub fn new(store: ContactStore, storage: Box<dyn ContactStorage>) -> Self {
        Self {
            store,
            storage,
            state: State::Running,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    pub fn storage(&self) -> &dyn ContactStorage {
        self.storage.as_ref()
    }

    /// Runs one input line. Returns the message to show, or `None` for blank input.
    pub fn execute(&mut self, line: &str) -> Result<Option<String>, AppError> {
        let Some((keyword, args)) = parse_input(line) else {
            return Ok(None);
        };

        let result = match Command::from_keyword(&keyword) {
            Some(command) => {
                tracing::debug!(?command, args = args.len(), "dispatching");
                self.dispatch(command, &args)
            }
            None => Err(AppError::ParseCommand(keyword)),
        };

        render(result).map(Some)
    }

    pub fn dispatch(&mut self, command: Command, args: &[String]) -> Result<String, AppError> {
        command.check_arity(args)?;

        match command {
            Command::Hello => Ok("How can I help you?".to_string()),
            Command::Add => Ok(self.store.add(&args[0], &args[1])?.to_string()),
            Command::Change => Ok(self.store.replace(&args[0], &args[1])?.to_string()),
            Command::Delete => Ok(self.store.remove(&args[0])?.to_string()),
            Command::Phone => self.show_phone(&args[0]),
            Command::Search => Ok(self.search(&args[0])),
            Command::All => Ok(self.show_all()),
            Command::Export => self.export(),
            Command::Import => self.import(),
            Command::Help => Ok(help_text()),
            Command::Exit => self.shutdown(),
        }
    }

    /// Exports, then stops the interpreter. A recoverable export failure is
    /// reported and does not keep the session alive.
    pub fn shutdown(&mut self) -> Result<String, AppError> {
        let exported = render(self.export())?;
        self.state = State::Terminated;
        Ok(format!("{}\nGood bye!", exported))
    }

    /// Merges the persisted contacts into the store. The store is untouched
    /// when loading fails.
    pub fn load_persisted(&mut self) -> Result<usize, AppError> {
        let loaded = self.storage.load()?;
        Ok(self.store.merge(loaded))
    }

    fn show_phone(&self, name: &str) -> Result<String, AppError> {
        let phones = self.store.lookup(name)?;
        Ok(format!("{}'s phone number(s): {}", name, phones.join(", ")))
    }

    fn search(&self, query: &str) -> String {
        let found = self.store.search(query);
        if found.is_empty() {
            return "No matches found.".to_string();
        }

        let mut output = "Search results:".to_string();
        for contact in found {
            output.push_str(&format!("\n- {}", contact));
        }
        output
    }

    fn show_all(&self) -> String {
        if self.store.is_empty() {
            return "No contacts found.".to_string();
        }

        let mut output = "Contact list:".to_string();
        for contact in &self.store {
            output.push_str(&format!("\n- {}", contact));
        }
        output
    }

    fn export(&self) -> Result<String, AppError> {
        match self.storage.save(&self.store)? {
            SaveOutcome::Written(total) => Ok(format!(
                "Exported {} contact(s) to {}.",
                total,
                self.storage.location()
            )),
            SaveOutcome::NothingToWrite => Ok("No contacts to export.".to_string()),
        }
    }

    fn import(&mut self) -> Result<String, AppError> {
        let total = self.load_persisted()?;
        Ok(format!(
            "Imported {} contact(s) from {}.",
            total,
            self.storage.location()
        ))
    }
}
