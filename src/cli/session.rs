use std::io::{BufRead, Write};

use crate::prelude::{AppError, ContactStorage, ContactStore};

use super::interpreter::{Interpreter, State};

const PROMPT: &str = "Enter a command: ";

pub struct Session {
    interpreter: Interpreter,
}

impl Session {
    pub fn new(storage: Box<dyn ContactStorage>) -> Self {
        Self {
            interpreter: Interpreter::new(ContactStore::new(), storage),
        }
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Imports the persisted contacts if there are any. A malformed file is
    /// reported and the session starts empty.
    pub fn autoload(&mut self) -> Result<Option<String>, AppError> {
        if !self.interpreter.storage().exists() {
            return Ok(None);
        }

        let location = self.interpreter.storage().location();
        match self.interpreter.load_persisted() {
            Ok(total) => Ok(Some(format!(
                "Loaded {} contact(s) from {}.",
                total, location
            ))),
            Err(err) if err.is_recoverable() => {
                tracing::warn!(error = %err, "could not load persisted contacts");
                Ok(Some(format!("Could not load {}: {}", location, err)))
            }
            Err(err) => Err(err),
        }
    }

    /// Read-parse-dispatch-print until `exit`/`close`. End of input closes the
    /// session the same way.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<(), AppError> {
        writeln!(output, "Welcome to the assistant bot!")?;
        if let Some(report) = self.autoload()? {
            writeln!(output, "{}", report)?;
        }

        while self.interpreter.state() == State::Running {
            write!(output, "{}", PROMPT)?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                tracing::debug!("end of input, closing session");
                writeln!(output)?;
                let farewell = self.interpreter.shutdown()?;
                writeln!(output, "{}", farewell)?;
                break;
            }

            if let Some(message) = self.interpreter.execute(&line)? {
                writeln!(output, "{}", message)?;
            }
        }

        Ok(())
    }
}
