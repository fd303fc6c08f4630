use core::fmt;

#[derive(Debug)]
pub enum AppError {
    Io(std::io::Error),
    Csv(csv::Error),
    Regex(regex::Error),
    NotFound(String),
    Validation(String),
    Arity(String),
    Format {
        line: u64,
        record: String,
        reason: String,
    },
    ParseCommand(String),
}

impl AppError {
    /// User-input mistakes the session reports and survives.
    /// Everything else is an infrastructure fault and ends the session.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::NotFound(_)
                | AppError::Validation(_)
                | AppError::Arity(_)
                | AppError::Format { .. }
                | AppError::ParseCommand(_)
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Csv(err)
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::Regex(err)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => {
                write!(f, "I/O error while accessing a file or resource: {}", e)
            }
            AppError::Csv(e) => {
                write!(f, "Could not read or write contact records: {}", e)
            }
            AppError::Regex(e) => {
                write!(f, "Invalid validation pattern: {}", e)
            }
            AppError::NotFound(item) => {
                write!(f, "{} not found.", item)
            }
            AppError::Validation(msg) => {
                write!(f, "{}", msg)
            }
            AppError::Arity(usage) => {
                write!(f, "Not enough arguments. Usage: {}", usage)
            }
            AppError::Format {
                line,
                record,
                reason,
            } => {
                write!(
                    f,
                    "Malformed record on line {} (\"{}\"): {}",
                    line, record, reason
                )
            }
            AppError::ParseCommand(cmd) => {
                write!(
                    f,
                    "Invalid command '{}'. Type 'help' to see available commands.",
                    cmd
                )
            }
        }
    }
}

impl std::error::Error for AppError {}
