pub use crate::cli::{
    command,
    interpreter::{self, Command, Interpreter, State},
    run_app,
    session::Session,
};
pub use crate::domain::{
    contact::{self, Contact},
    store::{self, ContactStore, Outcome},
};
pub use crate::errors::AppError;
pub use crate::storage::{
    self, ContactStorage, MemStorage, SaveOutcome, StorageMediums, TxtStorage,
};
