use clap::Parser;
use std::path::PathBuf;

use crate::storage::DEFAULT_CONTACTS_FILE;

#[derive(Parser, Debug)]
#[command(name = "assistant-bot", version, about = "Interactive contact assistant")]
pub struct Cli {
    /// Storage choice (txt, mem) are available
    #[arg(long, env = "STORAGE_CHOICE", default_value_t = String::from("txt"))]
    pub storage_choice: String,

    /// Contacts file loaded on start and written on export
    #[arg(long, env = "CONTACTS_FILE", default_value = DEFAULT_CONTACTS_FILE)]
    pub file: PathBuf,

    /// Log filter, e.g. "info" or "assistant_bot=debug"
    #[arg(long, env = "RUST_LOG", default_value_t = String::from("warn"))]
    pub log_level: String,
}
