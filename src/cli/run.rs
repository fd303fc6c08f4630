use crate::prelude::{
    AppError, Session,
    command::Cli,
    storage::{StorageMediums, parse_storage_type},
};
use clap::Parser;
use dotenv::dotenv;
use std::io;
use tracing_subscriber::EnvFilter;

pub fn run_app() -> Result<(), AppError> {
    // .env values feed the clap env fallbacks
    dotenv().ok();

    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let medium = StorageMediums::from(&cli.storage_choice)?;
    tracing::info!(
        storage = medium.is_which(),
        file = %cli.file.display(),
        "starting session"
    );

    let storage = parse_storage_type(medium, &cli.file);
    let mut session = Session::new(storage);

    let stdin = io::stdin();
    session.run(stdin.lock(), io::stdout().lock())
}

fn init_logging(directive: &str) {
    let default_level = "warn";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .try_init();
}
