pub mod command;
pub mod interpreter;
pub mod run;
pub mod session;

pub use run::run_app;
