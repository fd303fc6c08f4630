use assistant_bot::prelude::{AppError, run_app};

fn main() -> Result<(), AppError> {
    run_app()
}
