use std::process::ExitCode;

use clap::Parser;

use crate::cli::app::App;

mod cli;
mod logging;

fn main() -> ExitCode {
    let app = App::parse();
    logging::init(app.verbose);

    match cli::commands::dispatch(app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
