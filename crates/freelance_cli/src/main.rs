//! Interactive freelance ledger.
//!
//! # Responsibility
//! - Resolve flags, start logging and open the record store.
//! - Hand stdin/stdout to the menu shell until the user exits.

mod config;
mod menu;
mod prompt;
mod render;

use clap::Parser;
use config::Cli;
use log::error;
use prompt::{PromptError, Prompter};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(err) => {
            eprintln!("freelance: cannot read working directory: {err}");
            return ExitCode::FAILURE;
        }
    };
    let settings = Cli::parse().resolve(&cwd);

    // The ledger stays usable without file logs.
    if let Err(err) = freelance_core::init_logging(
        &settings.log_level,
        &settings.log_dir.to_string_lossy(),
    ) {
        eprintln!("freelance: logging disabled: {err}");
    }

    let conn = match freelance_core::open_db(&settings.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            error!("event=db_open module=cli status=error error={err}");
            eprintln!(
                "freelance: cannot open {}: {err}",
                settings.db_path.display()
            );
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompt = Prompter::new(stdin.lock(), stdout.lock());
    match menu::run(&conn, &mut prompt) {
        Ok(()) | Err(PromptError::Closed) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=shell_abort module=cli status=error error={err}");
            eprintln!("freelance: {err}");
            ExitCode::FAILURE
        }
    }
}
