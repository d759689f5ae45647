use std::process::ExitCode;

use clap::Parser;
use tsesh::{actions, cli, logging};

fn main() -> ExitCode {
    let args = cli::Args::parse();
    logging::init();

    match actions::handle(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("tsesh: {e:#}");
            ExitCode::FAILURE
        }
    }
}
