//! The binary entry point for the headless Orrery driver.

use std::process::ExitCode;

use clap::Parser;
use orrery_config::CliArgs;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match orrery_app::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("orrery: {e}");
            ExitCode::FAILURE
        }
    }
}
