use clap::Parser;
use jeepcode::{app::JeepCodeApp, error::AppError};
use std::{io, process::ExitCode};

fn main() -> ExitCode {
    env_logger::init();
    let args = JeepCodeApp::parse();

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    match args.run(stdin.lock(), &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        // already rendered to stdout
        Err(AppError::Finder(_)) => ExitCode::FAILURE,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
