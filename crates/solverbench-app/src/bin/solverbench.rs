//! Sudoku solver benchmark runner.

use std::process::ExitCode;

use clap::Parser as _;
use solverbench_app::cli::Args;

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let settings = match Args::parse().into_settings() {
        Ok(settings) => settings,
        Err(err) => err.exit(),
    };
    let config = settings.resolve();
    log::info!(
        "starting solverbench {}, output={}",
        solverbench_app::version::build_version(),
        config.output.display()
    );

    match solverbench_app::run(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("solverbench: {err}");
            ExitCode::FAILURE
        }
    }
}
