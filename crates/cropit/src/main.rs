// Author: Dustin Pilgrim
// License: MIT

mod cli;
mod config;
mod decode;
mod export;
mod field;
mod logging;
mod paths;
mod print;
mod run;
mod session;

use clap::Parser;

fn main() {
    let args = cli::Args::parse();

    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| paths::default_log_path("cropit.log"));

    if let Err(e) = logging::init_logging(&log_path, args.verbose) {
        // Logging isn't up yet; stderr is all we have.
        eprintln!("cropit: failed to init logging: {e}");
        std::process::exit(1);
    }

    eventline::info!("cropit starting");
    eventline::debug!("verbose={}", args.verbose);
    eventline::debug!("log_path={}", log_path.display());

    let cfg = match config::load(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eventline::error!("{e}");
            eprintln!("cropit: {e}");
            std::process::exit(1);
        }
    };
    eventline::debug!("config: {:?}", cfg);

    if let Err(e) = run::run(args, cfg) {
        eventline::error!("fatal error: {e}");
        eprintln!("cropit: {e}");
        std::process::exit(1);
    }
}
