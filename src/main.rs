use std::io;
use std::process::ExitCode;

use clap::Parser;

use image_fetcher::cli::Cli;
use image_fetcher::{logging, runner, UReqFetcher};

fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init_logging(cli.verbose);

    let fetcher = UReqFetcher::with_timeout(cli.timeout());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Per-URL failures are part of a normal run; only setup errors end it.
    match runner::run(&cli.output_dir, fetcher, &cli.urls(), &mut out) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("image-fetcher error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
