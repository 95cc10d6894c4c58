mod cli;
mod logging;

use std::path::Path;
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use clap::Parser;
use log::info;

use cli::{Cli, Commands};
use reelsort::config::{load_or_generate, write_default_config, Config};
use reelsort::watcher::install_shutdown_handler;
use reelsort::{lookup, EntryOrchestrator, IncomingScanner, Poller, Settings};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result: CliResult = match cli.command {
        Commands::Init { force } => init(&cli.config, force).map_err(Into::into),
        Commands::Check => check(&cli.config).map_err(Into::into),
        Commands::Run { delay, debug } => run(&cli.config, delay, debug, false),
        Commands::Once { debug } => run(&cli.config, None, debug, true),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn init(path: &Path, force: bool) -> reelsort::Result<()> {
    let written = write_default_config(path, force)?;
    println!("Wrote default config to {}", written.display());
    Ok(())
}

fn check(path: &Path) -> reelsort::Result<()> {
    let config = load_or_generate(path)?;
    let settings = Settings::from_config(&config)?;
    println!("{:#?}", settings);
    Ok(())
}

fn run(path: &Path, delay: Option<u64>, debug: bool, once: bool) -> CliResult {
    let mut config: Config = load_or_generate(path)?;
    if let Some(delay) = delay {
        config.delay_time = delay;
    }
    config.debug |= debug;

    logging::init_logger(config.debug)?;
    info!("Starting {}", config.application_name);

    organize(&config, once)?;
    Ok(())
}

fn organize(config: &Config, once: bool) -> reelsort::Result<()> {
    let settings = Settings::from_config(config)?;
    let lookup = lookup::from_settings(&settings);
    let orchestrator = EntryOrchestrator::from_settings(&settings, lookup);
    let scanner = IncomingScanner::new(&settings.incoming_dir);

    if once {
        let poller = Poller::new(
            scanner,
            orchestrator,
            settings.delay_time,
            Arc::new(AtomicBool::new(false)),
        );
        let report = poller.process_cycle()?;
        println!("{}", report);
        return Ok(());
    }

    let shutdown = install_shutdown_handler()?;
    let poller = Poller::new(scanner, orchestrator, settings.delay_time, shutdown);
    poller.run();
    Ok(())
}
