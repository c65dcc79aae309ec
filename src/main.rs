use std::sync::Arc;
use std::time::Duration;

use crate::logging::app_config;
use anyhow::Context;
use clap::Parser;
use cli::Cli;
use scrape::{HttpFetcher, InstancesFile, LogSink, StdoutGauge, WebScrapingCheck};

mod cli;
mod logging;
mod schedule;
mod scrape;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // initialize the logger
    log4rs::init_config(app_config(&cli.logfile, cli.loglevel)?)?;
    log::info!("Starting the application!");

    let config = InstancesFile::load(&cli.config)?;
    log::info!(
        "Loaded {} instance(s) from {}",
        config.instances.len(),
        cli.config.display()
    );
    log::info!("Check interval is: {}s", cli.interval);

    // The blocking HTTP client owns a runtime of its own, so it is built and
    // finally dropped here rather than inside the tokio runtime.
    let fetcher = HttpFetcher::new().context("failed to build the HTTP client")?;
    let check = Arc::new(WebScrapingCheck::new(fetcher, LogSink, StdoutGauge));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start the runtime")?;
    runtime.block_on(schedule::run(
        Arc::clone(&check),
        config.instances,
        Duration::from_secs(cli.interval),
        cli.once,
    ));
    drop(runtime);

    log::info!("Stopped");
    Ok(())
}
