use std::path::PathBuf;

use clap::Parser;
use clap::ValueHint;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Instances file
    ///
    /// YAML file with an `instances` list; each instance needs `name`, `url` and `xpath`,
    /// and may set a `default` value.
    #[arg(short, long, env="WEBSCRAPE_CONFIG", value_hint=ValueHint::FilePath, default_value="conf.d/web_scraping.yaml")]
    pub config: PathBuf,

    /// Check interval
    ///
    /// Seconds between two consecutive runs of every instance.
    #[arg(short, long, env="WEBSCRAPE_INTERVAL", value_hint=ValueHint::Other, default_value="15", value_parser=clap::value_parser!(u64).range(1..))]
    pub interval: u64,

    /// Run every instance once and exit
    #[arg(long)]
    pub once: bool,

    /// Set the logging level
    ///
    /// Set the logging level to use when logging to the log file
    #[arg(short, long, env="LOG_LEVEL", value_hint=ValueHint::Other, default_value="INFO")]
    pub loglevel: log::LevelFilter,

    /// Log file
    #[arg(long, env="WEBSCRAPE_LOGFILE", value_hint=ValueHint::FilePath, default_value="webscrape.log")]
    pub logfile: PathBuf,
}
