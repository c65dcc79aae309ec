mod check;
pub use self::check::WebScrapingCheck;

mod error;
#[cfg(test)]
pub use self::error::FetchError;

mod extract;

mod fetch;
pub use self::fetch::Fetcher;
pub use self::fetch::HttpFetcher;

mod instance;
pub use self::instance::Instance;
pub use self::instance::InstancesFile;

mod sink;
pub use self::sink::CheckLog;
pub use self::sink::Gauge;
pub use self::sink::LogSink;
pub use self::sink::StdoutGauge;
#[cfg(test)]
pub(crate) use self::sink::recording::{RecordingGauge, RecordingLog};
