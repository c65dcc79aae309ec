use chrono::Utc;

/// Where the check writes its human-readable lines.
pub trait CheckLog {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Receives the scraped value.
pub trait Gauge {
    fn gauge(&self, name: &str, value: f64);
}

/// Forwards check messages to the `log` facade, unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl CheckLog for LogSink {
    fn info(&self, message: &str) {
        log::info!(target: "web_scraping", "{message}");
    }

    fn error(&self, message: &str) {
        log::error!(target: "web_scraping", "{message}");
    }
}

/// Prints one exposition-format sample per gauge call: `<name> <value> <ms>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutGauge;

impl StdoutGauge {
    fn sample_line(name: &str, value: f64, timestamp_ms: i64) -> String {
        format!("{name} {value} {timestamp_ms}")
    }
}

impl Gauge for StdoutGauge {
    fn gauge(&self, name: &str, value: f64) {
        println!(
            "{}",
            Self::sample_line(name, value, Utc::now().timestamp_millis())
        );
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_line_is_exposition_format() {
        assert_eq!(
            StdoutGauge::sample_line("test", -100.1, 1_700_000_000_000),
            "test -100.1 1700000000000"
        );
        assert_eq!(StdoutGauge::sample_line("n", 3.0, 1), "n 3 1");
    }
}
