use super::extract;
use super::fetch::Fetcher;
use super::instance::Instance;
use super::sink::{CheckLog, Gauge};

/// Scrapes one number from a web page and reports it as a gauge.
///
/// Failures never leave `check`: each one is logged and the call returns.
/// An empty or non-text XPath result may fall back to the instance's
/// `default`; text that is present but not a number may not.
#[derive(Debug)]
pub struct WebScrapingCheck<F, L, G> {
    fetcher: F,
    log: L,
    gauge: G,
}

impl<F, L, G> WebScrapingCheck<F, L, G>
where
    F: Fetcher,
    L: CheckLog,
    G: Gauge,
{
    pub fn new(fetcher: F, log: L, gauge: G) -> Self {
        WebScrapingCheck {
            fetcher,
            log,
            gauge,
        }
    }

    pub fn check(&self, instance: &Instance) {
        let (name, url, xpath) = match instance.required() {
            Ok(fields) => fields,
            Err(missing) => {
                self.log
                    .error(&format!("skipping instance, no {missing} found."));
                return;
            }
        };

        let body = match self.fetcher.get(url) {
            Ok(body) => body,
            Err(e) => {
                self.log
                    .error(&format!("{name} : failed to get website : {e}"));
                return;
            }
        };
        let html = String::from_utf8_lossy(&body);

        let text = match extract::first_text(&html, xpath) {
            Ok(text) => text,
            Err(e) => {
                self.log.error(&format!("{name} : invalid xpath : {e}"));
                return;
            }
        };

        let value = match text {
            Some(text) => match extract::scraped_number(&text) {
                Ok(value) => value,
                Err(e) => {
                    self.log.error(&format!(
                        "{name} : failed to get value (default value used) : {e}"
                    ));
                    return;
                }
            },
            None => {
                self.log
                    .info(&format!("{name} : failed to get value (default value used)"));
                let Some(default) = &instance.default else {
                    return;
                };
                match default.to_number() {
                    Ok(value) => value,
                    Err(e) => {
                        self.log
                            .error(&format!("{name} : invalid default value : {e}"));
                        return;
                    }
                }
            }
        };

        self.log.info(&format!("{name} = {value:.6}"));
        self.gauge.gauge(name, value);
    }
}
