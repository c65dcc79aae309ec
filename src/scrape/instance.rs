use std::fmt;
use std::path::Path;

use anyhow::Context;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

use super::error::ValueError;
use super::extract::parse_float;

/// One configured scrape target.
///
/// Every key is optional here; `required` decides what is missing so the
/// check can report it.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Instance {
    #[serde(default, deserialize_with = "scalar_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub xpath: Option<String>,
    pub default: Option<DefaultValue>,
}

/// Accepts any YAML scalar as text, so `name: 123` names the metric `123`.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a scalar, found {}",
            yaml_text(&other)
        ))),
    }
}

fn yaml_text(value: &Value) -> String {
    serde_yaml::to_string(value)
        .map(|text| text.trim_end().to_string())
        .unwrap_or_else(|_| format!("{value:?}"))
}

#[cfg(test)]
impl Instance {
    pub fn new(name: &str, url: &str, xpath: &str) -> Instance {
        Instance {
            name: Some(name.to_string()),
            url: Some(url.to_string()),
            xpath: Some(xpath.to_string()),
            default: None,
        }
    }

    pub fn with_default(mut self, default: DefaultValue) -> Instance {
        self.default = Some(default);
        self
    }
}

impl Instance {
    /// Returns `(name, url, xpath)`, or the first missing key in that order.
    pub fn required(&self) -> Result<(&str, &str, &str), &'static str> {
        let name = self.name.as_deref().ok_or("name")?;
        let url = self.url.as_deref().ok_or("url")?;
        let xpath = self.xpath.as_deref().ok_or("xpath")?;
        Ok((name, url, xpath))
    }
}

/// The `default` key as written in the config.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DefaultValue {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    /// Lists and maps; kept so the check can reject them on its own.
    Other(Value),
}

impl DefaultValue {
    /// Numeric defaults go through the same text parse as scraped values.
    pub fn to_number(&self) -> Result<f64, ValueError> {
        parse_float(&self.to_string())
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Integer(value) => write!(f, "{value}"),
            DefaultValue::Float(value) => write!(f, "{value}"),
            DefaultValue::Bool(value) => write!(f, "{value}"),
            DefaultValue::Text(value) => f.write_str(value),
            DefaultValue::Other(value) => f.write_str(&yaml_text(value)),
        }
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        DefaultValue::Text(value.to_string())
    }
}

/// The check's config file: an ignored `init_config` block and a list of
/// instances.
///
/// An instance that does not deserialize is logged and left out; the others
/// still load.
#[derive(Debug, Default)]
pub struct InstancesFile {
    pub instances: Vec<Instance>,
}

#[derive(Debug, Default, Deserialize)]
struct RawInstancesFile {
    #[serde(default)]
    instances: Vec<Value>,
}

impl InstancesFile {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<InstancesFile> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<InstancesFile> {
        // An empty document deserializes to unit, not to a mapping.
        if content.trim().is_empty() {
            return Ok(InstancesFile::default());
        }
        let raw: RawInstancesFile = serde_yaml::from_str(content)?;

        let instances = raw
            .instances
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_yaml::from_value(value) {
                Ok(instance) => Some(instance),
                Err(e) => {
                    log::error!("skipping instance #{index}, invalid configuration: {e}");
                    None
                }
            })
            .collect();
        Ok(InstancesFile { instances })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn required_reports_first_missing_key() {
        let mut instance = Instance::default();
        assert_eq!(instance.required(), Err("name"));

        instance.xpath = Some("//p".to_string());
        assert_eq!(instance.required(), Err("name"));

        instance.name = Some("test".to_string());
        assert_eq!(instance.required(), Err("url"));

        instance.url = Some("http://example.com".to_string());
        assert_eq!(instance.required(), Ok(("test", "http://example.com", "//p")));
    }

    #[test]
    fn parses_agent_style_config() {
        let file = InstancesFile::parse(
            r#"
init_config:

instances:
  - name: visitors
    url: http://example.com/stats
    xpath: //*[@id="visitors"]/text()
    default: 0
  - name: price
    url: http://example.com/price
    xpath: //span/text()
    default: "12.5"
    tags: [ignored]
  - url: http://example.com
"#,
        )
        .unwrap();

        assert_eq!(file.instances.len(), 3);
        assert_eq!(
            file.instances[0],
            Instance::new("visitors", "http://example.com/stats", r#"//*[@id="visitors"]/text()"#)
                .with_default(DefaultValue::Integer(0))
        );
        assert_eq!(file.instances[1].default, Some(DefaultValue::from("12.5")));
        assert_eq!(file.instances[2].required(), Err("name"));
    }

    #[test]
    fn one_bad_instance_does_not_hide_the_others() {
        let file = InstancesFile::parse(
            r#"
instances:
  - name: [not, a, name]
    url: http://example.com/a
    xpath: //a/text()
  - name: 123
    url: http://example.com/b
    xpath: //b/text()
    default: [1]
  - name: ok
    url: http://example.com/c
    xpath: //c/text()
"#,
        )
        .unwrap();

        assert_eq!(file.instances.len(), 2);
        assert_eq!(
            file.instances[0].required(),
            Ok(("123", "http://example.com/b", "//b/text()"))
        );
        let default = file.instances[0].default.as_ref().unwrap();
        assert!(matches!(default, DefaultValue::Other(_)));
        assert_eq!(
            default.to_number().unwrap_err().to_string(),
            "could not convert string to float: - 1"
        );
        assert_eq!(file.instances[1].name.as_deref(), Some("ok"));
    }

    #[test]
    fn null_default_is_absent() {
        let file = InstancesFile::parse("instances:\n  - name: a\n    default:\n").unwrap();
        assert_eq!(file.instances[0].default, None);
    }

    #[test]
    fn empty_config_has_no_instances() {
        assert!(InstancesFile::parse("").unwrap().instances.is_empty());
        assert!(InstancesFile::parse("init_config:\n").unwrap().instances.is_empty());
    }

    #[test]
    fn defaults_parse_as_text() {
        assert_eq!(DefaultValue::from("100.2").to_number(), Ok(100.2));
        assert_eq!(DefaultValue::from(" 7 ").to_number(), Ok(7.0));
        assert_eq!(DefaultValue::Integer(-3).to_number(), Ok(-3.0));
        assert_eq!(DefaultValue::Float(0.5).to_number(), Ok(0.5));
        assert_eq!(
            DefaultValue::Bool(true).to_number(),
            Err(ValueError::NotANumber {
                text: "true".to_string()
            })
        );
        assert_eq!(
            DefaultValue::from("invalid").to_number().unwrap_err().to_string(),
            "could not convert string to float: invalid"
        );
    }

    #[test]
    fn load_reads_file_and_names_it_in_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "instances:\n  - name: a\n    url: http://a\n    xpath: //a").unwrap();
        let loaded = InstancesFile::load(file.path()).unwrap();
        assert_eq!(loaded.instances[0].required(), Ok(("a", "http://a", "//a")));

        let missing = InstancesFile::load("/nonexistent/web_scraping.yaml").unwrap_err();
        assert!(format!("{missing:#}").contains("/nonexistent/web_scraping.yaml"));

        let mut broken = tempfile::NamedTempFile::new().unwrap();
        writeln!(broken, "instances: [").unwrap();
        let err = InstancesFile::load(broken.path()).unwrap_err();
        assert!(err.to_string().starts_with("invalid config file"));
    }
}
