use std::sync::OnceLock;

use regex::Regex;
use sxd_document::Package;
use sxd_xpath::nodeset::Node;
use sxd_xpath::Value;

use super::error::ValueError;

/// Evaluates `xpath` against the HTML `body` and returns the text of the first
/// result.
///
/// `Ok(None)` means nothing usable was selected: an empty node-set, or a first
/// node (in document order) that is not text. Text nodes, attributes and
/// string results count as text; elements, numbers and booleans do not.
pub fn first_text(body: &str, xpath: &str) -> Result<Option<String>, ValueError> {
    let package: Package = sxd_html::parse_html(body);
    let document = package.as_document();

    let value = sxd_xpath::evaluate_xpath(&document, xpath)
        .map_err(|e| ValueError::InvalidXPath(e.to_string()))?;

    let text = match value {
        Value::String(text) => Some(text),
        Value::Nodeset(nodes) => match nodes.document_order_first() {
            Some(Node::Text(text)) => Some(text.text().to_string()),
            Some(Node::Attribute(attribute)) => Some(attribute.value().to_string()),
            _ => None,
        },
        Value::Number(_) | Value::Boolean(_) => None,
    };
    Ok(text)
}

fn non_numeric() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^0-9.\-]+").expect("valid non-numeric pattern"))
}

/// Drops everything but digits, `.` and a leading `-`.
///
/// A minus only survives when it comes before every kept digit, so
/// `test=-100.1` keeps its sign and `5-10` becomes `510`.
pub fn strip_non_numeric(text: &str) -> String {
    let kept = non_numeric().replace_all(text, "");
    let negative = kept.starts_with('-');
    let unsigned: String = kept.chars().filter(|c| *c != '-').collect();
    if negative {
        format!("-{unsigned}")
    } else {
        unsigned
    }
}

pub fn parse_float(text: &str) -> Result<f64, ValueError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| ValueError::NotANumber {
            text: text.to_string(),
        })
}

/// Strips the scraped text down to its number and parses it.
pub fn scraped_number(text: &str) -> Result<f64, ValueError> {
    parse_float(&strip_non_numeric(text))
}
