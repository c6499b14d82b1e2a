//! Turning raw provider payloads into [`Recipe`](crate::model::Recipe) records.
//!
//! Every function here is total: a payload that is malformed, truncated or
//! simply empty normalizes to an empty result rather than an error, since the
//! caller can only show a no-results state either way.

pub mod edamam;
pub mod spoonacular;

use scraper::{ElementRef, Html, Node};
use serde_json::Value;

/// Non-empty string field, trimmed
pub(crate) fn str_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Positive whole-number field; accepts floats such as Edamam's `yield: 4.0`
pub(crate) fn count_field(value: &Value, key: &str) -> Option<u32> {
    let n = value.get(key)?;
    let n = n
        .as_u64()
        .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f.round() as u64))?;
    u32::try_from(n).ok().filter(|n| *n > 0)
}

/// List of strings found under `key` in each element of the array at `array_key`
pub(crate) fn string_list(value: &Value, array_key: &str, key: &str) -> Vec<String> {
    value
        .get(array_key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(|item| str_field(item, key)).collect())
        .unwrap_or_default()
}

/// Plain array of strings under `key`
pub(crate) fn plain_strings(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

pub(crate) fn round_to_i64(amount: f64) -> Option<i64> {
    amount.is_finite().then(|| amount.round() as i64)
}

/// Convert an HTML fragment to plain text.
///
/// Tags are dropped, entities decoded and whitespace collapsed; block-level
/// elements become word breaks so list items do not run together.
pub fn html_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut parts = Vec::new();
    collect_text(&fragment.root_element(), &mut parts);
    parts
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn collect_text(element: &ElementRef, parts: &mut Vec<String>) {
    let tag_name = element.value().name().to_lowercase();
    if matches!(tag_name.as_str(), "script" | "style") {
        return;
    }

    let mut current = String::new();
    for child in element.children() {
        match child.value() {
            Node::Text(text) => current.push_str(text),
            Node::Element(el) => {
                if let Some(child_ref) = ElementRef::wrap(child) {
                    if is_block_element(el.name()) {
                        parts.push(std::mem::take(&mut current));
                        collect_text(&child_ref, parts);
                    } else {
                        let mut inline = Vec::new();
                        collect_text(&child_ref, &mut inline);
                        current.push_str(&inline.join(" "));
                    }
                }
            }
            _ => {}
        }
    }
    parts.push(current);
}

fn is_block_element(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "div" | "li" | "ol" | "ul" | "br" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
            | "section" | "article" | "blockquote" | "table" | "tr" | "td"
    )
}

/// Clean an optional HTML field, dropping it if nothing readable remains
pub(crate) fn text_field(value: &Value, key: &str) -> Option<String> {
    str_field(value, key)
        .map(|html| html_to_text(&html))
        .filter(|text| !text.is_empty())
}
