//! Type coercion for untrusted depiction JSON.
//!
//! Depictions are attacker-influenced, so no view constructor reads a field
//! directly from the document. Every access goes through this module, which
//! checks a raw `serde_json::Value` against an expected semantic type and
//! yields the value, an absence, a default, or a validation error.

use serde_json::Value;
use url::Url;

use crate::error::{Error, Result};

/// Semantic types a depiction field can be checked against.
///
/// `Color` is deliberately permissive: any string passes, and the value is
/// neutralized at render time instead of rejected at parse time. `Url`
/// requires an absolute http(s) URL; `UrlExtended` additionally accepts the
/// reserved in-app pseudo-schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    String,
    Number,
    Boolean,
    Array,
    Object,
    Color,
    Url,
    UrlExtended,
}

impl Expected {
    pub fn name(self) -> &'static str {
        match self {
            Expected::String => "string",
            Expected::Number => "number",
            Expected::Boolean => "boolean",
            Expected::Array => "array",
            Expected::Object => "object",
            Expected::Color => "color",
            Expected::Url => "url",
            Expected::UrlExtended => "urlExtended",
        }
    }
}

/// JSON type name of a value, for error messages
pub fn type_name(value: Option<&Value>) -> &'static str {
    match value {
        None => "nothing",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

/// Whether `string` parses as an absolute http(s) URL
pub fn is_valid_http_url(string: &str) -> bool {
    match Url::parse(string) {
        Ok(url) => url.scheme() == "http" || url.scheme() == "https",
        Err(_) => false,
    }
}

/// Like [`is_valid_http_url`], but also accepting the reserved
/// `depiction-http(s):` and `form-http(s):` pseudo-schemes used for in-app
/// navigation actions.
pub fn is_valid_http_url_extended(string: &str) -> bool {
    match Url::parse(string) {
        Ok(url) => matches!(
            url.scheme(),
            "http" | "https" | "depiction-http" | "depiction-https" | "form-http" | "form-https"
        ),
        Err(_) => false,
    }
}

/// Check a raw value against a semantic type
pub fn is_type(value: &Value, expected: Expected) -> bool {
    match expected {
        Expected::String => value.is_string(),
        Expected::Number => value.is_number(),
        Expected::Boolean => value.is_boolean(),
        Expected::Array => value.is_array(),
        Expected::Object => value.is_object(),
        // Colors are passed through here and sanitized at render time.
        Expected::Color => value.is_string(),
        Expected::Url => value.as_str().is_some_and(is_valid_http_url),
        Expected::UrlExtended => value.as_str().is_some_and(is_valid_http_url_extended),
    }
}

/// The field if it matches, `None` otherwise ("not specified")
pub fn optional<'a>(dict: &'a Value, key: &str, expected: Expected) -> Option<&'a Value> {
    let value = dict.get(key)?;
    if is_type(value, expected) {
        Some(value)
    } else {
        None
    }
}

/// The field if it matches, a validation error otherwise
pub fn guard<'a>(dict: &'a Value, key: &str, expected: Expected) -> Result<&'a Value> {
    let value = dict.get(key);
    match value {
        Some(v) if is_type(v, expected) => Ok(v),
        other => Err(Error::validation(key, expected.name(), type_name(other))),
    }
}

// Typed conveniences. Views use these rather than matching on Value.

pub fn guard_str<'a>(dict: &'a Value, key: &str) -> Result<&'a str> {
    Ok(guard(dict, key, Expected::String)?.as_str().unwrap_or_default())
}

pub fn guard_f64(dict: &Value, key: &str) -> Result<f64> {
    Ok(guard(dict, key, Expected::Number)?.as_f64().unwrap_or_default())
}

pub fn guard_array<'a>(dict: &'a Value, key: &str) -> Result<&'a [Value]> {
    match guard(dict, key, Expected::Array)? {
        Value::Array(items) => Ok(items),
        _ => unreachable!("guard checked the array shape"),
    }
}

pub fn guard_object<'a>(dict: &'a Value, key: &str) -> Result<&'a Value> {
    guard(dict, key, Expected::Object)
}

pub fn guard_url(dict: &Value, key: &str) -> Result<String> {
    Ok(guard(dict, key, Expected::Url)?.as_str().unwrap_or_default().to_string())
}

pub fn guard_url_extended(dict: &Value, key: &str) -> Result<String> {
    Ok(guard(dict, key, Expected::UrlExtended)?
        .as_str()
        .unwrap_or_default()
        .to_string())
}

pub fn opt_str(dict: &Value, key: &str) -> Option<String> {
    optional(dict, key, Expected::String).and_then(Value::as_str).map(str::to_string)
}

pub fn opt_f64(dict: &Value, key: &str) -> Option<f64> {
    optional(dict, key, Expected::Number).and_then(Value::as_f64)
}

pub fn opt_color(dict: &Value, key: &str) -> Option<String> {
    optional(dict, key, Expected::Color).and_then(Value::as_str).map(str::to_string)
}

pub fn opt_url(dict: &Value, key: &str) -> Option<String> {
    optional(dict, key, Expected::Url).and_then(Value::as_str).map(str::to_string)
}

pub fn str_or(dict: &Value, key: &str, default: &str) -> String {
    opt_str(dict, key).unwrap_or_else(|| default.to_string())
}

pub fn f64_or(dict: &Value, key: &str, default: f64) -> f64 {
    opt_f64(dict, key).unwrap_or(default)
}

pub fn bool_or(dict: &Value, key: &str, default: bool) -> bool {
    optional(dict, key, Expected::Boolean)
        .and_then(Value::as_bool)
        .unwrap_or(default)
}

/// Parse a `"{width, height}"` size string into its two components.
///
/// Also used for `"{top, left, bottom, right}"` margin strings via
/// [`parse_insets`]. Returns `None` unless at least two numbers are present.
pub fn parse_size(raw: &str) -> Option<(f64, f64)> {
    let mut parts = components(raw);
    let first = parts.next()?;
    let second = parts.next()?;
    Some((first, second))
}

/// Parse a `"{top, left, bottom, right}"` insets string
pub fn parse_insets(raw: &str) -> Option<(f64, f64, f64, f64)> {
    let mut parts = components(raw);
    Some((parts.next()?, parts.next()?, parts.next()?, parts.next()?))
}

fn components(raw: &str) -> impl Iterator<Item = f64> + '_ {
    raw.trim_matches(|c: char| c == '{' || c == '}' || c.is_whitespace())
        .split(',')
        .filter_map(|part| part.trim().parse::<f64>().ok())
}
