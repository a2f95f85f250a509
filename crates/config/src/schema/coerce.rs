//! Value coercions shared by the full and partial schemas.
//!
//! Each function takes a raw YAML value and returns the normalized value or a
//! human-readable message. Environment overrides always arrive as strings, so
//! every boolean and integer field also accepts its string spelling.

use serde_yaml::Value;
use std::net::IpAddr;

/// Short name of a YAML value's kind, for error messages.
pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_f64() => "a float",
        Value::Number(_) => "an integer",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Parse a boolean-like string. Case-insensitive, surrounding whitespace ignored.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Coerce a string-or-boolean field.
pub(crate) fn boolean(value: &Value) -> Result<bool, String> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => parse_bool(s).ok_or_else(|| {
            format!("must be a boolean (true/false, yes/no, on/off, 1/0), got {s:?}")
        }),
        other => Err(format!("must be a boolean, got {}", describe(other))),
    }
}

/// Coerce a string-or-integer field, rejecting values above `max`.
pub(crate) fn integer(value: &Value, max: u64) -> Result<u64, String> {
    let parsed = match value {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| format!("must be a non-negative integer, got {n}"))?,
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| format!("must be a non-negative integer, got {s:?}"))?,
        other => return Err(format!("must be an integer, got {}", describe(other))),
    };

    if parsed > max {
        return Err(format!("must be at most {max}, got {parsed}"));
    }
    Ok(parsed)
}

/// Require a string value.
pub(crate) fn string(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(format!("must be a string, got {}", describe(other))),
    }
}

/// Require an absolute URL. The input spelling is kept; `url` would otherwise
/// append a slash to bare origins.
pub(crate) fn url(raw: String) -> Result<String, String> {
    let trimmed = raw.trim();
    match url::Url::parse(trimmed) {
        Ok(parsed) if parsed.has_host() => Ok(trimmed.to_string()),
        Ok(_) => Err(format!("must be a URL with a host, got {trimmed:?}")),
        Err(e) => Err(format!("must be a valid URL ({e}), got {trimmed:?}")),
    }
}

/// Remove any trailing slashes.
pub fn strip_trailing_slash(raw: &str) -> String {
    raw.trim_end_matches('/').to_string()
}

/// Require an IPv4 or IPv6 address.
pub(crate) fn ip_address(raw: String) -> Result<String, String> {
    raw.trim()
        .parse::<IpAddr>()
        .map(|_| raw.trim().to_string())
        .map_err(|_| format!("must be an IP address, got {raw:?}"))
}

/// Require an exact character count. The value itself is never echoed.
pub(crate) fn exact_length(raw: String, length: usize) -> Result<String, String> {
    let actual = raw.chars().count();
    if actual == length {
        Ok(raw)
    } else {
        Err(format!(
            "must be exactly {length} characters long, got {actual}"
        ))
    }
}
