//! Value model shared by every configuration tier.
//!
//! Configuration values are plain `serde_json::Value` trees. A document is a
//! JSON object keyed by option name; lookups are case-sensitive.

use serde_json::{Map, Value};

/// A configuration document: option name to value.
pub type ConfigDocument = Map<String, Value>;

/// Return the elements of `value` if it is an array made only of strings.
pub fn as_string_array(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

/// Parse a `NAME=VALUE` option as supplied on the command line.
///
/// `VALUE` is read as JSON when it parses (`true`, `10`, `["a"]`), otherwise
/// it is kept as a plain string so URLs and paths need no quoting.
pub fn parse_option(raw: &str) -> Result<(String, Value), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    if name.is_empty() {
        return Err(format!("option name is empty in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((name.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_array_accepts_strings_only() {
        assert_eq!(
            as_string_array(&json!(["a", "b"])),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(as_string_array(&json!([])), Some(vec![]));
        assert_eq!(as_string_array(&json!(["a", 1])), None);
        assert_eq!(as_string_array(&json!("a")), None);
    }

    #[test]
    fn test_parse_option_json_values() {
        let (name, value) = parse_option("enforce_root_files=true").unwrap();
        assert_eq!(name, "enforce_root_files");
        assert_eq!(value, json!(true));
        assert_eq!(parse_option("settle=20").unwrap().1, json!(20));
        assert_eq!(parse_option("root_files=[\".hg\"]").unwrap().1, json!([".hg"]));
    }

    #[test]
    fn test_parse_option_falls_back_to_string() {
        let (name, value) = parse_option("troubleshooting_url=https://example.com/help").unwrap();
        assert_eq!(name, "troubleshooting_url");
        assert_eq!(value, json!("https://example.com/help"));

        // Only the first '=' splits
        assert_eq!(parse_option("k=a=b").unwrap().1, json!("a=b"));
    }

    #[test]
    fn test_parse_option_rejects_malformed() {
        assert!(parse_option("no-equals").is_err());
        assert!(parse_option("=value").is_err());
    }
}
