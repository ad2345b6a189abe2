use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Placeholder strings providers use for "no value".
pub const MISSING_MARKERS: [&str; 4] = ["N/A", "정보 없음", "", "null"];

/// Unit suffixes stripped before numeric conversion.
pub const UNIT_SUFFIXES: [&str; 4] = ["°C", "℃", "m/s", "%"];

/// True when the raw value is one of the provider "no value" markers.
pub fn is_missing(raw: &str) -> bool {
    let trimmed = raw.trim();
    MISSING_MARKERS.iter().any(|marker| trimmed.eq_ignore_ascii_case(marker))
}

/// Remove any trailing unit suffixes, e.g. `"2.5m/s"` -> `"2.5"`.
pub fn strip_units(raw: &str) -> &str {
    let mut value = raw.trim();
    while let Some(stripped) = UNIT_SUFFIXES
        .iter()
        .find_map(|suffix| value.strip_suffix(suffix))
    {
        value = stripped.trim_end();
    }
    value
}

/// Parse a unit-suffixed numeric string. Missing markers, unparsable text
/// and non-finite results all come back as `None`.
pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    if is_missing(raw) {
        return None;
    }
    strip_units(raw)
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// A display string with missing markers collapsed to `None`.
pub fn clean_label(raw: Option<&str>) -> Option<String> {
    raw.filter(|value| !is_missing(value))
        .map(|value| value.trim().to_string())
}

/// Deserialize a JSON string, number or null into `Option<String>`.
///
/// Providers are inconsistent about quoting numbers (`"5°C"` vs `5`), so
/// record fields accept either and keep the textual form.
pub fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}
