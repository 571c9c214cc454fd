use serde_json::{Map, Value};

/// The shapes a loosely-typed record value shows up in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Missing,
    Text(&'a str),
    Number(f64),
    /// Single-value wrapper object: `{ "value": ... }`
    Wrapped(&'a Value),
    List(&'a [Value]),
    Other(&'a Value),
}

impl<'a> From<Option<&'a Value>> for FieldValue<'a> {
    fn from(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => FieldValue::Missing,
            Some(Value::String(s)) => FieldValue::Text(s),
            Some(v @ Value::Number(n)) => match n.as_f64() {
                Some(n) => FieldValue::Number(n),
                None => FieldValue::Other(v),
            },
            Some(Value::Array(items)) => FieldValue::List(items),
            Some(v @ Value::Object(map)) => match map.get("value") {
                Some(inner) => FieldValue::Wrapped(inner),
                None => FieldValue::Other(v),
            },
            Some(other) => FieldValue::Other(other),
        }
    }
}

impl<'a> From<&'a Value> for FieldValue<'a> {
    fn from(value: &'a Value) -> Self {
        FieldValue::from(Some(value))
    }
}

impl<'a> FieldValue<'a> {
    /// First alias carrying a value wins; absent, null and empty-string
    /// entries are skipped.
    pub fn lookup(fields: &'a Map<String, Value>, aliases: &[&str]) -> Self {
        aliases
            .iter()
            .map(|alias| FieldValue::from(fields.get(*alias)))
            .find(|value| !value.is_blank())
            .unwrap_or(FieldValue::Missing)
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, FieldValue::Missing | FieldValue::Text(""))
    }

    /// String extraction: text as-is, numbers and wrapped values
    /// stringified, anything else empty.
    pub fn string(&self) -> String {
        match self {
            FieldValue::Text(s) => s.to_string(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Wrapped(inner) => match inner {
                Value::Null => String::new(),
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
            FieldValue::Missing | FieldValue::List(_) | FieldValue::Other(_) => String::new(),
        }
    }

    /// Numeric extraction, accepting formatted strings such as "93K" or "1.2M".
    pub fn number(&self) -> f64 {
        match self {
            FieldValue::Number(n) if n.is_finite() => *n,
            FieldValue::Text(s) => parse_formatted_number(s),
            _ => 0.0,
        }
    }

    /// Non-negative integer counter.
    pub fn count(&self) -> u64 {
        let n = self.number();
        if n.is_finite() && n > 0.0 {
            n.round() as u64
        } else {
            0
        }
    }

    /// A list contributes its first element; scalars are read as strings.
    pub fn first_string(&self) -> String {
        match self {
            FieldValue::List(items) => items
                .first()
                .map(|item| FieldValue::from(item).string())
                .unwrap_or_default(),
            other => other.string(),
        }
    }

    /// URL of the first entry of an attachment list.
    pub fn attachment_url(&self) -> Option<&'a str> {
        match *self {
            FieldValue::List(items) => items.first()?.get("url")?.as_str(),
            _ => None,
        }
    }
}

/// Parses strings like "850", "93K", "1.2M" or "12,400 views".
///
/// The K/M suffix is detected on the raw string (K takes precedence), then
/// every character other than digits and '.' is dropped and the leading
/// float of the remainder is scaled.
pub fn parse_formatted_number(raw: &str) -> f64 {
    let multiplier = if raw.contains('K') {
        1_000.0
    } else if raw.contains('M') {
        1_000_000.0
    } else {
        1.0
    };

    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    leading_float(&cleaned).map_or(0.0, |n| n * multiplier)
}

// Longest prefix with at most one decimal point.
fn leading_float(digits: &str) -> Option<f64> {
    let end = digits
        .match_indices('.')
        .nth(1)
        .map_or(digits.len(), |(idx, _)| idx);
    digits[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}
