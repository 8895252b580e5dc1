// dqaudit-core/src/domain/checks/types.rs
//
// Type validators. Each returns the positions of present values that do not
// conform to the target type; nulls are never judged here.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::domain::dataset::Value;
use crate::domain::rules::SemanticType;

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d", "%m/%d/%Y", "%d %B %Y"];

pub fn invalid_positions(values: &[&Value], ty: SemanticType) -> Vec<usize> {
    let conforms: fn(&Value) -> bool = match ty {
        SemanticType::Int => is_int,
        SemanticType::Float => is_float,
        SemanticType::Bool => is_bool,
        SemanticType::String => is_string,
        SemanticType::Date | SemanticType::Datetime => is_datetime,
    };
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_null() && !conforms(v))
        .map(|(i, _)| i)
        .collect()
}

/// Numeric with no fractional remainder. Numeric text counts.
fn is_int(value: &Value) -> bool {
    value.coerce_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0)
}

fn is_float(value: &Value) -> bool {
    value.coerce_f64().is_some()
}

/// Only a real boolean; 0/1 and "true"/"false" do not qualify.
fn is_bool(value: &Value) -> bool {
    matches!(value, Value::Bool(_))
}

fn is_string(value: &Value) -> bool {
    matches!(value, Value::Text(_))
}

/// Numbers are read as epoch offsets, so they always parse.
fn is_datetime(value: &Value) -> bool {
    match value {
        Value::Timestamp(_) | Value::Int(_) => true,
        Value::Float(f) => f.is_finite(),
        Value::Text(s) => parse_timestamp(s).is_some(),
        Value::Bool(_) | Value::Null => false,
    }
}

/// Permissive calendar parser: RFC 3339 / RFC 2822, then common layouts.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.naive_utc());
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt);
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
