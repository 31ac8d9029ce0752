//! Tolerant decoding for loosely typed historical documents.
//!
//! Each `deserialize_with` helper accepts whatever BSON is stored and turns a
//! value of the wrong shape into `None` (or an empty list) so one bad field
//! never fails the whole document.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use mongodb::bson::Bson;
use serde::{de::DeserializeOwned, Deserialize, Deserializer};

use crate::models::domain::NormalizedId;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Largest distance from the epoch a stored timestamp may have, in ms
/// (100 000 000 days either way).
pub const MAX_TIMESTAMP_MILLIS: i64 = 8_640_000_000_000_000;

pub fn as_string(value: &Bson) -> Option<String> {
    match value {
        Bson::String(s) => Some(s.clone()),
        Bson::Int32(v) => Some(v.to_string()),
        Bson::Int64(v) => Some(v.to_string()),
        Bson::Double(v) if v.is_finite() && v.fract() == 0.0 => Some(format!("{}", *v as i64)),
        Bson::Double(v) => Some(v.to_string()),
        _ => None,
    }
}

pub fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) if v.is_finite() => Some(*v),
        Bson::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Milliseconds since the epoch for a stored timestamp, if it can be read.
/// Naive strings are taken as UTC. Values beyond `MAX_TIMESTAMP_MILLIS` are
/// unreadable.
pub fn timestamp_millis(value: &Bson) -> Option<i64> {
    let millis = match value {
        Bson::DateTime(dt) => Some(dt.timestamp_millis()),
        Bson::Int32(v) => Some(i64::from(*v)),
        Bson::Int64(v) => Some(*v),
        Bson::Double(v) if v.is_finite() => Some(*v as i64),
        Bson::String(s) => parse_timestamp(s.trim()),
        _ => None,
    }?;
    (-MAX_TIMESTAMP_MILLIS..=MAX_TIMESTAMP_MILLIS)
        .contains(&millis)
        .then_some(millis)
}

/// Whether a stored value counts as set: null, `false`, `0`, `NaN` and the
/// empty string do not.
pub fn is_set(value: &Bson) -> bool {
    match value {
        Bson::Null | Bson::Undefined => false,
        Bson::Boolean(b) => *b,
        Bson::Int32(v) => *v != 0,
        Bson::Int64(v) => *v != 0,
        Bson::Double(v) => *v != 0.0 && !v.is_nan(),
        Bson::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Rounds halves toward positive infinity, so `-1.5` becomes `-1`.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn parse_timestamp(raw: &str) -> Option<i64> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

/// Renders a stored value for a JSON response. Datetimes become RFC 3339
/// strings, everything else uses relaxed extended JSON.
pub fn to_json(value: &Bson) -> serde_json::Value {
    match value {
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .map(serde_json::Value::String)
            .unwrap_or(serde_json::Value::Null),
        Bson::ObjectId(oid) => serde_json::Value::String(oid.to_hex()),
        other => other.clone().into_relaxed_extjson(),
    }
}

pub fn opt_to_json(value: Option<&Bson>) -> serde_json::Value {
    value.map(to_json).unwrap_or(serde_json::Value::Null)
}

pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Bson>::deserialize(deserializer)?.as_ref().and_then(as_string))
}

pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(Option::<Bson>::deserialize(deserializer)?.as_ref().and_then(as_number))
}

pub fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(Option::<Bson>::deserialize(deserializer)?
        .as_ref()
        .and_then(as_number)
        .filter(|v| v.fract() == 0.0)
        .map(|v| v as i64))
}

/// Only a stored boolean counts; `"true"` or `1` do not.
pub fn boolean<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(match Option::<Bson>::deserialize(deserializer)? {
        Some(Bson::Boolean(value)) => Some(value),
        _ => None,
    })
}

/// Keeps the elements of an array that decode as `T`; anything that is not an
/// array yields an empty list.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Option::<Bson>::deserialize(deserializer)? {
        Some(Bson::Array(items)) => items
            .into_iter()
            .filter_map(|item| mongodb::bson::from_bson(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

pub fn id_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<NormalizedId>, D::Error> {
    Ok(match Option::<Bson>::deserialize(deserializer)? {
        Some(Bson::Array(items)) => items.iter().map(NormalizedId::from_bson).collect(),
        _ => Vec::new(),
    })
}
