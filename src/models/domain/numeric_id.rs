use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::domain::lenient;

/// An identifier decoded from any of the encodings the store has accumulated
/// for one logical integer: plain numbers, 64-bit wrappers, numeric strings,
/// `{low, high}` documents and `{"$numberLong": ".."}` documents.
///
/// `Unparsed` keeps the original value for display. It never matches another
/// id, including another `Unparsed` holding the same value.
#[derive(Clone, Debug, PartialEq)]
pub enum NormalizedId {
    Int(i64),
    Unparsed(Bson),
}

impl Default for NormalizedId {
    fn default() -> Self {
        NormalizedId::Unparsed(Bson::Null)
    }
}

impl NormalizedId {
    pub fn from_bson(value: &Bson) -> Self {
        parse_number(value)
            .or_else(|| parse_numeric_string(value))
            .or_else(|| parse_long_wrapper(value))
            .or_else(|| parse_extended_json(value))
            .map(NormalizedId::Int)
            .unwrap_or_else(|| NormalizedId::Unparsed(value.clone()))
    }

    /// Decodes an id supplied in a JSON request body.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match mongodb::bson::to_bson(value) {
            Ok(bson) => Self::from_bson(&bson),
            Err(_) => NormalizedId::Unparsed(Bson::Null),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            NormalizedId::Int(value) => Some(*value),
            NormalizedId::Unparsed(_) => None,
        }
    }

    /// Equality used when aligning ids across records.
    pub fn matches(&self, other: &NormalizedId) -> bool {
        match (self.as_i64(), other.as_i64()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl From<i64> for NormalizedId {
    fn from(value: i64) -> Self {
        NormalizedId::Int(value)
    }
}

impl Serialize for NormalizedId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NormalizedId::Int(value) => serializer.serialize_i64(*value),
            NormalizedId::Unparsed(raw) => lenient::to_json(raw).serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for NormalizedId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Bson::deserialize(deserializer).map(|value| NormalizedId::from_bson(&value))
    }
}

fn integral_f64(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(&value)
    {
        Some(value as i64)
    } else {
        None
    }
}

fn parse_number(value: &Bson) -> Option<i64> {
    match value {
        Bson::Int32(v) => Some(i64::from(*v)),
        Bson::Int64(v) => Some(*v),
        Bson::Double(v) => integral_f64(*v),
        _ => None,
    }
}

fn parse_str(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().and_then(integral_f64))
}

fn parse_numeric_string(value: &Bson) -> Option<i64> {
    match value {
        Bson::String(raw) => parse_str(raw),
        _ => None,
    }
}

fn word(value: Option<&Bson>) -> Option<i32> {
    match value? {
        Bson::Int32(v) => Some(*v),
        Bson::Int64(v) => i32::try_from(*v).ok(),
        Bson::Double(v) => integral_f64(*v).and_then(|v| i32::try_from(v).ok()),
        _ => None,
    }
}

fn parse_long_wrapper(value: &Bson) -> Option<i64> {
    let Bson::Document(doc) = value else {
        return None;
    };
    let low = word(doc.get("low"))?;
    let high = word(doc.get("high"))?;
    Some((i64::from(high) << 32) | i64::from(low as u32))
}

fn parse_extended_json(value: &Bson) -> Option<i64> {
    let Bson::Document(doc) = value else {
        return None;
    };
    number_long(doc)
}

fn number_long(doc: &Document) -> Option<i64> {
    match doc.get("$numberLong")? {
        Bson::String(raw) => parse_str(raw),
        other => parse_number(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn plain_numbers_are_returned_unchanged() {
        assert_eq!(NormalizedId::from_bson(&Bson::Int32(5)), NormalizedId::Int(5));
        assert_eq!(NormalizedId::from_bson(&Bson::Int64(1 << 40)), NormalizedId::Int(1 << 40));
        assert_eq!(NormalizedId::from_bson(&Bson::Double(12.0)), NormalizedId::Int(12));
    }

    #[test]
    fn every_encoding_of_five_is_equivalent() {
        let encodings = [
            Bson::Int32(5),
            Bson::Int64(5),
            Bson::Double(5.0),
            Bson::String("5".to_string()),
            Bson::String("  5 ".to_string()),
            Bson::Document(doc! { "$numberLong": "5" }),
            Bson::Document(doc! { "low": 5, "high": 0 }),
        ];

        for encoding in encodings {
            let id = NormalizedId::from_bson(&encoding);
            assert!(id.matches(&NormalizedId::Int(5)), "{:?} should normalize to 5", encoding);
        }
    }

    #[test]
    fn long_wrapper_combines_high_and_low_words() {
        let value = Bson::Document(doc! { "low": -1, "high": 0 });
        assert_eq!(NormalizedId::from_bson(&value), NormalizedId::Int(u32::MAX as i64));

        let value = Bson::Document(doc! { "low": 0, "high": 1, "unsigned": false });
        assert_eq!(NormalizedId::from_bson(&value), NormalizedId::Int(1 << 32));
    }

    #[test]
    fn unusable_values_fall_through_as_unparsed() {
        let cases = [
            Bson::Null,
            Bson::String(String::new()),
            Bson::String("   ".to_string()),
            Bson::String("abc".to_string()),
            Bson::Double(2.5),
            Bson::Boolean(true),
            Bson::Document(doc! { "$numberLong": "not-a-number" }),
            Bson::Document(doc! { "low": 1 }),
        ];

        for value in cases {
            let id = NormalizedId::from_bson(&value);
            assert_eq!(id, NormalizedId::Unparsed(value.clone()));
            assert!(id.as_i64().is_none());
        }
    }

    #[test]
    fn unparsed_ids_never_match() {
        let a = NormalizedId::from_bson(&Bson::String("abc".to_string()));
        let b = NormalizedId::from_bson(&Bson::String("abc".to_string()));
        assert!(!a.matches(&b));
        assert!(!a.matches(&NormalizedId::Int(0)));
    }

    #[test]
    fn json_request_values_normalize() {
        assert_eq!(NormalizedId::from_json(&serde_json::json!(7)), NormalizedId::Int(7));
        assert_eq!(NormalizedId::from_json(&serde_json::json!("7")), NormalizedId::Int(7));
        assert!(NormalizedId::from_json(&serde_json::json!(null)).as_i64().is_none());
    }

    #[test]
    fn serializes_as_number_or_original_value() {
        assert_eq!(serde_json::to_value(NormalizedId::Int(42)).unwrap(), serde_json::json!(42));
        let raw = NormalizedId::Unparsed(Bson::String("legacy".to_string()));
        assert_eq!(serde_json::to_value(raw).unwrap(), serde_json::json!("legacy"));
    }
}
