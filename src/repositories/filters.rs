//! Filter fragments for fields whose stored encoding drifted over time.

use mongodb::bson::{doc, Bson, Document};

/// Numeric ids were stored as numbers (any width) or as strings. MongoDB
/// compares numeric types by value, so one numeric variant covers int32,
/// int64 and double.
pub fn id_variants(id: i64) -> Vec<Bson> {
    vec![Bson::Int64(id), Bson::String(id.to_string())]
}

/// Variants tried when looking up an attempt by the id from a request path:
/// the plain number, the 64-bit form and the string the caller sent.
pub fn attempt_id_variants(id: i64, raw: &str) -> Vec<Bson> {
    let mut variants = vec![Bson::Double(id as f64), Bson::Int64(id)];
    let raw = raw.trim();
    variants.push(Bson::String(raw.to_string()));
    if raw != id.to_string() {
        variants.push(Bson::String(id.to_string()));
    }
    variants
}

pub fn any_of(variants: Vec<Bson>) -> Document {
    doc! { "$in": variants }
}

pub fn equals_ignore_case(value: &str) -> Document {
    doc! { "$regex": format!("^{}$", regex::escape(value)), "$options": "i" }
}

pub fn contains_ignore_case(value: &str) -> Document {
    doc! { "$regex": regex::escape(value), "$options": "i" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regex_input_is_escaped() {
        let filter = contains_ignore_case("C++ (2024)");
        assert_eq!(filter.get_str("$regex").unwrap(), r"C\+\+ \(2024\)");
        assert_eq!(filter.get_str("$options").unwrap(), "i");

        let filter = equals_ignore_case("a.b@example.com");
        assert_eq!(filter.get_str("$regex").unwrap(), r"^a\.b@example\.com$");
    }

    #[test]
    fn attempt_id_variants_cover_historical_encodings() {
        let variants = attempt_id_variants(55, "55");
        assert_eq!(
            variants,
            vec![Bson::Double(55.0), Bson::Int64(55), Bson::String("55".to_string())]
        );

        let variants = attempt_id_variants(55, "055");
        assert!(variants.contains(&Bson::String("055".to_string())));
        assert!(variants.contains(&Bson::String("55".to_string())));
    }
}
