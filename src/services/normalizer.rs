// src/services/normalizer.rs
use serde_json::{Map, Value, json};

/// Fields that may arrive either as a plain label or as a label→percentage
/// distribution the server scored.
const DISTRIBUTION_FIELDS: [(&str, &str, &str); 2] = [
    ("gender", "dominant_gender", "gender_confidence"),
    ("emotion", "dominant_emotion", "emotion_confidence"),
];

/// Derives the dominant gender/emotion from a raw analysis payload.
///
/// Pure transform: returns a new value with `dominant_*` and
/// `*_confidence` keys added for each tracked field that is a mapping.
/// Scalar or absent fields pass through untouched, so a response carrying
/// plain labels (or nothing at all) comes back unchanged.
pub fn normalize(raw: Value) -> Value {
    let source = match raw {
        Value::Object(map) => map,
        other => return other,
    };

    let mut normalized = source.clone();
    for (field, dominant_key, confidence_key) in DISTRIBUTION_FIELDS {
        if let Some(Value::Object(scores)) = source.get(field) {
            if let Some((label, score)) = dominant_entry(scores) {
                normalized.insert(dominant_key.to_string(), json!(label));
                normalized.insert(confidence_key.to_string(), json!(round1(score)));
            }
        }
    }

    Value::Object(normalized)
}

/// First entry with the maximal numeric score, by left fold with strict
/// greater-than: on ties the earliest entry wins. Non-numeric scores are
/// skipped.
fn dominant_entry(scores: &Map<String, Value>) -> Option<(&str, f64)> {
    let mut best: Option<(&str, f64)> = None;
    for (label, value) in scores {
        let Some(score) = value.as_f64() else {
            continue;
        };
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((label.as_str(), score)),
        }
    }
    best
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn derives_dominant_fields_from_distributions() {
        let raw = json!({
            "age": 29,
            "gender": {"man": 82.3, "woman": 17.7},
            "emotion": {"happy": 64.0, "neutral": 36.0}
        });

        let out = normalize(raw);
        assert_eq!(out["dominant_gender"], "man");
        assert_eq!(out["gender_confidence"], 82.3);
        assert_eq!(out["dominant_emotion"], "happy");
        assert_eq!(out["emotion_confidence"], 64.0);
        assert_eq!(out["age"], 29);
    }

    #[test]
    fn unique_maximum_wins_regardless_of_position() {
        let out = normalize(json!({
            "emotion": {"sad": 5.0, "angry": 3.2, "surprise": 88.1, "fear": 3.7}
        }));
        assert_eq!(out["dominant_emotion"], "surprise");
        assert_eq!(out["emotion_confidence"], 88.1);
    }

    #[test]
    fn tie_breaks_to_first_encountered() {
        let raw = json!({"gender": {"woman": 50.0, "man": 50.0}});
        let out = normalize(raw.clone());
        assert_eq!(out["dominant_gender"], "woman");
        // Deterministic across repeated calls on the same input.
        assert_eq!(normalize(raw)["dominant_gender"], "woman");
    }

    #[test]
    fn scalar_fields_pass_through_without_derived_keys() {
        let raw = json!({"age": 42, "gender": "Man", "emotion": "neutral"});
        let out = normalize(raw.clone());
        assert_eq!(out, raw);
        assert!(out.get("dominant_gender").is_none());
        assert!(out.get("gender_confidence").is_none());
    }

    #[test]
    fn absent_fields_degrade_gracefully() {
        let raw = json!({"age": 31});
        assert_eq!(normalize(raw.clone()), raw);
    }

    #[test]
    fn confidence_rounds_to_one_decimal() {
        let out = normalize(json!({"gender": {"man": 66.666, "woman": 33.334}}));
        assert_eq!(out["gender_confidence"], 66.7);
    }

    #[test]
    fn non_numeric_scores_are_skipped() {
        let out = normalize(json!({
            "emotion": {"happy": "n/a", "neutral": 12.0}
        }));
        assert_eq!(out["dominant_emotion"], "neutral");
    }

    #[test]
    fn empty_mapping_produces_no_derived_fields() {
        let out = normalize(json!({"gender": {}}));
        assert!(out.get("dominant_gender").is_none());
    }

    #[test]
    fn non_object_payload_is_identity() {
        assert_eq!(normalize(json!(null)), json!(null));
        assert_eq!(normalize(json!([1, 2])), json!([1, 2]));
    }
}
