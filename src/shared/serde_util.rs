//! Custom serde helpers for provider wire formats.

/// Converts a provider timestamp (epoch millis, sometimes sent as a float) to `i64`.
pub fn millis_from_f64(raw: f64) -> Option<i64> {
    if raw.is_finite() && raw >= 0.0 {
        Some(raw.round() as i64)
    } else {
        None
    }
}

/// Deserializes an optional number that the provider sometimes encodes as a string.
///
/// `null`, missing, and unparseable strings all become `None`.
pub mod lenient_f64 {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Str(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Num(n)) => Some(n),
            Some(Raw::Str(s)) => s.trim().parse::<f64>().ok(),
            None => None,
        })
    }
}
