/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a random identifier for saved records (UUID v4, hyphenated).
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Serde helpers for numeric form fields where an empty input is a valid state.
///
/// Accepts a number, `null`, or a string. Blank strings (the browser form's
/// "empty" value) become `None`; numeric strings are parsed.
pub mod empty_as_none {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};
    use std::str::FromStr;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Value(T),
        Text(String),
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + FromStr,
    {
        match Option::<Raw<T>>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Value(v)) => Ok(Some(v)),
            Some(Raw::Text(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed
                    .parse()
                    .map(Some)
                    .map_err(|_| D::Error::custom(format!("invalid number: {s:?}")))
            }
        }
    }
}
