//! Serde helper for Fleet timestamps.
//!
//! Fleet sends RFC 3339 strings, but may also send `null`, an empty string or
//! the zero time (`0001-01-01T00:00:00Z`) for "never". All three decode to
//! `None`. Use with `#[serde(default, with = "crate::time::fleet_time")]`.

pub mod fleet_time {
    use chrono::{DateTime, Datelike, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => {
                let ts = DateTime::parse_from_rfc3339(s)
                    .map_err(|e| de::Error::custom(format!("invalid timestamp '{}': {}", s, e)))?
                    .with_timezone(&Utc);
                if ts.year() <= 1 {
                    Ok(None)
                } else {
                    Ok(Some(ts))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Deserialize, Serialize)]
    struct Stamped {
        #[serde(default, with = "super::fleet_time")]
        at: Option<DateTime<Utc>>,
    }

    fn decode(json: &str) -> Option<DateTime<Utc>> {
        serde_json::from_str::<Stamped>(json).unwrap().at
    }

    #[test]
    fn test_absent_values() {
        assert_eq!(decode(r#"{}"#), None);
        assert_eq!(decode(r#"{"at": null}"#), None);
        assert_eq!(decode(r#"{"at": ""}"#), None);
        assert_eq!(decode(r#"{"at": "0001-01-01T00:00:00Z"}"#), None);
    }

    #[test]
    fn test_valid_timestamp() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 5, 12, 30, 0).unwrap();
        assert_eq!(decode(r#"{"at": "2024-03-05T12:30:00Z"}"#), Some(expected));
        assert_eq!(decode(r#"{"at": "2024-03-05T14:30:00+02:00"}"#), Some(expected));
    }

    #[test]
    fn test_fractional_seconds() {
        let ts = decode(r#"{"at": "2024-03-05T12:30:00.123456Z"}"#).unwrap();
        assert_eq!(ts.timestamp_subsec_micros(), 123456);
    }

    #[test]
    fn test_invalid_timestamp_is_error() {
        assert!(serde_json::from_str::<Stamped>(r#"{"at": "yesterday"}"#).is_err());
    }

    #[test]
    fn test_serialize() {
        let at = Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());
        let json = serde_json::to_value(Stamped { at }).unwrap();
        assert_eq!(json["at"], "2024-01-02T03:04:05+00:00");

        let json = serde_json::to_value(Stamped { at: None }).unwrap();
        assert!(json["at"].is_null());
    }
}
