//! Serde adapters for field encodings found in persisted collections.

/// `Option<T>` stored as an empty string when absent.
///
/// Syndicates created without a leader persist `"leaderId": ""`.
pub mod empty_as_none {
    use serde::{Deserialize, Deserializer, Serializer};

    /// Write `None` as `""`.
    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: AsRef<str>,
    {
        serializer.serialize_str(value.as_ref().map_or("", AsRef::as_ref))
    }

    /// Read `""`, `null` or a missing field as `None`.
    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: From<String>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.filter(|text| !text.trim().is_empty()).map(T::from))
    }
}

/// Wall-clock timestamps without an offset.
///
/// Accepts `YYYY-MM-DDTHH:MM`, `YYYY-MM-DDTHH:MM:SS` and fractional seconds,
/// which covers what date-time pickers emit. RFC 3339 input keeps the wall
/// clock of its own offset. Always writes full seconds.
pub mod local_datetime {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    const WRITE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
    const READ_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

    /// Parse a wall-clock timestamp in any accepted layout.
    pub fn parse(text: &str) -> Option<NaiveDateTime> {
        let trimmed = text.trim();
        READ_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
            .or_else(|| {
                DateTime::parse_from_rfc3339(trimmed)
                    .ok()
                    .map(|stamp| stamp.naive_local())
            })
    }

    /// Serialise with whole seconds.
    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(WRITE_FORMAT).to_string())
    }

    /// Deserialise from any accepted layout.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid local date-time: {raw}"))
        })
    }
}
