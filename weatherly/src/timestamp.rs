//! Serde adapter rendering UTC timestamps as `2024-01-15T12:00:00.000Z`.
//!
//! Use with `#[serde(with = "weatherly::timestamp")]`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(datetime: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&render(datetime))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    DateTime::<Utc>::deserialize(deserializer)
}

/// Render a timestamp in the canonical format.
pub fn render(datetime: &DateTime<Utc>) -> String {
    datetime.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn renders_millis_and_zulu() {
        let datetime = Utc
            .timestamp_opt(1_705_320_000, 0)
            .single()
            .expect("valid timestamp");
        assert_eq!(render(&datetime), "2024-01-15T12:00:00.000Z");
    }
}
