//! ISO-8601 calendar dates on the wire.

use jiff::{
    Timestamp,
    civil::{Date, DateTime},
    tz::TimeZone,
};
use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

/// Parse a calendar date from a plain date, a civil date-time or an instant.
///
/// Instants (`2024-03-01T00:00:00.000Z`) are reduced to their UTC date.
pub(crate) fn parse_iso_date(value: &str) -> Result<Date, jiff::Error> {
    if let Ok(timestamp) = value.parse::<Timestamp>() {
        return Ok(timestamp.to_zoned(TimeZone::UTC).date());
    }

    value
        .parse::<DateTime>()
        .map(|datetime| datetime.date())
        .or_else(|_err| value.parse::<Date>())
}

pub(crate) fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(date)
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;

    parse_iso_date(&raw).map_err(D::Error::custom)
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_plain_date() -> TestResult {
        assert_eq!(parse_iso_date("2024-03-01")?, date(2024, 3, 1));

        Ok(())
    }

    #[test]
    fn parses_instant_as_utc_date() -> TestResult {
        assert_eq!(parse_iso_date("2024-03-01T23:30:00.000Z")?, date(2024, 3, 1));
        assert_eq!(parse_iso_date("2024-03-02T00:30:00+02:00")?, date(2024, 3, 1));

        Ok(())
    }

    #[test]
    fn parses_civil_datetime() -> TestResult {
        assert_eq!(parse_iso_date("2024-03-01T10:15:00")?, date(2024, 3, 1));

        Ok(())
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_iso_date("18/11/1996").is_err());
        assert!(parse_iso_date("").is_err());
    }
}
