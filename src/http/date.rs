//! HTTP-Date values.
use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};

use crate::http::error::{Error, Result};

/// IMF-fixdate, RFC 7231 section 7.1.1.1.
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// A point in time that renders as an HTTP-Date.
///
/// The original offset is kept, but [`Date::format`] always converts to UTC
/// first, so two dates naming the same instant render identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(DateTime<FixedOffset>);

impl Date {
    pub fn now() -> Self {
        Utc::now().into()
    }

    /// Builds a date from calendar fields in a zone `offset_secs` seconds
    /// east of UTC (negative for west).
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        offset_secs: i32,
    ) -> Result<Self> {
        let offset = FixedOffset::east_opt(offset_secs).ok_or_else(|| {
            tracing::debug!(offset_secs, "rejected date offset");
            Error::InvalidDate(format!("offset out of range: {offset_secs}s"))
        })?;

        offset
            .with_ymd_and_hms(year, month, day, hour, minute, second)
            .single()
            .map(Self)
            .ok_or_else(|| {
                tracing::debug!(year, month, day, hour, minute, second, "rejected date fields");
                Error::InvalidDate(format!(
                    "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
                ))
            })
    }

    pub fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.0
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }

    pub fn format(&self) -> String {
        self.to_string()
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Date {
    fn from(value: DateTime<Tz>) -> Self {
        let offset = value.offset().fix();
        Self(value.with_timezone(&offset))
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_utc().format(HTTP_DATE_FORMAT))
    }
}

impl FromStr for Date {
    type Err = Error;

    /// Parses an IMF-fixdate. The result carries a UTC offset.
    fn from_str(s: &str) -> Result<Self> {
        let naive = NaiveDateTime::parse_from_str(s.trim(), HTTP_DATE_FORMAT)
            .map_err(|e| {
                tracing::debug!(input = s, error = %e, "rejected HTTP-Date text");
                Error::InvalidDate(format!("{s:?}: {e}"))
            })?;

        Ok(Utc.from_utc_datetime(&naive).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: i32 = 3600;

    #[test]
    fn test_format_converts_to_utc() {
        let date = Date::from_ymd_hms(2022, 9, 8, 18, 9, 59, -3 * HOUR).unwrap();
        assert_eq!(date.format(), "Thu, 08 Sep 2022 21:09:59 GMT");
    }

    #[test]
    fn test_format_crosses_day_boundary() {
        let date = Date::from_ymd_hms(2023, 1, 1, 1, 30, 0, 2 * HOUR).unwrap();
        assert_eq!(date.format(), "Sat, 31 Dec 2022 23:30:00 GMT");
    }

    #[test]
    fn test_format_pads_fields() {
        let date = Date::from_ymd_hms(2021, 3, 5, 4, 3, 2, 0).unwrap();
        assert_eq!(date.to_string(), "Fri, 05 Mar 2021 04:03:02 GMT");
    }

    #[test]
    fn test_same_instant_same_rendering() {
        let east = Date::from_ymd_hms(2022, 9, 9, 6, 9, 59, 9 * HOUR).unwrap();
        let west = Date::from_ymd_hms(2022, 9, 8, 18, 9, 59, -3 * HOUR).unwrap();
        assert_eq!(east, west);
        assert_eq!(east.format(), west.format());
    }

    #[tracing_test::traced_test]
    #[test]
    fn test_invalid_fields() {
        assert!(matches!(
            Date::from_ymd_hms(2022, 2, 30, 0, 0, 0, 0),
            Err(Error::InvalidDate(..))
        ));
        assert!(matches!(
            Date::from_ymd_hms(2022, 1, 1, 24, 0, 0, 0),
            Err(Error::InvalidDate(..))
        ));
        assert!(matches!(
            Date::from_ymd_hms(2022, 1, 1, 0, 0, 0, 86_400),
            Err(Error::InvalidDate(..))
        ));
        assert!(logs_contain("rejected date fields"));
        assert!(logs_contain("rejected date offset"));
    }

    #[test]
    fn test_parse() {
        let date: Date = "Thu, 08 Sep 2022 21:09:59 GMT".parse().unwrap();
        assert_eq!(date, Date::from_ymd_hms(2022, 9, 8, 21, 9, 59, 0).unwrap());
        assert_eq!(date.format(), "Thu, 08 Sep 2022 21:09:59 GMT");
    }

    #[tracing_test::traced_test]
    #[test]
    fn test_parse_rejects_other_formats() {
        assert!("2022-09-08T21:09:59Z".parse::<Date>().is_err());
        assert!("Thu, 08 Sep 2022 21:09:59 UTC".parse::<Date>().is_err());
        assert!("".parse::<Date>().is_err());
        assert!(logs_contain("rejected HTTP-Date text"));
    }

    #[test]
    fn test_keeps_original_offset() {
        let date = Date::from_ymd_hms(2022, 9, 8, 18, 9, 59, -3 * HOUR).unwrap();
        assert_eq!(date.as_datetime().offset().local_minus_utc(), -3 * HOUR);
        assert_eq!(date.as_datetime().to_rfc3339(), "2022-09-08T18:09:59-03:00");
    }

    #[test]
    fn test_from_chrono() {
        let utc = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let date = Date::from(utc);
        assert_eq!(date.format(), "Sat, 01 Jan 2000 00:00:00 GMT");
        assert_eq!(date.to_utc(), utc);
    }

    #[test]
    fn test_now_ends_with_gmt() {
        assert!(Date::now().format().ends_with(" GMT"));
    }
}
