//! Record timestamps.
//!
//! Records arrive with either an explicit UTC offset or a bare wall-clock
//! time. Bare times are interpreted in whatever zone the analyzer is
//! configured with; nothing here consults the process locale.

use std::fmt;
use std::str::FromStr;

use chrono::offset::LocalResult;
use chrono::{
    DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

const FLOATING_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A point in time as recorded on an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Timestamp {
    /// RFC 3339 timestamp with an offset.
    Zoned(DateTime<FixedOffset>),
    /// Wall-clock time without an offset.
    Floating(NaiveDateTime),
}

impl Timestamp {
    /// Parse an ISO-8601 timestamp.
    ///
    /// Accepts RFC 3339 with offset, offset-less datetimes (`T` or space
    /// separated, seconds and fractions optional) and bare dates, which
    /// become floating midnight.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParseError::InvalidTimestamp {
                input: input.to_string(),
                reason: "empty string".to_string(),
            });
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Timestamp::Zoned(dt));
        }

        for format in FLOATING_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(Timestamp::Floating(naive));
            }
        }

        match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            Ok(date) => Ok(Timestamp::Floating(date.and_time(chrono::NaiveTime::MIN))),
            Err(e) => Err(ParseError::InvalidTimestamp {
                input: input.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Wall-clock time of this timestamp in `tz`.
    pub fn local(&self, tz: &Tz) -> NaiveDateTime {
        match self {
            Timestamp::Zoned(dt) => dt.with_timezone(tz).naive_local(),
            Timestamp::Floating(naive) => *naive,
        }
    }

    /// Absolute instant of this timestamp, resolving floating times in `tz`.
    ///
    /// Ambiguous wall-clock times (DST fall-back) resolve to the earlier
    /// instant. Times inside a DST gap use the zone's offset at the same UTC
    /// reading.
    pub fn instant(&self, tz: &Tz) -> DateTime<Utc> {
        match self {
            Timestamp::Zoned(dt) => dt.with_timezone(&Utc),
            Timestamp::Floating(naive) => match tz.from_local_datetime(naive) {
                LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
                LocalResult::None => {
                    let offset = tz.offset_from_utc_datetime(naive).fix();
                    let shifted = *naive - Duration::seconds(offset.local_minus_utc() as i64);
                    Utc.from_utc_datetime(&shifted)
                }
            },
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Zoned(dt) => write!(f, "{}", dt.to_rfc3339()),
            Timestamp::Floating(naive) => write!(f, "{}", naive.format("%Y-%m-%dT%H:%M:%S%.f")),
        }
    }
}

impl FromStr for Timestamp {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timestamp::parse(s)
    }
}

impl TryFrom<String> for Timestamp {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Timestamp::parse(&value)
    }
}

impl From<Timestamp> for String {
    fn from(value: Timestamp) -> Self {
        value.to_string()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Timestamp::Zoned(value.fixed_offset())
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Timestamp::Zoned(value)
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(value: NaiveDateTime) -> Self {
        Timestamp::Floating(value)
    }
}
