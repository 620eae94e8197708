//! W3C datetime values from a version's `created` field.
//!
//! Accepts the profiles of the W3C "Date and Time Formats" note, from a bare
//! year up to fractional seconds. Values without a timezone designator are
//! read as UTC; [`Created::has_offset`] records whether one was given so
//! callers can flag the omission.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone};
use regex::Regex;

use crate::error::TypeError;

static W3C_DATETIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<year>\d{4})(?:-(?P<month>\d{2})(?:-(?P<day>\d{2})(?:T(?P<hour>\d{2}):(?P<minute>\d{2})(?::(?P<second>\d{2})(?P<frac>\.\d+)?)?(?P<tz>Z|[+-]\d{2}:\d{2})?)?)?)?$",
    )
    .expect("invalid regex")
});

/// A parsed `created` timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Created {
    datetime: DateTime<FixedOffset>,
    has_offset: bool,
    has_seconds: bool,
}

impl Created {
    /// Parse a W3C datetime string.
    pub fn parse(value: &str) -> Result<Self, TypeError> {
        let invalid = |reason: &str| TypeError::InvalidTimestamp {
            value: value.to_string(),
            reason: reason.to_string(),
        };
        let caps = W3C_DATETIME
            .captures(value)
            .ok_or_else(|| invalid("not a W3C datetime"))?;
        let number = |name: &str| -> Option<u32> {
            caps.name(name).and_then(|m| m.as_str().parse().ok())
        };

        let year = caps
            .name("year")
            .and_then(|m| m.as_str().parse::<i32>().ok())
            .ok_or_else(|| invalid("bad year"))?;
        let date = NaiveDate::from_ymd_opt(
            year,
            number("month").unwrap_or(1),
            number("day").unwrap_or(1),
        )
        .ok_or_else(|| invalid("day or month out of range"))?;

        let nanos = match caps.name("frac") {
            Some(m) => {
                let digits: String = m.as_str()[1..]
                    .chars()
                    .chain(std::iter::repeat('0'))
                    .take(9)
                    .collect();
                digits.parse().map_err(|_| invalid("bad fractional seconds"))?
            }
            None => 0,
        };
        let time = NaiveTime::from_hms_nano_opt(
            number("hour").unwrap_or(0),
            number("minute").unwrap_or(0),
            number("second").unwrap_or(0),
            nanos,
        )
        .ok_or_else(|| invalid("time of day out of range"))?;

        let tz = caps.name("tz").map(|m| m.as_str());
        let offset = match tz {
            None | Some("Z") => FixedOffset::east_opt(0),
            Some(tz) => {
                let sign = if tz.starts_with('-') { -1 } else { 1 };
                let hours: i32 = tz[1..3].parse().map_err(|_| invalid("bad offset"))?;
                let minutes: i32 = tz[4..6].parse().map_err(|_| invalid("bad offset"))?;
                if minutes >= 60 {
                    return Err(invalid("offset minutes out of range"));
                }
                FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            }
        }
        .ok_or_else(|| invalid("offset out of range"))?;

        let datetime = offset
            .from_local_datetime(&date.and_time(time))
            .single()
            .ok_or_else(|| invalid("ambiguous local time"))?;

        Ok(Self {
            datetime,
            has_offset: tz.is_some(),
            has_seconds: caps.name("second").is_some(),
        })
    }

    pub fn datetime(&self) -> DateTime<FixedOffset> {
        self.datetime
    }

    /// Returns `true` if the value ended in `Z` or a `+hh:mm`/`-hh:mm` offset.
    pub fn has_offset(&self) -> bool {
        self.has_offset
    }

    /// Returns `true` if the value carried a time of day down to seconds.
    pub fn has_seconds(&self) -> bool {
        self.has_seconds
    }
}

impl FromStr for Created {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
