//! Fixed-format UTC timestamps as sent by the Spark API
//!
//! The API emits instants as `YYYY-MM-DDTHH:MM:SS.fZ` with one to six fractional
//! digits (in practice three, e.g. `2016-04-21T19:01:55.966Z`). The number of
//! fractional digits is kept so that formatting reproduces the original text.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDateTime, TimeZone, Timelike, Utc};
use regex::Regex;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";
const DEFAULT_FRACTION_DIGITS: u8 = 3;

fn timestamp_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.(\d{1,6})Z$").unwrap()
    })
}

/// A timezone-aware instant parsed from the API timestamp format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    instant: DateTime<Utc>,
    fraction_digits: u8,
}

impl Timestamp {
    /// Parse `YYYY-MM-DDTHH:MM:SS.fZ`, rejecting anything else.
    pub fn parse(value: &str) -> Result<Self> {
        let caps = timestamp_shape()
            .captures(value)
            .ok_or_else(|| Error::InvalidTimestamp(value.to_string()))?;
        let fraction_digits = caps.get(1).map_or(0, |m| m.as_str().len()) as u8;

        let naive = NaiveDateTime::parse_from_str(value, PARSE_FORMAT)
            .map_err(|_| Error::InvalidTimestamp(value.to_string()))?;

        Ok(Self {
            instant: Utc.from_utc_datetime(&naive),
            fraction_digits,
        })
    }

    /// Wrap an instant, formatting it with millisecond precision.
    pub fn from_instant(instant: DateTime<Utc>) -> Self {
        Self {
            instant,
            fraction_digits: DEFAULT_FRACTION_DIGITS,
        }
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn fraction_digits(&self) -> u8 {
        self.fraction_digits
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = u32::from(self.fraction_digits);
        let fraction = self.instant.nanosecond() % 1_000_000_000 / 10u32.pow(9 - digits);
        write!(
            f,
            "{}.{:0width$}Z",
            self.instant.format("%Y-%m-%dT%H:%M:%S"),
            fraction,
            width = digits as usize
        )
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::from_instant(instant)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
