//! Timestamps and half-open time slots.
//!
//! # Design Decisions
//! - The client's original string is kept verbatim for responses and for
//!   the `date` prefix filter
//! - Ordering uses the parsed calendar instant, never the raw string, so
//!   `10:00` and `10:00:00` compare equal
//! - RFC 3339 values are converted to UTC; naive values are taken as-is

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

use crate::booking::error::{BookingError, BookingResult};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// A client-supplied date-time together with its parsed instant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Timestamp {
    raw: String,
    instant: NaiveDateTime,
}

impl Timestamp {
    /// Parse an ISO-8601-like date-time string.
    pub fn parse(raw: &str) -> BookingResult<Self> {
        let trimmed = raw.trim();
        let instant = parse_instant(trimmed).ok_or_else(|| {
            BookingError::Validation(format!("unrecognized timestamp '{}'", raw))
        })?;

        Ok(Self {
            raw: trimmed.to_string(),
            instant,
        })
    }

    /// The string as the client sent it.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The calendar instant used for ordering.
    pub fn instant(&self) -> NaiveDateTime {
        self.instant
    }
}

fn parse_instant(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// A half-open interval `[start, end)`. Only constructible through `new`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    start: Timestamp,
    end: Timestamp,
}

impl TimeSlot {
    /// Build a slot, rejecting empty or inverted intervals.
    pub fn new(start: Timestamp, end: Timestamp) -> BookingResult<Self> {
        if start.instant() >= end.instant() {
            return Err(BookingError::Validation(format!(
                "start '{}' must be before end '{}'",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> &Timestamp {
        &self.start
    }

    pub fn end(&self) -> &Timestamp {
        &self.end
    }

    /// Two slots overlap unless one ends at or before the other begins.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        !(self.end.instant() <= other.start.instant()
            || self.start.instant() >= other.end.instant())
    }
}
