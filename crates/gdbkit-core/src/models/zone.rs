use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An explicit time zone used to interpret or display timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeZoneSpec {
    /// Zone of the running process
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl TimeZoneSpec {
    /// Anchor a zone-less timestamp in this zone.
    ///
    /// Returns `None` for wall-clock times that do not exist in the zone
    /// (daylight-saving gaps). Ambiguous times resolve to the earlier instant.
    pub fn anchor(&self, naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            TimeZoneSpec::Local => Local
                .from_local_datetime(naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            TimeZoneSpec::Utc => Some(Utc.from_utc_datetime(naive)),
            TimeZoneSpec::Fixed(offset) => offset
                .from_local_datetime(naive)
                .single()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }

    /// Calendar date of an instant as seen in this zone
    pub fn calendar_date(&self, instant: &DateTime<Utc>) -> NaiveDate {
        match self {
            TimeZoneSpec::Local => instant.with_timezone(&Local).date_naive(),
            TimeZoneSpec::Utc => instant.date_naive(),
            TimeZoneSpec::Fixed(offset) => instant.with_timezone(offset).date_naive(),
        }
    }
}

impl fmt::Display for TimeZoneSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeZoneSpec::Local => f.write_str("local"),
            TimeZoneSpec::Utc => f.write_str("utc"),
            TimeZoneSpec::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

impl FromStr for TimeZoneSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "local" => return Ok(TimeZoneSpec::Local),
            "utc" | "z" => return Ok(TimeZoneSpec::Utc),
            _ => {}
        }

        let (sign, rest) = match trimmed.chars().next() {
            Some('+') => (1, &trimmed[1..]),
            Some('-') => (-1, &trimmed[1..]),
            _ => return Err(format!("Invalid time zone: {}. Use local, utc, or +HH:MM", s)),
        };

        let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
        let hours = offset_field(hours).ok_or_else(|| format!("Invalid offset hours in '{}'", s))?;
        let minutes =
            offset_field(minutes).ok_or_else(|| format!("Invalid offset minutes in '{}'", s))?;
        if hours > 23 {
            return Err(format!("Offset out of range: {}", s));
        }
        if minutes >= 60 {
            return Err(format!("Invalid offset minutes in '{}'", s));
        }

        FixedOffset::east_opt(sign * (i32::from(hours) * 3600 + i32::from(minutes) * 60))
            .map(TimeZoneSpec::Fixed)
            .ok_or_else(|| format!("Offset out of range: {}", s))
    }
}

/// One or two ASCII digits; signs and longer runs are rejected
fn offset_field(s: &str) -> Option<u8> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl Serialize for TimeZoneSpec {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeZoneSpec {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Source and display zones for modification timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimestampZones {
    /// Zone the host's zone-less timestamps are written in
    pub source: TimeZoneSpec,

    /// Zone whose calendar date goes into the report
    pub report: TimeZoneSpec,
}
