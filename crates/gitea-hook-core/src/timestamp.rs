//! Tolerant decoding of the timestamps found in Gitea payloads.
//!
//! Gitea is not consistent about how it renders times: depending on the field
//! and server version a value may be RFC 3339, a space separated date with a
//! zone abbreviation, or a space separated date with a numeric offset. Unset
//! times arrive as `null`, as the string `"null"`, or as Go's zero time.
//!
//! [`TolerantTime`] accepts all of them and normalises to UTC.

use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Date and time portion shared by the space separated layouts. The
/// fractional part is optional.
const NAIVE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Literal Gitea uses for an unset time inside a string.
const NULL_LITERAL: &str = "null";

/// Textual layouts understood by [`TolerantTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `2006-01-02 15:04:05 MST`
    ZoneAbbreviation,
    /// `2006-01-02 15:04:05 Z07:00`
    ColonOffset,
    /// `2006-01-02 15:04:05 Z0700`
    Offset,
    /// `2006-01-02T15:04:05Z07:00`
    Rfc3339,
}

/// Layouts in the order they are tried. Order matters: the first layout that
/// accepts the input wins.
pub const LAYOUTS: [Layout; 4] = [
    Layout::ZoneAbbreviation,
    Layout::ColonOffset,
    Layout::Offset,
    Layout::Rfc3339,
];

impl Layout {
    /// Reference rendering of the layout.
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::ZoneAbbreviation => "2006-01-02 15:04:05 MST",
            Self::ColonOffset => "2006-01-02 15:04:05 Z07:00",
            Self::Offset => "2006-01-02 15:04:05 Z0700",
            Self::Rfc3339 => "2006-01-02T15:04:05Z07:00",
        }
    }

    /// Parse `value` with this layout.
    pub fn parse(&self, value: &str) -> Option<DateTime<Utc>> {
        match self {
            Self::ZoneAbbreviation => {
                let (naive, zone) = split_zone(value)?;
                // Abbreviations carry no offset information; treat them as UTC.
                let is_abbreviation = (3..=5).contains(&zone.len())
                    && zone.chars().all(|c| c.is_ascii_uppercase());
                if !is_abbreviation {
                    return None;
                }
                Some(naive.and_utc())
            }
            Self::ColonOffset => {
                let (naive, zone) = split_zone(value)?;
                let offset = parse_offset(zone, true)?;
                localize(naive, offset)
            }
            Self::Offset => {
                let (naive, zone) = split_zone(value)?;
                let offset = parse_offset(zone, false)?;
                localize(naive, offset)
            }
            Self::Rfc3339 => DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

/// Split `"<date> <time> <zone>"` into the parsed date-time and the zone token.
fn split_zone(value: &str) -> Option<(NaiveDateTime, &str)> {
    let (naive, zone) = value.rsplit_once(' ')?;
    let naive = NaiveDateTime::parse_from_str(naive, NAIVE_FORMAT).ok()?;
    Some((naive, zone))
}

/// Parse `Z`, `+hh:mm` (with `colon`) or `+hhmm` (without).
fn parse_offset(zone: &str, colon: bool) -> Option<FixedOffset> {
    if zone == "Z" {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match zone.as_bytes().first()? {
        b'+' => (1, &zone[1..]),
        b'-' => (-1, &zone[1..]),
        _ => return None,
    };

    // Byte offsets below assume single-byte characters.
    if !rest.is_ascii() {
        return None;
    }

    let (hours, minutes) = if colon {
        rest.split_once(':')?
    } else {
        if rest.len() != 4 {
            return None;
        }
        rest.split_at(2)
    };

    if hours.len() != 2
        || minutes.len() != 2
        || !hours.chars().chain(minutes.chars()).all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

fn localize(naive: NaiveDateTime, offset: FixedOffset) -> Option<DateTime<Utc>> {
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Errors produced when a timestamp string cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("timestamp {value:?} does not match any known layout")]
    UnrecognizedFormat { value: String },
}

/// A point in time decoded from any of the [`LAYOUTS`], or an explicit absence.
///
/// Absence covers JSON `null`, the string `"null"`, missing fields and Go's zero
/// time (`0001-01-01T00:00:00Z`). It serialises back out as RFC 3339 (or
/// `null`), which decodes to the same value.
///
/// # Examples
///
/// ```rust
/// use gitea_hook_core::TolerantTime;
///
/// let a: TolerantTime = "2021-01-01 00:00:00 UTC".parse().unwrap();
/// let b: TolerantTime = "2021-01-01T08:00:00+08:00".parse().unwrap();
/// assert_eq!(a, b);
///
/// let none: TolerantTime = "null".parse().unwrap();
/// assert!(none.is_absent());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TolerantTime(Option<DateTime<Utc>>);

impl TolerantTime {
    /// The absent value.
    pub const ABSENT: Self = Self(None);

    /// Wrap a known instant.
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(Some(instant)).normalized()
    }

    /// Parse a timestamp, trying each of the [`LAYOUTS`] in order.
    pub fn parse(value: &str) -> Result<Self, TimestampError> {
        Self::parse_with_layout(value).map(|(time, _)| time)
    }

    /// Parse a timestamp and report which layout accepted it.
    ///
    /// The layout is `None` when the input was the absence marker.
    pub fn parse_with_layout(value: &str) -> Result<(Self, Option<Layout>), TimestampError> {
        if value == NULL_LITERAL {
            return Ok((Self::ABSENT, None));
        }

        LAYOUTS
            .iter()
            .find_map(|layout| layout.parse(value).map(|dt| (Self::new(dt), Some(*layout))))
            .ok_or_else(|| TimestampError::UnrecognizedFormat {
                value: value.to_string(),
            })
    }

    /// Returns `true` if no instant is present.
    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    /// Get underlying DateTime
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        self.0.as_ref()
    }

    /// Consume into the underlying DateTime
    pub fn into_inner(self) -> Option<DateTime<Utc>> {
        self.0
    }

    fn normalized(self) -> Self {
        match self.0 {
            Some(dt) if is_go_zero_time(&dt) => Self::ABSENT,
            _ => self,
        }
    }
}

fn is_go_zero_time(dt: &DateTime<Utc>) -> bool {
    use chrono::{Datelike, Timelike};
    dt.year() == 1
        && dt.month() == 1
        && dt.day() == 1
        && dt.num_seconds_from_midnight() == 0
        && dt.nanosecond() == 0
}

impl From<DateTime<Utc>> for TolerantTime {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::new(instant)
    }
}

impl FromStr for TolerantTime {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TolerantTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            None => f.write_str(NULL_LITERAL),
        }
    }
}

impl Serialize for TolerantTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for TolerantTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(Self::ABSENT),
            Some(value) => Self::parse(&value).map_err(de::Error::custom),
        }
    }
}

#[cfg(test)]
#[path = "timestamp_tests.rs"]
mod tests;
