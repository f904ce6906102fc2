//! Sailing time handling.
//!
//! Schedules give departure times as "HH:MM" strings on a 24-hour clock,
//! local to the operating service's timezone. A `SailingTime` carries no
//! date: it is combined with a calendar date only when a recurring rule is
//! expanded into a concrete departure.

use chrono::{NaiveTime, Timelike};
use serde::{Serialize, Serializer};
use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    pub(crate) fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// How a sailing time is shown to riders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeFormat {
    /// "06:30", "18:05"
    #[default]
    TwentyFourHour,
    /// "6:30 AM", "6:05 PM"
    TwelveHour,
}

/// A local wall-clock time of day, at minute resolution.
///
/// # Examples
///
/// ```
/// use ferry_schedule::domain::SailingTime;
///
/// let time = SailingTime::parse_hhmm("06:30").unwrap();
/// assert_eq!(time.to_string(), "06:30");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SailingTime(NaiveTime);

impl SailingTime {
    /// Create a sailing time from hour and minute components.
    ///
    /// Returns `None` if either component is out of range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Parse a time from strict "HH:MM" format.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferry_schedule::domain::SailingTime;
    ///
    /// // Valid times
    /// assert!(SailingTime::parse_hhmm("00:00").is_ok());
    /// assert!(SailingTime::parse_hhmm("23:59").is_ok());
    ///
    /// // Invalid formats
    /// assert!(SailingTime::parse_hhmm("630").is_err());
    /// assert!(SailingTime::parse_hhmm("6:30").is_err());
    /// assert!(SailingTime::parse_hhmm("24:00").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        // Must be exactly 5 characters: HH:MM
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        Self::from_hm(hour, minute).ok_or_else(|| TimeError::new("invalid time"))
    }

    /// Returns the underlying chrono time.
    pub fn time(&self) -> NaiveTime {
        self.0
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Minutes since local midnight.
    pub fn minutes_from_midnight(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// Render for display in the given format.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferry_schedule::domain::{SailingTime, TimeFormat};
    ///
    /// let t = SailingTime::parse_hhmm("18:05").unwrap();
    /// assert_eq!(t.display(TimeFormat::TwentyFourHour), "18:05");
    /// assert_eq!(t.display(TimeFormat::TwelveHour), "6:05 PM");
    /// ```
    pub fn display(&self, format: TimeFormat) -> String {
        match format {
            TimeFormat::TwentyFourHour => self.to_string(),
            TimeFormat::TwelveHour => {
                let (is_pm, hour) = self.0.hour12();
                let suffix = if is_pm { "PM" } else { "AM" };
                format!("{}:{:02} {}", hour, self.minute(), suffix)
            }
        }
    }
}

impl fmt::Debug for SailingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SailingTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for SailingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for SailingTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}
