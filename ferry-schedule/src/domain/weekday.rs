//! Weekday codes and day-of-week sets.
//!
//! Schedules name weekdays with two-letter iCalendar-style codes
//! ("MO".."SU"). A `DaySet` is the set of codes on which a recurring
//! sailing runs; it is never empty.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};

/// Error returned when parsing an unknown weekday code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown weekday code {code:?} (expected one of MO,TU,WE,TH,FR,SA,SU)")]
pub struct InvalidDayCode {
    code: String,
}

/// Error returned when building an invalid day set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DaySetError {
    /// No weekday was given
    #[error("days of week must not be empty")]
    Empty,

    /// The same weekday was given twice
    #[error("weekday {0} is listed more than once")]
    Duplicate(DayCode),
}

/// A two-letter weekday code.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayCode {
    Mo,
    Tu,
    We,
    Th,
    Fr,
    Sa,
    Su,
}

impl DayCode {
    /// All codes, Monday first.
    pub const ALL: [DayCode; 7] = [
        DayCode::Mo,
        DayCode::Tu,
        DayCode::We,
        DayCode::Th,
        DayCode::Fr,
        DayCode::Sa,
        DayCode::Su,
    ];

    /// Parse an upper-case two-letter code.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferry_schedule::domain::DayCode;
    ///
    /// assert_eq!(DayCode::parse("MO").unwrap(), DayCode::Mo);
    /// assert!(DayCode::parse("mo").is_err());
    /// assert!(DayCode::parse("MON").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, InvalidDayCode> {
        match s {
            "MO" => Ok(DayCode::Mo),
            "TU" => Ok(DayCode::Tu),
            "WE" => Ok(DayCode::We),
            "TH" => Ok(DayCode::Th),
            "FR" => Ok(DayCode::Fr),
            "SA" => Ok(DayCode::Sa),
            "SU" => Ok(DayCode::Su),
            _ => Err(InvalidDayCode {
                code: s.to_string(),
            }),
        }
    }

    /// Returns the two-letter code.
    pub fn as_str(&self) -> &'static str {
        match self {
            DayCode::Mo => "MO",
            DayCode::Tu => "TU",
            DayCode::We => "WE",
            DayCode::Th => "TH",
            DayCode::Fr => "FR",
            DayCode::Sa => "SA",
            DayCode::Su => "SU",
        }
    }

    /// The weekday a calendar date falls on.
    pub fn of_date(date: NaiveDate) -> Self {
        Self::from(date.weekday())
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl From<Weekday> for DayCode {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => DayCode::Mo,
            Weekday::Tue => DayCode::Tu,
            Weekday::Wed => DayCode::We,
            Weekday::Thu => DayCode::Th,
            Weekday::Fri => DayCode::Fr,
            Weekday::Sat => DayCode::Sa,
            Weekday::Sun => DayCode::Su,
        }
    }
}

impl From<DayCode> for Weekday {
    fn from(code: DayCode) -> Self {
        match code {
            DayCode::Mo => Weekday::Mon,
            DayCode::Tu => Weekday::Tue,
            DayCode::We => Weekday::Wed,
            DayCode::Th => Weekday::Thu,
            DayCode::Fr => Weekday::Fri,
            DayCode::Sa => Weekday::Sat,
            DayCode::Su => Weekday::Sun,
        }
    }
}

impl fmt::Debug for DayCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DayCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-empty set of weekdays.
///
/// Stored as a 7-bit mask; iteration is always Monday first regardless of
/// the order the days were given in.
///
/// # Examples
///
/// ```
/// use ferry_schedule::domain::{DayCode, DaySet};
///
/// let days = DaySet::new([DayCode::Sa, DayCode::Su]).unwrap();
/// assert!(days.contains(DayCode::Sa));
/// assert!(!days.contains(DayCode::Mo));
///
/// // An empty set is meaningless and rejected
/// assert!(DaySet::new([]).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DaySet(u8);

impl DaySet {
    /// Build a set from codes, rejecting empty input and duplicates.
    pub fn new(codes: impl IntoIterator<Item = DayCode>) -> Result<Self, DaySetError> {
        let mut mask = 0u8;
        for code in codes {
            if mask & code.bit() != 0 {
                return Err(DaySetError::Duplicate(code));
            }
            mask |= code.bit();
        }
        if mask == 0 {
            return Err(DaySetError::Empty);
        }
        Ok(DaySet(mask))
    }

    /// Every day of the week.
    pub fn all() -> Self {
        DaySet(0b111_1111)
    }

    /// Monday to Friday.
    pub fn weekdays() -> Self {
        DaySet(0b001_1111)
    }

    /// Saturday and Sunday.
    pub fn weekends() -> Self {
        DaySet(0b110_0000)
    }

    /// Does the set include this weekday?
    pub fn contains(&self, code: DayCode) -> bool {
        self.0 & code.bit() != 0
    }

    /// Does the set include the weekday of this date?
    pub fn includes(&self, date: NaiveDate) -> bool {
        self.contains(DayCode::of_date(date))
    }

    /// Number of days in the set (1-7).
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Codes in the set, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = DayCode> + '_ {
        DayCode::ALL.into_iter().filter(|c| self.contains(*c))
    }

    /// Short human description, e.g. "every day", "weekdays", "MO TU SA".
    pub fn describe(&self) -> String {
        if *self == Self::all() {
            return "every day".to_string();
        }
        if *self == Self::weekdays() {
            return "weekdays".to_string();
        }
        if *self == Self::weekends() {
            return "weekends".to_string();
        }
        self.iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Debug for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_all_codes() {
        for code in DayCode::ALL {
            assert_eq!(DayCode::parse(code.as_str()).unwrap(), code);
        }
    }

    #[test]
    fn reject_unknown_codes() {
        assert!(DayCode::parse("").is_err());
        assert!(DayCode::parse("Mo").is_err());
        assert!(DayCode::parse("MON").is_err());
        assert!(DayCode::parse("XX").is_err());
        assert_eq!(
            DayCode::parse("XF").unwrap_err().to_string(),
            "unknown weekday code \"XF\" (expected one of MO,TU,WE,TH,FR,SA,SU)"
        );
    }

    #[test]
    fn code_of_date() {
        // 2025-06-02 is a Monday
        assert_eq!(DayCode::of_date(date(2025, 6, 2)), DayCode::Mo);
        assert_eq!(DayCode::of_date(date(2025, 6, 7)), DayCode::Sa);
        assert_eq!(DayCode::of_date(date(2025, 6, 8)), DayCode::Su);
    }

    #[test]
    fn weekday_conversion_roundtrip() {
        for code in DayCode::ALL {
            let weekday: Weekday = code.into();
            assert_eq!(DayCode::from(weekday), code);
        }
    }

    #[test]
    fn empty_set_rejected() {
        assert_eq!(DaySet::new([]).unwrap_err(), DaySetError::Empty);
    }

    #[test]
    fn duplicate_rejected() {
        let err = DaySet::new([DayCode::Mo, DayCode::Tu, DayCode::Mo]).unwrap_err();
        assert_eq!(err, DaySetError::Duplicate(DayCode::Mo));
        assert_eq!(err.to_string(), "weekday MO is listed more than once");
    }

    #[test]
    fn iteration_is_monday_first() {
        let set = DaySet::new([DayCode::Su, DayCode::We, DayCode::Mo]).unwrap();
        let codes: Vec<_> = set.iter().collect();
        assert_eq!(codes, vec![DayCode::Mo, DayCode::We, DayCode::Su]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn named_sets() {
        assert_eq!(DaySet::all().len(), 7);
        assert_eq!(
            DaySet::weekdays(),
            DaySet::new([DayCode::Mo, DayCode::Tu, DayCode::We, DayCode::Th, DayCode::Fr])
                .unwrap()
        );
        assert_eq!(
            DaySet::weekends(),
            DaySet::new([DayCode::Sa, DayCode::Su]).unwrap()
        );
    }

    #[test]
    fn describe() {
        assert_eq!(DaySet::all().describe(), "every day");
        assert_eq!(DaySet::weekdays().describe(), "weekdays");
        assert_eq!(DaySet::weekends().describe(), "weekends");
        let set = DaySet::new([DayCode::Fr, DayCode::Mo]).unwrap();
        assert_eq!(set.describe(), "MO FR");
    }

    #[test]
    fn includes_date() {
        let weekdays = DaySet::weekdays();
        assert!(weekdays.includes(date(2025, 6, 2)));
        assert!(!weekdays.includes(date(2025, 6, 7)));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn day_code() -> impl Strategy<Value = DayCode> {
        (0usize..7).prop_map(|i| DayCode::ALL[i])
    }

    proptest! {
        /// Membership is exactly the set of codes given
        #[test]
        fn membership_matches_input(codes in proptest::collection::btree_set(day_code(), 1..=7)) {
            let set = DaySet::new(codes.iter().copied()).unwrap();
            for code in DayCode::ALL {
                prop_assert_eq!(set.contains(code), codes.contains(&code));
            }
            prop_assert_eq!(set.len(), codes.len());
        }

        /// Any date's weekday code is in the full set, and in exactly one singleton
        #[test]
        fn every_date_has_one_code(days in 0i64..20_000) {
            let d = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + chrono::Duration::days(days);
            prop_assert!(DaySet::all().includes(d));
            let hits = DayCode::ALL
                .iter()
                .filter(|c| DaySet::new([**c]).unwrap().includes(d))
                .count();
            prop_assert_eq!(hits, 1);
        }
    }
}
