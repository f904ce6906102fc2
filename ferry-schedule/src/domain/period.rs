//! Schedule periods and the recurring departures they contain.

use chrono::NaiveDate;

use super::{DaySet, Invariant, SailingTime};

/// One recurring weekly sailing.
///
/// All invariants are carried by the field types: `time` is a valid
/// wall-clock time and `days` is never empty. Rules order by time first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DepartureRule {
    /// Local departure time in the service's timezone
    pub time: SailingTime,
    /// Pier or island the ferry leaves from
    pub origin: String,
    /// Pier or island the ferry arrives at
    pub destination: String,
    /// Weekdays on which this sailing runs
    pub days: DaySet,
}

impl DepartureRule {
    /// Creates a new departure rule.
    pub fn new(
        time: SailingTime,
        origin: impl Into<String>,
        destination: impl Into<String>,
        days: DaySet,
    ) -> Self {
        Self {
            time,
            origin: origin.into(),
            destination: destination.into(),
            days,
        }
    }
}

/// A named, date-bounded version of one service's timetable.
///
/// `start_date <= end_date` always holds; both bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulePeriod {
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    url: Option<String>,
    departures: Vec<DepartureRule>,
}

impl SchedulePeriod {
    /// Create a period, rejecting a range that ends before it starts.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use ferry_schedule::domain::SchedulePeriod;
    ///
    /// let jun1 = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    /// let sep15 = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();
    ///
    /// assert!(SchedulePeriod::new("Summer", jun1, sep15, vec![]).is_ok());
    /// assert!(SchedulePeriod::new("Summer", sep15, jun1, vec![]).is_err());
    /// ```
    pub fn new(
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        departures: Vec<DepartureRule>,
    ) -> Result<Self, Invariant> {
        if end_date < start_date {
            return Err(Invariant::InvertedRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            name: name.into(),
            start_date,
            end_date,
            url: None,
            departures,
        })
    }

    /// Attach the URL the period was published at.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Human label, e.g. "Summer". Not unique.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First day the period is in effect.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day the period is in effect.
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn departures(&self) -> &[DepartureRule] {
        &self.departures
    }

    /// Is `date` within the inclusive range?
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// `end_date - start_date` in days. A single-day period has span 0.
    pub fn span_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}
