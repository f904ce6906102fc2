//! The row shape every source is reduced to.
//!
//! Timetable images and scraped web pages look nothing alike, but both end
//! up as a list of sailings (time text, route, weekdays) plus the period
//! they belong to. `PeriodDraft` is that common shape; turning it into a
//! `SchedulePeriod` applies the same invariants the canonical loader does.

use chrono::NaiveDate;

use crate::domain::{DayCode, DaySet, DaySetError, DepartureRule, Invariant, SchedulePeriod};

use super::clock::{ClockError, parse_clock};

/// A draft could not be turned into a valid period.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("period {period:?}, row #{row}: {source}")]
    Time {
        period: String,
        row: usize,
        source: ClockError,
    },

    #[error("period {period:?}, row #{row}: {source}")]
    Days {
        period: String,
        row: usize,
        source: DaySetError,
    },

    #[error("period {period:?}: {source}")]
    Period { period: String, source: Invariant },
}

/// One sailing as a source produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    /// Time as written in the source, e.g. "8:15 PM"
    pub time: String,
    pub origin: String,
    pub destination: String,
    pub days: Vec<DayCode>,
}

impl ScheduleRow {
    pub fn new(
        time: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
        days: impl IntoIterator<Item = DayCode>,
    ) -> Self {
        Self {
            time: time.into(),
            origin: origin.into(),
            destination: destination.into(),
            days: days.into_iter().collect(),
        }
    }

    fn into_rule(self) -> Result<DepartureRule, RowError> {
        let time = parse_clock(&self.time).map_err(RowError::Time)?;
        let days = DaySet::new(self.days).map_err(RowError::Days)?;
        Ok(DepartureRule::new(time, self.origin, self.destination, days))
    }
}

enum RowError {
    Time(ClockError),
    Days(DaySetError),
}

/// A period as a source described it, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodDraft {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub url: Option<String>,
    pub rows: Vec<ScheduleRow>,
}

impl PeriodDraft {
    pub fn new(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            url: None,
            rows: Vec::new(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn push(&mut self, row: ScheduleRow) {
        self.rows.push(row);
    }

    /// Validate every row and build the period.
    ///
    /// The first bad row fails the whole draft: a period is never built
    /// with rows silently dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use ferry_schedule::domain::DayCode;
    /// use ferry_schedule::ingest::{PeriodDraft, ScheduleRow};
    ///
    /// let mut draft = PeriodDraft::new(
    ///     "Summer",
    ///     NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(),
    ///     NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
    /// );
    /// draft.push(ScheduleRow::new("5:45 AM", "Portland", "Chebeague Island", DayCode::ALL));
    ///
    /// let period = draft.into_period().unwrap();
    /// assert_eq!(period.departures()[0].time.to_string(), "05:45");
    /// ```
    pub fn into_period(self) -> Result<SchedulePeriod, DraftError> {
        let Self {
            name,
            start,
            end,
            url,
            rows,
        } = self;

        let mut departures = Vec::with_capacity(rows.len());
        for (row, draft_row) in rows.into_iter().enumerate() {
            let rule = draft_row.into_rule().map_err(|e| match e {
                RowError::Time(source) => DraftError::Time {
                    period: name.clone(),
                    row,
                    source,
                },
                RowError::Days(source) => DraftError::Days {
                    period: name.clone(),
                    row,
                    source,
                },
            })?;
            departures.push(rule);
        }

        let period = SchedulePeriod::new(name.clone(), start, end, departures)
            .map_err(|source| DraftError::Period {
                period: name,
                source,
            })?;
        Ok(match url {
            Some(url) => period.with_url(url),
            None => period,
        })
    }
}
