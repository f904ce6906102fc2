//! Domain error types.
//!
//! `ValidationError` is raised while a schedule document is being built and
//! is fatal to that load. `NotFoundError` is raised by queries that name a
//! service the document does not contain. "No departures on this date" is
//! never an error.

use std::fmt;

use chrono::NaiveDate;

use super::{DaySetError, InvalidDayCode, InvalidServiceId, TimeError};

/// Where in a schedule document a validation failure was found.
///
/// Indices are zero-based positions in the source lists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    /// Service id as written in the source, if the failure is inside a service
    pub service: Option<String>,
    /// Period index and name, if the failure is inside a period
    pub period: Option<(usize, String)>,
    /// Departure rule index within the period
    pub rule: Option<usize>,
}

impl Location {
    /// The document as a whole.
    pub fn document() -> Self {
        Self::default()
    }

    /// A service, by id.
    pub fn service(service: impl Into<String>) -> Self {
        Self {
            service: Some(service.into()),
            ..Self::default()
        }
    }

    /// Narrow to a period of this service.
    pub fn period(mut self, index: usize, name: impl Into<String>) -> Self {
        self.period = Some((index, name.into()));
        self
    }

    /// Narrow to a departure rule of this period.
    pub fn rule(mut self, index: usize) -> Self {
        self.rule = Some(index);
        self
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(service) = &self.service else {
            return f.write_str("document");
        };
        write!(f, "service {service}")?;
        if let Some((index, name)) = &self.period {
            write!(f, ", period #{index} {name:?}")?;
        }
        if let Some(rule) = self.rule {
            write!(f, ", departure #{rule}")?;
        }
        Ok(())
    }
}

/// A structural invariant that the document violates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Invariant {
    /// The document could not be parsed at all
    #[error("malformed document: {0}")]
    Malformed(String),

    #[error(transparent)]
    ServiceId(#[from] InvalidServiceId),

    /// A service id appears twice
    #[error("duplicate service id")]
    DuplicateService,

    /// Timezone is not a known IANA identifier
    #[error("unknown timezone {0:?}")]
    UnknownTimezone(String),

    /// A date field is not an ISO calendar date
    #[error("invalid date {0:?}: expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A period ends before it starts
    #[error("end date {end} is before start date {start}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    /// Two periods of one service share name and date range
    #[error("duplicate period {name:?} for {start}..{end}")]
    DuplicatePeriod {
        name: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    /// A departure time is not a 24-hour HH:MM value
    #[error("{reason} (got {value:?})")]
    InvalidTime { value: String, reason: TimeError },

    #[error(transparent)]
    DayCode(#[from] InvalidDayCode),

    #[error(transparent)]
    Days(#[from] DaySetError),
}

/// A schedule document failed validation.
///
/// The message names the offending service, period or rule and the
/// invariant it violates, e.g.
/// `service ctc, period #0 "Summer", departure #3: days of week must not be empty`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{location}: {invariant}")]
pub struct ValidationError {
    pub location: Location,
    pub invariant: Invariant,
}

impl ValidationError {
    /// Create a new validation error.
    pub fn new(location: Location, invariant: impl Into<Invariant>) -> Self {
        Self {
            location,
            invariant: invariant.into(),
        }
    }
}

/// A query named a service that is not in the document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("service {service_id:?} not found in schedule")]
pub struct NotFoundError {
    pub service_id: String,
}

impl NotFoundError {
    pub fn new(service_id: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
        }
    }
}
