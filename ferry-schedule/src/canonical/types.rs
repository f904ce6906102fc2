//! Canonical document DTOs.
//!
//! These types map directly onto the YAML keys of the canonical schedule
//! document. Every scalar is kept as a string so that validation can report
//! exactly which value was wrong and where.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top level of a schedule document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    /// Services keyed by service id.
    #[serde(default)]
    pub services: BTreeMap<String, RawService>,
}

/// One operator's schedules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawService {
    /// IANA timezone of all times in this service.
    pub tzid: String,

    /// Operator schedule page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Periods, in any order.
    #[serde(default)]
    pub schedules: Vec<RawPeriod>,
}

/// One date-bounded timetable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPeriod {
    /// First day in effect (YYYY-MM-DD).
    pub start: String,

    /// Last day in effect, inclusive (YYYY-MM-DD).
    pub end: String,

    pub name: String,

    /// Page the timetable was taken from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default)]
    pub ferries: Vec<RawFerry>,
}

/// One recurring sailing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFerry {
    /// Departure time, "HH:MM" 24-hour.
    pub time: String,

    pub from: String,

    pub to: String,

    /// Weekday codes, e.g. ["MO", "TU"].
    pub byday: Vec<String>,
}
