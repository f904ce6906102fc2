//! Concrete departures.

use chrono::NaiveDate;
use serde::Serialize;

use super::{SailingTime, ServiceId};

/// One sailing on one calendar date.
///
/// Derived by expanding a `DepartureRule` against a date; produced fresh per
/// query and never stored in the document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Departure {
    pub date: NaiveDate,
    pub time: SailingTime,
    #[serde(rename = "from")]
    pub origin: String,
    #[serde(rename = "to")]
    pub destination: String,
    #[serde(rename = "service")]
    pub service_id: ServiceId,
}
