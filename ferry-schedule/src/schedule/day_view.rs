//! Day views: every sailing on one date, across services.
//!
//! For each service the top-precedence period is resolved and its rules are
//! expanded against the date (fan-out). The resulting departures are then
//! filtered by direction and merge-sorted into a single itinerary (fan-in).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Departure, NotFoundError, ScheduleDocument, ServiceId, ServiceSchedule};

use super::recurrence::expand;
use super::resolve::active_period;

/// Which departures to keep, relative to a home location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionFilter {
    /// No filtering
    #[default]
    Any,
    /// Only sailings whose destination is home
    #[serde(rename = "arrive")]
    ArrivalsOnly,
    /// Only sailings whose origin is home
    #[serde(rename = "depart")]
    DeparturesOnly,
}

impl DirectionFilter {
    /// Does this departure pass the filter?
    pub fn keeps(&self, departure: &Departure, home: &str) -> bool {
        match self {
            DirectionFilter::Any => true,
            DirectionFilter::ArrivalsOnly => departure.destination == home,
            DirectionFilter::DeparturesOnly => departure.origin == home,
        }
    }

    /// Short name used in URLs and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectionFilter::Any => "any",
            DirectionFilter::ArrivalsOnly => "arrive",
            DirectionFilter::DeparturesOnly => "depart",
        }
    }
}

impl fmt::Display for DirectionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown direction name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction {0:?} (expected any, arrive or depart)")]
pub struct InvalidDirection(String);

impl FromStr for DirectionFilter {
    type Err = InvalidDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" | "" => Ok(DirectionFilter::Any),
            "arrive" | "arrivals" => Ok(DirectionFilter::ArrivalsOnly),
            "depart" | "departures" => Ok(DirectionFilter::DeparturesOnly),
            other => Err(InvalidDirection(other.to_string())),
        }
    }
}

/// What one service contributed to a day view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceSummary {
    #[serde(rename = "service")]
    pub service_id: ServiceId,
    /// Name of the period in effect, if the service runs that day
    pub period: Option<String>,
    /// Most specific source link: the period's, else the service's
    pub url: Option<String>,
}

impl ServiceSummary {
    /// Display label, e.g. "CTC Summer", or "CTC" when no period applies.
    pub fn label(&self) -> String {
        let id = self.service_id.as_str().to_uppercase();
        match &self.period {
            Some(period) => format!("{id} {period}"),
            None => id,
        }
    }
}

/// The resolved, merged, time-ordered sailings for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayView {
    pub date: NaiveDate,
    pub direction: DirectionFilter,
    pub departures: Vec<Departure>,
    pub services: Vec<ServiceSummary>,
}

impl DayView {
    /// No sailings at all that day ("no service").
    pub fn is_empty(&self) -> bool {
        self.departures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.departures.len()
    }
}

/// Order departures by local time, then service id.
///
/// Origin and destination break any remaining tie so the order is fully
/// reproducible.
fn itinerary_order(a: &Departure, b: &Departure) -> Ordering {
    a.time
        .cmp(&b.time)
        .then_with(|| a.service_id.cmp(&b.service_id))
        .then_with(|| a.origin.cmp(&b.origin))
        .then_with(|| a.destination.cmp(&b.destination))
}

/// Expand one service for one date using its top-precedence period.
fn expand_service(service: &ServiceSchedule, date: NaiveDate) -> (ServiceSummary, Vec<Departure>) {
    let period = active_period(service, date);

    let departures = period
        .map(|p| {
            p.departures()
                .iter()
                .filter_map(|rule| expand(rule, service.id(), date))
                .collect()
        })
        .unwrap_or_default();

    let summary = ServiceSummary {
        service_id: service.id().clone(),
        period: period.map(|p| p.name().to_string()),
        url: period
            .and_then(|p| p.url())
            .or(service.url())
            .map(str::to_string),
    };

    (summary, departures)
}

fn merge<'a>(
    services: impl Iterator<Item = &'a ServiceSchedule>,
    date: NaiveDate,
    direction: DirectionFilter,
    home: &str,
) -> DayView {
    let mut summaries = Vec::new();
    let mut departures = Vec::new();

    for service in services {
        let (summary, expanded) = expand_service(service, date);
        summaries.push(summary);
        departures.extend(expanded);
    }

    departures.retain(|d| direction.keeps(d, home));
    departures.sort_by(itinerary_order);
    summaries.sort_by(|a, b| a.service_id.cmp(&b.service_id));

    debug!(%date, %direction, departures = departures.len(), "built day view");

    DayView {
        date,
        direction,
        departures,
        services: summaries,
    }
}

/// Build the day view for `date` across every service in the document.
///
/// `home` is the location the direction filter is relative to (e.g. the
/// island pier). It is ignored for [`DirectionFilter::Any`]. Returns an
/// empty view, not an error, when nothing sails that day.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use ferry_schedule::canonical::parse_document;
/// use ferry_schedule::schedule::{DirectionFilter, build_day_view};
///
/// let doc = parse_document(r#"
/// services:
///   ctc:
///     tzid: America/New_York
///     schedules:
///       - start: 2025-06-01
///         end: 2025-09-15
///         name: Summer
///         ferries:
///           - time: "06:30"
///             from: Chebeague Island
///             to: Cousins Island
///             byday: [MO, TU, WE, TH, FR]
/// "#).unwrap();
///
/// let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
/// let view = build_day_view(&doc, monday, DirectionFilter::Any, "Chebeague Island");
/// assert_eq!(view.len(), 1);
/// assert_eq!(view.departures[0].time.to_string(), "06:30");
///
/// let saturday = NaiveDate::from_ymd_opt(2025, 6, 7).unwrap();
/// assert!(build_day_view(&doc, saturday, DirectionFilter::Any, "Chebeague Island").is_empty());
/// ```
pub fn build_day_view(
    document: &ScheduleDocument,
    date: NaiveDate,
    direction: DirectionFilter,
    home: &str,
) -> DayView {
    merge(document.services(), date, direction, home)
}

/// Build the day view for `date` across the named services only.
///
/// Fails with [`NotFoundError`] if any id is not in the document. Duplicate
/// ids are considered once.
pub fn build_day_view_for(
    document: &ScheduleDocument,
    service_ids: &[&str],
    date: NaiveDate,
    direction: DirectionFilter,
    home: &str,
) -> Result<DayView, NotFoundError> {
    let mut services = service_ids
        .iter()
        .map(|id| document.service(id))
        .collect::<Result<Vec<_>, _>>()?;
    services.sort_by(|a, b| a.id().cmp(b.id()));
    services.dedup_by(|a, b| a.id() == b.id());

    Ok(merge(services.into_iter(), date, direction, home))
}
