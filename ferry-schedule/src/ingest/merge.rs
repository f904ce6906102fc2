//! Folding a newly ingested period into an existing document.

use tracing::info;

use crate::domain::{
    Location, ScheduleDocument, SchedulePeriod, ServiceId, ServiceSchedule, ValidationError,
    parse_timezone,
};

/// Return a copy of `document` with `period` added to service `service_id`.
///
/// - If the service does not exist it is created in zone `tzid`; an
///   existing service keeps its own zone.
/// - An existing period with the same start date is replaced, so re-running
///   an ingestion is idempotent.
/// - Periods end up ordered by start date.
///
/// `document` itself is left untouched.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use ferry_schedule::domain::{ScheduleDocument, SchedulePeriod};
/// use ferry_schedule::ingest::merge_period;
///
/// let d = |m, day| NaiveDate::from_ymd_opt(2025, m, day).unwrap();
/// let empty = ScheduleDocument::empty();
/// let summer = SchedulePeriod::new("Summer", d(6, 1), d(9, 15), vec![]).unwrap();
///
/// let doc = merge_period(&empty, "ctc", "America/New_York", summer).unwrap();
/// assert_eq!(doc.service("ctc").unwrap().periods().len(), 1);
/// assert!(empty.is_empty());
/// ```
pub fn merge_period(
    document: &ScheduleDocument,
    service_id: &str,
    tzid: &str,
    period: SchedulePeriod,
) -> Result<ScheduleDocument, ValidationError> {
    let location = Location::service(service_id);
    let id = ServiceId::new(service_id.to_string())
        .map_err(|e| ValidationError::new(location.clone(), e))?;

    let mut services: Vec<ServiceSchedule> = document.clone().into_services().collect();

    let position = match services.iter().position(|s| *s.id() == id) {
        Some(position) => position,
        None => {
            let timezone =
                parse_timezone(tzid).map_err(|e| ValidationError::new(location, e))?;
            info!(service = %id, tzid, "adding new service");
            services.push(ServiceSchedule::new(id, timezone, Vec::new()));
            services.len() - 1
        }
    };

    let service = services.swap_remove(position);
    let (id, timezone, url, mut periods) = service.into_parts();

    let before = periods.len();
    periods.retain(|p| p.start_date() != period.start_date());
    info!(
        service = %id,
        period = period.name(),
        start = %period.start_date(),
        replaced = before - periods.len(),
        "merging period"
    );
    periods.push(period);
    periods.sort_by_key(|p| p.start_date());

    let merged = ServiceSchedule::new(id, timezone, periods);
    services.push(match url {
        Some(url) => merged.with_url(url),
        None => merged,
    });

    ScheduleDocument::new(services)
}
