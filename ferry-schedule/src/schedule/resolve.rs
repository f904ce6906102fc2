//! Period resolution.
//!
//! A service may publish several overlapping periods, e.g. a seasonal
//! timetable and a one-day holiday override inside it. Resolution picks the
//! periods covering a date and ranks them so that the most specific one
//! comes first. The ranking never depends on the order periods appear in
//! the document.

use std::cmp::Ordering;

use chrono::NaiveDate;
use tracing::trace;

use crate::domain::{SchedulePeriod, ServiceSchedule};

/// Compare two candidate periods by precedence, highest first.
///
/// Ranked by:
/// 1. Span (narrower wins)
/// 2. Start date (later wins)
/// 3. Name (lexical)
/// 4. Contents: departures, then url
///
/// The last key makes the order total, so two periods only compare equal
/// when they are interchangeable.
pub fn precedence(a: &SchedulePeriod, b: &SchedulePeriod) -> Ordering {
    a.span_days()
        .cmp(&b.span_days())
        .then_with(|| b.start_date().cmp(&a.start_date()))
        .then_with(|| a.name().cmp(b.name()))
        .then_with(|| a.departures().cmp(b.departures()))
        .then_with(|| a.url().cmp(&b.url()))
}

/// Periods of `service` in effect on `date`, highest precedence first.
///
/// An empty result is not an error: the service simply has no scheduled
/// sailings that day. Every returned period covers `date`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use chrono_tz::Tz;
/// use ferry_schedule::domain::{SchedulePeriod, ServiceId, ServiceSchedule};
/// use ferry_schedule::schedule::resolve;
///
/// let d = |m, day| NaiveDate::from_ymd_opt(2025, m, day).unwrap();
/// let service = ServiceSchedule::new(
///     ServiceId::new("ctc".to_string()).unwrap(),
///     Tz::America__New_York,
///     vec![
///         SchedulePeriod::new("Summer", d(6, 1), d(9, 15), vec![]).unwrap(),
///         SchedulePeriod::new("HolidayOverride", d(7, 4), d(7, 4), vec![]).unwrap(),
///     ],
/// );
///
/// let ranked = resolve(&service, d(7, 4));
/// assert_eq!(ranked[0].name(), "HolidayOverride");
/// assert_eq!(ranked[1].name(), "Summer");
/// assert!(resolve(&service, d(12, 25)).is_empty());
/// ```
pub fn resolve(service: &ServiceSchedule, date: NaiveDate) -> Vec<&SchedulePeriod> {
    let mut candidates: Vec<&SchedulePeriod> = service
        .periods()
        .iter()
        .filter(|period| period.covers(date))
        .collect();
    candidates.sort_by(|a, b| precedence(a, b));

    trace!(
        service = %service.id(),
        %date,
        candidates = candidates.len(),
        "resolved periods"
    );
    candidates
}

/// The single period whose departures apply on `date`, if any.
pub fn active_period(service: &ServiceSchedule, date: NaiveDate) -> Option<&SchedulePeriod> {
    service
        .periods()
        .iter()
        .filter(|period| period.covers(date))
        .min_by(|a, b| precedence(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DayCode, DaySet, DepartureRule, SailingTime, ServiceId};
    use chrono_tz::Tz;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn period(name: &str, start: NaiveDate, end: NaiveDate) -> SchedulePeriod {
        SchedulePeriod::new(name, start, end, vec![]).unwrap()
    }

    fn service(periods: Vec<SchedulePeriod>) -> ServiceSchedule {
        ServiceSchedule::new(
            ServiceId::new("ctc".to_string()).unwrap(),
            Tz::America__New_York,
            periods,
        )
    }

    fn names(periods: &[&SchedulePeriod]) -> Vec<String> {
        periods.iter().map(|p| p.name().to_string()).collect()
    }

    #[test]
    fn no_periods_resolves_empty() {
        let s = service(vec![]);
        assert!(resolve(&s, date(2025, 6, 1)).is_empty());
        assert!(active_period(&s, date(2025, 6, 1)).is_none());
    }

    #[test]
    fn outside_all_ranges_resolves_empty() {
        let s = service(vec![period("Summer", date(2025, 6, 1), date(2025, 9, 15))]);
        assert!(resolve(&s, date(2025, 5, 31)).is_empty());
        assert!(resolve(&s, date(2025, 9, 16)).is_empty());
    }

    #[test]
    fn bounds_are_inclusive() {
        let s = service(vec![period("Summer", date(2025, 6, 1), date(2025, 9, 15))]);
        assert_eq!(names(&resolve(&s, date(2025, 6, 1))), vec!["Summer"]);
        assert_eq!(names(&resolve(&s, date(2025, 9, 15))), vec!["Summer"]);
    }

    #[test]
    fn narrower_span_wins() {
        let s = service(vec![
            period("Summer", date(2025, 6, 1), date(2025, 9, 15)),
            period("HolidayOverride", date(2025, 7, 4), date(2025, 7, 4)),
        ]);
        let ranked = resolve(&s, date(2025, 7, 4));
        assert_eq!(names(&ranked), vec!["HolidayOverride", "Summer"]);
        assert_eq!(active_period(&s, date(2025, 7, 4)).unwrap().name(), "HolidayOverride");

        // The day after, only the season applies
        assert_eq!(names(&resolve(&s, date(2025, 7, 5))), vec!["Summer"]);
    }

    #[test]
    fn equal_span_later_start_wins() {
        // Two 30-day periods overlapping on June 20
        let s = service(vec![
            period("Later", date(2025, 6, 10), date(2025, 7, 10)),
            period("Earlier", date(2025, 6, 1), date(2025, 7, 1)),
        ]);
        assert_eq!(names(&resolve(&s, date(2025, 6, 20))), vec!["Later", "Earlier"]);
    }

    #[test]
    fn insertion_order_is_irrelevant() {
        let a = period("Summer", date(2025, 6, 1), date(2025, 9, 15));
        let b = period("July", date(2025, 7, 1), date(2025, 7, 31));
        let c = period("Fourth", date(2025, 7, 4), date(2025, 7, 4));
        let forward = service(vec![a.clone(), b.clone(), c.clone()]);
        let backward = service(vec![c, b, a]);

        let d = date(2025, 7, 4);
        assert_eq!(names(&resolve(&forward, d)), vec!["Fourth", "July", "Summer"]);
        assert_eq!(names(&resolve(&forward, d)), names(&resolve(&backward, d)));
    }

    #[test]
    fn identical_ranges_order_by_name() {
        let s = service(vec![
            period("Summer B", date(2025, 6, 1), date(2025, 9, 15)),
            period("Summer A", date(2025, 6, 1), date(2025, 9, 15)),
        ]);
        assert_eq!(names(&resolve(&s, date(2025, 7, 1))), vec!["Summer A", "Summer B"]);
    }

    #[test]
    fn same_name_and_range_ranked_by_contents() {
        let monday = |h, m| {
            DepartureRule::new(
                SailingTime::from_hm(h, m).unwrap(),
                "Chebeague Island",
                "Cousins Island",
                DaySet::new([DayCode::Mo]).unwrap(),
            )
        };
        let summer = |rule| {
            SchedulePeriod::new("Summer", date(2025, 6, 1), date(2025, 9, 15), vec![rule]).unwrap()
        };
        let early = summer(monday(6, 30));
        let late = summer(monday(9, 0));

        let ab = service(vec![early.clone(), late.clone()]);
        let ba = service(vec![late, early]);
        let d = date(2025, 6, 2);

        let times = |s: &ServiceSchedule| -> Vec<SailingTime> {
            resolve(s, d).iter().map(|p| p.departures()[0].time).collect()
        };
        assert_eq!(times(&ab), times(&ba));
        assert_eq!(
            active_period(&ab, d).unwrap().departures(),
            active_period(&ba, d).unwrap().departures()
        );
        assert_eq!(
            active_period(&ab, d).unwrap().departures()[0].time,
            SailingTime::from_hm(6, 30).unwrap()
        );
    }
}
