//! Recurrence expansion.
//!
//! A departure rule repeats weekly on its day set. There are no exceptions
//! or holidays at this level: an exception is a separate, narrower period
//! (see [`super::active_period`]).

use chrono::{DateTime, NaiveDate, TimeZone};

use crate::domain::{Departure, DepartureRule, ServiceId};

/// Does `rule` run on `date`?
///
/// `date` is a calendar date in the service's own timezone; use
/// [`local_date`] to obtain it from an instant. Total and pure: every rule
/// and date yields a definite answer.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use ferry_schedule::domain::{DaySet, DepartureRule, SailingTime};
/// use ferry_schedule::schedule::fires_on;
///
/// let rule = DepartureRule::new(
///     SailingTime::parse_hhmm("06:30").unwrap(),
///     "Chebeague Island",
///     "Cousins Island",
///     DaySet::weekdays(),
/// );
/// let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
/// let saturday = NaiveDate::from_ymd_opt(2025, 6, 7).unwrap();
/// assert!(fires_on(&rule, monday));
/// assert!(!fires_on(&rule, saturday));
/// ```
pub fn fires_on(rule: &DepartureRule, date: NaiveDate) -> bool {
    rule.days.includes(date)
}

/// Expand a rule against a date into a concrete departure, if it runs.
pub fn expand(rule: &DepartureRule, service_id: &ServiceId, date: NaiveDate) -> Option<Departure> {
    fires_on(rule, date).then(|| Departure {
        date,
        time: rule.time,
        origin: rule.origin.clone(),
        destination: rule.destination.clone(),
        service_id: service_id.clone(),
    })
}

/// The calendar date an instant falls on in the given timezone.
///
/// Weekday membership must be judged on the service's local date, never the
/// server's: 02:00 UTC on a Tuesday is still Monday evening in New York.
pub fn local_date<Z: TimeZone, L: TimeZone>(instant: &DateTime<Z>, zone: &L) -> NaiveDate {
    instant.with_timezone(zone).date_naive()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{DayCode, DaySet, SailingTime};
    use chrono::Datelike;
    use proptest::prelude::*;

    fn day_set() -> impl Strategy<Value = DaySet> {
        proptest::sample::subsequence(DayCode::ALL.to_vec(), 1..=7)
            .prop_map(|codes| DaySet::new(codes).unwrap())
    }

    proptest! {
        /// fires_on is true iff the date's weekday is in the rule's day set
        #[test]
        fn fires_iff_weekday_in_set(days in day_set(), offset in 0i64..40_000) {
            let d = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap() + chrono::Duration::days(offset);
            let r = DepartureRule::new(SailingTime::from_hm(8, 0).unwrap(), "A", "B", days);
            let code = DayCode::from(d.weekday());
            prop_assert_eq!(fires_on(&r, d), days.contains(code));
        }

        /// Over any seven consecutive days a rule fires exactly |days| times
        #[test]
        fn fires_len_times_per_week(days in day_set(), offset in 0i64..40_000) {
            let start = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap() + chrono::Duration::days(offset);
            let r = DepartureRule::new(SailingTime::from_hm(8, 0).unwrap(), "A", "B", days);
            let count = (0..7)
                .filter(|i| fires_on(&r, start + chrono::Duration::days(*i)))
                .count();
            prop_assert_eq!(count, days.len());
        }
    }
}
