//! Conversion between canonical DTOs and domain types.
//!
//! DTO → domain is where every structural invariant is checked. The first
//! violation aborts the conversion: a document is never partially built and
//! bad data is never dropped or repaired.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::domain::{
    DayCode, DaySet, DepartureRule, Invariant, Location, SailingTime, ScheduleDocument,
    SchedulePeriod, ServiceId, ServiceSchedule, ValidationError, parse_timezone,
};

use super::types::{RawDocument, RawFerry, RawPeriod, RawService};

/// Date format used by the canonical document.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validate a raw document and build the domain model.
pub fn to_document(raw: &RawDocument) -> Result<ScheduleDocument, ValidationError> {
    let services = raw
        .services
        .iter()
        .map(|(id, service)| convert_service(id, service))
        .collect::<Result<Vec<_>, _>>()?;
    ScheduleDocument::new(services)
}

/// Convert a domain document back into its canonical DTO form.
pub fn from_document(document: &ScheduleDocument) -> RawDocument {
    let services = document
        .services()
        .map(|service| (service.id().to_string(), raw_service(service)))
        .collect();
    RawDocument { services }
}

fn convert_service(id: &str, raw: &RawService) -> Result<ServiceSchedule, ValidationError> {
    let location = Location::service(id);

    let service_id = ServiceId::new(id.to_string())
        .map_err(|e| ValidationError::new(location.clone(), e))?;
    let timezone =
        parse_timezone(&raw.tzid).map_err(|e| ValidationError::new(location.clone(), e))?;

    let periods = raw
        .schedules
        .iter()
        .enumerate()
        .map(|(index, period)| {
            convert_period(period, location.clone().period(index, period.name.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    // One service may not publish the same named range twice
    let mut seen = HashSet::new();
    for (index, period) in periods.iter().enumerate() {
        if !seen.insert((period.start_date(), period.end_date(), period.name())) {
            return Err(ValidationError::new(
                location.clone().period(index, period.name()),
                Invariant::DuplicatePeriod {
                    name: period.name().to_string(),
                    start: period.start_date(),
                    end: period.end_date(),
                },
            ));
        }
    }

    let service = ServiceSchedule::new(service_id, timezone, periods);
    Ok(match &raw.url {
        Some(url) => service.with_url(url.clone()),
        None => service,
    })
}

fn convert_period(raw: &RawPeriod, location: Location) -> Result<SchedulePeriod, ValidationError> {
    let start = parse_date(&raw.start).map_err(|e| ValidationError::new(location.clone(), e))?;
    let end = parse_date(&raw.end).map_err(|e| ValidationError::new(location.clone(), e))?;

    let departures = raw
        .ferries
        .iter()
        .enumerate()
        .map(|(index, ferry)| {
            convert_ferry(ferry).map_err(|e| ValidationError::new(location.clone().rule(index), e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let period = SchedulePeriod::new(raw.name.clone(), start, end, departures)
        .map_err(|e| ValidationError::new(location, e))?;
    Ok(match &raw.url {
        Some(url) => period.with_url(url.clone()),
        None => period,
    })
}

fn convert_ferry(raw: &RawFerry) -> Result<DepartureRule, Invariant> {
    let time = SailingTime::parse_hhmm(raw.time.trim()).map_err(|reason| Invariant::InvalidTime {
        value: raw.time.clone(),
        reason,
    })?;

    let codes = raw
        .byday
        .iter()
        .map(|code| DayCode::parse(code.trim()))
        .collect::<Result<Vec<_>, _>>()?;
    let days = DaySet::new(codes)?;

    Ok(DepartureRule::new(time, raw.from.clone(), raw.to.clone(), days))
}

fn parse_date(s: &str) -> Result<NaiveDate, Invariant> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| Invariant::InvalidDate(s.to_string()))
}

fn raw_service(service: &ServiceSchedule) -> RawService {
    RawService {
        tzid: service.tzid().to_string(),
        url: service.url().map(str::to_string),
        schedules: service.periods().iter().map(raw_period).collect(),
    }
}

fn raw_period(period: &SchedulePeriod) -> RawPeriod {
    RawPeriod {
        start: period.start_date().format(DATE_FORMAT).to_string(),
        end: period.end_date().format(DATE_FORMAT).to_string(),
        name: period.name().to_string(),
        url: period.url().map(str::to_string),
        ferries: period.departures().iter().map(raw_ferry).collect(),
    }
}

fn raw_ferry(rule: &DepartureRule) -> RawFerry {
    RawFerry {
        time: rule.time.to_string(),
        from: rule.origin.clone(),
        to: rule.destination.clone(),
        byday: rule.days.iter().map(|d| d.as_str().to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DaySetError;

    fn ferry(time: &str, byday: &[&str]) -> RawFerry {
        RawFerry {
            time: time.to_string(),
            from: "Chebeague Island".to_string(),
            to: "Cousins Island".to_string(),
            byday: byday.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn period(name: &str, start: &str, end: &str, ferries: Vec<RawFerry>) -> RawPeriod {
        RawPeriod {
            start: start.to_string(),
            end: end.to_string(),
            name: name.to_string(),
            url: None,
            ferries,
        }
    }

    fn document(periods: Vec<RawPeriod>) -> RawDocument {
        let mut raw = RawDocument::default();
        raw.services.insert(
            "ctc".to_string(),
            RawService {
                tzid: "America/New_York".to_string(),
                url: None,
                schedules: periods,
            },
        );
        raw
    }

    #[test]
    fn converts_valid_document() {
        let raw = document(vec![period(
            "Summer",
            "2025-06-01",
            "2025-09-15",
            vec![ferry("06:30", &["MO", "TU", "WE", "TH", "FR"])],
        )]);
        let doc = to_document(&raw).unwrap();
        let service = doc.service("ctc").unwrap();
        assert_eq!(service.tzid(), "America/New_York");
        let period = &service.periods()[0];
        assert_eq!(period.name(), "Summer");
        assert_eq!(period.departures()[0].days, DaySet::weekdays());
    }

    #[test]
    fn rejects_inverted_period() {
        let raw = document(vec![
            period("Spring", "2025-03-01", "2025-05-31", vec![]),
            period("Summer", "2025-09-15", "2025-06-01", vec![]),
        ]);
        let err = to_document(&raw).unwrap_err();
        assert_eq!(err.location, Location::service("ctc").period(1, "Summer"));
        assert!(matches!(err.invariant, Invariant::InvertedRange { .. }));
    }

    #[test]
    fn rejects_empty_byday() {
        let raw = document(vec![period(
            "Summer",
            "2025-06-01",
            "2025-09-15",
            vec![ferry("06:30", &["MO"]), ferry("07:30", &[])],
        )]);
        let err = to_document(&raw).unwrap_err();
        assert_eq!(err.location, Location::service("ctc").period(0, "Summer").rule(1));
        assert_eq!(err.invariant, Invariant::Days(DaySetError::Empty));
    }

    #[test]
    fn rejects_duplicate_and_unknown_days() {
        let raw = document(vec![period(
            "Summer",
            "2025-06-01",
            "2025-09-15",
            vec![ferry("06:30", &["MO", "MO"])],
        )]);
        let err = to_document(&raw).unwrap_err();
        assert_eq!(err.invariant, Invariant::Days(DaySetError::Duplicate(DayCode::Mo)));

        let raw = document(vec![period(
            "Summer",
            "2025-06-01",
            "2025-09-15",
            vec![ferry("06:30", &["MO", "Funday"])],
        )]);
        assert!(matches!(
            to_document(&raw).unwrap_err().invariant,
            Invariant::DayCode(_)
        ));
    }

    #[test]
    fn rejects_repeated_period() {
        let raw = document(vec![
            period("Summer", "2025-06-01", "2025-09-15", vec![ferry("06:30", &["MO"])]),
            period("Winter", "2025-09-16", "2026-05-31", vec![]),
            period("Summer", "2025-06-01", "2025-09-15", vec![ferry("09:00", &["MO"])]),
        ]);
        let err = to_document(&raw).unwrap_err();
        assert_eq!(err.location, Location::service("ctc").period(2, "Summer"));
        assert!(matches!(err.invariant, Invariant::DuplicatePeriod { .. }));

        // Same range under another name is a legitimate overlap
        let raw = document(vec![
            period("Summer", "2025-06-01", "2025-09-15", vec![]),
            period("Summer (revised)", "2025-06-01", "2025-09-15", vec![]),
        ]);
        assert!(to_document(&raw).is_ok());
    }

    #[test]
    fn rejects_bad_times() {
        for bad in ["25:00", "6:30PM", "noon", ""] {
            let raw = document(vec![period(
                "Summer",
                "2025-06-01",
                "2025-09-15",
                vec![ferry(bad, &["MO"])],
            )]);
            let err = to_document(&raw).unwrap_err();
            assert!(
                matches!(err.invariant, Invariant::InvalidTime { .. }),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_bad_dates_and_timezones() {
        let raw = document(vec![period("Summer", "June 1", "2025-09-15", vec![])]);
        assert_eq!(
            to_document(&raw).unwrap_err().invariant,
            Invariant::InvalidDate("June 1".into())
        );

        let mut raw = document(vec![]);
        raw.services.get_mut("ctc").unwrap().tzid = "Eastern".into();
        assert_eq!(
            to_document(&raw).unwrap_err().invariant,
            Invariant::UnknownTimezone("Eastern".into())
        );
    }

    #[test]
    fn rejects_blank_service_id() {
        let mut raw = RawDocument::default();
        raw.services.insert(
            String::new(),
            RawService {
                tzid: "UTC".into(),
                url: None,
                schedules: vec![],
            },
        );
        assert!(matches!(
            to_document(&raw).unwrap_err().invariant,
            Invariant::ServiceId(_)
        ));
    }

    #[test]
    fn from_document_normalizes_day_order() {
        let raw = document(vec![period(
            "Summer",
            "2025-06-01",
            "2025-09-15",
            vec![ferry("06:30", &["SU", "MO"])],
        )]);
        let back = from_document(&to_document(&raw).unwrap());
        assert_eq!(back.services["ctc"].schedules[0].ferries[0].byday, vec!["MO", "SU"]);
    }
}
