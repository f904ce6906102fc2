//! Ferry service schedules.
//!
//! A `ServiceSchedule` is one operator's full schedule history: every
//! period it has published, in no particular order.

use chrono_tz::Tz;

use super::{Invariant, SchedulePeriod, ServiceId};

/// Parse an IANA timezone identifier such as "America/New_York".
pub fn parse_timezone(tzid: &str) -> Result<Tz, Invariant> {
    tzid.parse::<Tz>()
        .map_err(|_| Invariant::UnknownTimezone(tzid.to_string()))
}

/// One transportation operator's schedule.
///
/// All departure times in the periods are local wall-clock times in
/// `timezone`. `periods` may be empty, meaning the service currently has no
/// defined schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSchedule {
    id: ServiceId,
    timezone: Tz,
    url: Option<String>,
    periods: Vec<SchedulePeriod>,
}

impl ServiceSchedule {
    /// Create a new service schedule.
    pub fn new(id: ServiceId, timezone: Tz, periods: Vec<SchedulePeriod>) -> Self {
        Self {
            id,
            timezone,
            url: None,
            periods,
        }
    }

    /// Attach the operator's schedule URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn id(&self) -> &ServiceId {
        &self.id
    }

    /// The zone all departure times are expressed in.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// The IANA name of the timezone.
    pub fn tzid(&self) -> &'static str {
        self.timezone.name()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn periods(&self) -> &[SchedulePeriod] {
        &self.periods
    }

    /// Consume the service, returning its periods.
    pub(crate) fn into_parts(self) -> (ServiceId, Tz, Option<String>, Vec<SchedulePeriod>) {
        (self.id, self.timezone, self.url, self.periods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_timezones() {
        assert_eq!(parse_timezone("America/New_York").unwrap(), Tz::America__New_York);
        assert_eq!(parse_timezone("UTC").unwrap(), Tz::UTC);
    }

    #[test]
    fn reject_unknown_timezones() {
        assert_eq!(
            parse_timezone("Mars/Olympus_Mons").unwrap_err(),
            Invariant::UnknownTimezone("Mars/Olympus_Mons".into())
        );
        assert!(parse_timezone("").is_err());
    }

    #[test]
    fn empty_service_is_valid() {
        let id = ServiceId::new("ctc".to_string()).unwrap();
        let service = ServiceSchedule::new(id, Tz::America__New_York, vec![]);
        assert!(service.periods().is_empty());
        assert_eq!(service.tzid(), "America/New_York");
        assert_eq!(service.url(), None);
    }

    #[test]
    fn with_url() {
        let id = ServiceId::new("cbl".to_string()).unwrap();
        let service = ServiceSchedule::new(id, Tz::America__New_York, vec![])
            .with_url("https://www.cascobaylines.com");
        assert_eq!(service.url(), Some("https://www.cascobaylines.com"));
        assert_eq!(service.id().as_str(), "cbl");
    }
}
