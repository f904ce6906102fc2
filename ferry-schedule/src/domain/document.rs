//! The canonical schedule document.

use std::collections::BTreeMap;

use super::{Invariant, Location, NotFoundError, ServiceId, ServiceSchedule, ValidationError};

/// Every service's schedule, keyed by service id.
///
/// Built once per load and read-only afterwards; queries borrow it and
/// several may run against the same document concurrently.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScheduleDocument {
    services: BTreeMap<ServiceId, ServiceSchedule>,
}

impl ScheduleDocument {
    /// Build a document, rejecting duplicate service ids.
    pub fn new(
        services: impl IntoIterator<Item = ServiceSchedule>,
    ) -> Result<Self, ValidationError> {
        let mut map = BTreeMap::new();
        for service in services {
            let id = service.id().clone();
            if map.contains_key(&id) {
                return Err(ValidationError::new(
                    Location::service(id.as_str()),
                    Invariant::DuplicateService,
                ));
            }
            map.insert(id, service);
        }
        Ok(Self { services: map })
    }

    /// A document with no services.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a service by id.
    pub fn service(&self, id: &str) -> Result<&ServiceSchedule, NotFoundError> {
        self.services.get(id).ok_or_else(|| NotFoundError::new(id))
    }

    /// All services, ordered by id.
    pub fn services(&self) -> impl Iterator<Item = &ServiceSchedule> {
        self.services.values()
    }

    /// All service ids, in order.
    pub fn service_ids(&self) -> impl Iterator<Item = &ServiceId> {
        self.services.keys()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub(crate) fn into_services(self) -> impl Iterator<Item = ServiceSchedule> {
        self.services.into_values()
    }
}
