//! Domain types for ferry schedules.
//!
//! This module contains the schedule document model: services, their
//! date-bounded periods, and the recurring departures in each period. All
//! types enforce their invariants at construction time, so code that
//! receives these types can trust their validity.

mod departure;
mod document;
mod error;
mod period;
mod service;
mod service_id;
mod time;
mod weekday;

pub use departure::Departure;
pub use document::ScheduleDocument;
pub use error::{Invariant, Location, NotFoundError, ValidationError};
pub use period::{DepartureRule, SchedulePeriod};
pub use service::{ServiceSchedule, parse_timezone};
pub use service_id::{InvalidServiceId, ServiceId};
pub use time::{SailingTime, TimeError, TimeFormat};
pub use weekday::{DayCode, DaySet, DaySetError, InvalidDayCode};
