//! Schedule queries.
//!
//! Three stages, each a pure function over the validated document:
//! - recurrence: does a rule run on a date?
//! - resolution: which period of a service is in effect on a date?
//! - day views: every sailing on a date, merged across services.

mod day_view;
mod recurrence;
mod resolve;

pub use day_view::{
    DayView, DirectionFilter, InvalidDirection, ServiceSummary, build_day_view,
    build_day_view_for,
};
pub use recurrence::{expand, fires_on, local_date};
pub use resolve::{active_period, precedence, resolve};
