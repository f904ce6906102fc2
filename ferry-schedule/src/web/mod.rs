//! Web layer for the ferry schedule.
//!
//! Serves the same pages as the static site, rendered on demand, plus a
//! JSON day-view API.

mod cache;
mod dto;
mod routes;
mod state;

pub use cache::{PageCache, PageEntry, PageKey};
pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, SharedSchedule};
