//! Turning source material into schedule periods.
//!
//! Sources (timetable images, scraped pages) are not read here; their
//! extraction output is. A source produces either a raw table
//! ([`rules_from_table`]) or a list of rows ([`PeriodDraft`]), which is
//! validated into a `SchedulePeriod` and merged into the document with
//! [`merge_period`].

mod clock;
mod draft;
mod merge;
mod table;

pub use clock::{CellError, ClockError, parse_clock, parse_service_cell};
pub use draft::{DraftError, PeriodDraft, ScheduleRow};
pub use merge::merge_period;
pub use table::{
    SkippedRow, TableLayout, TableReport, read_table, read_table_file, rules_from_table,
};
