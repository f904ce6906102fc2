//! Canonical schedule document format.
//!
//! Every input source (scanned timetables, scraped web pages) is normalized
//! into one YAML document before it is queried:
//!
//! ```yaml
//! services:
//!   ctc:
//!     tzid: America/New_York
//!     schedules:
//!       - start: 2025-06-01
//!         end: 2025-09-15
//!         name: Summer
//!         ferries:
//!           - time: "06:30"
//!             from: Chebeague Island
//!             to: Cousins Island
//!             byday: [MO, TU, WE, TH, FR]
//! ```
//!
//! Loading then saving preserves every value. Key order, quoting and the
//! order of weekday codes may change.

mod convert;
mod types;

use std::path::Path;

use tracing::{debug, info};

use crate::domain::{Invariant, Location, ScheduleDocument, ValidationError};
use crate::error::Error;

pub use convert::{from_document, to_document};
pub use types::{RawDocument, RawFerry, RawPeriod, RawService};

/// Parse and validate a YAML schedule document.
pub fn parse_document(yaml: &str) -> Result<ScheduleDocument, ValidationError> {
    let raw: RawDocument = serde_yaml::from_str(yaml).map_err(|e| {
        ValidationError::new(Location::document(), Invariant::Malformed(e.to_string()))
    })?;
    to_document(&raw)
}

/// Serialize a document to canonical YAML.
pub fn to_yaml_string(document: &ScheduleDocument) -> Result<String, Error> {
    Ok(serde_yaml::to_string(&from_document(document))?)
}

/// Load and validate a schedule file.
pub fn load(path: &Path) -> Result<ScheduleDocument, Error> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let document = parse_document(&contents)?;
    info!(
        path = %path.display(),
        services = document.len(),
        "loaded schedule"
    );
    Ok(document)
}

/// Load a schedule file, or start an empty document if it does not exist.
pub fn load_or_empty(path: &Path) -> Result<ScheduleDocument, Error> {
    if path.exists() {
        load(path)
    } else {
        debug!(path = %path.display(), "no schedule file yet, starting empty");
        Ok(ScheduleDocument::empty())
    }
}

/// Write a document to a file as canonical YAML.
///
/// Parent directories are created as needed.
pub fn save(document: &ScheduleDocument, path: &Path) -> Result<(), Error> {
    let yaml = to_yaml_string(document)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    std::fs::write(path, yaml).map_err(|e| Error::io(path, e))?;
    info!(path = %path.display(), services = document.len(), "saved schedule");
    Ok(())
}
