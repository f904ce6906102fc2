//! Static site export.
//!
//! Layout of the output directory:
//!
//! ```text
//! index.html                  landing page, redirects to today
//! static/styles.css
//! <date>/index.html           all sailings, direction colouring on
//! <date>/arrive/index.html    sailings arriving at home
//! <date>/depart/index.html    sailings leaving home
//! <date>/departures.json      the day view as JSON
//! ```
//!
//! Every day is an independent day-view query against the same document.

use std::path::{Path, PathBuf};

use chrono::{Days, NaiveDate};
use tracing::{debug, info, warn};

use crate::config::SiteConfig;
use crate::domain::ScheduleDocument;
use crate::error::Error;
use crate::render::{render_day, render_home};
use crate::schedule::{DirectionFilter, build_day_view};

/// Summary of one published day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedDay {
    pub date: NaiveDate,
    /// Sailings on the unfiltered page
    pub departures: usize,
}

/// What a publish run wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub days: Vec<PublishedDay>,
    /// HTML and JSON files written, including the landing page
    pub files_written: usize,
    /// Whether the stylesheet was found and copied
    pub stylesheet_copied: bool,
}

impl PublishReport {
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.iter().map(|d| d.date)
    }

    /// Days with no sailings at all.
    pub fn days_without_service(&self) -> usize {
        self.days.iter().filter(|d| d.departures == 0).count()
    }
}

/// The pages of one day: (path under the date directory, filter, link root).
const DAY_PAGES: [(&str, DirectionFilter, &str); 3] = [
    ("index.html", DirectionFilter::Any, "../"),
    ("arrive/index.html", DirectionFilter::ArrivalsOnly, "../../"),
    ("depart/index.html", DirectionFilter::DeparturesOnly, "../../"),
];

fn write_file(path: &Path, contents: &str) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    std::fs::write(path, contents).map_err(|e| Error::io(path, e))?;
    debug!(path = %path.display(), "wrote");
    Ok(())
}

/// Copy `styles.css` into `<output>/static/`. A missing stylesheet is only a
/// warning; the pages are still usable without it.
fn copy_stylesheet(static_dir: &Path, output_dir: &Path) -> Result<bool, Error> {
    let source = static_dir.join("styles.css");
    if !source.is_file() {
        warn!(path = %source.display(), "stylesheet not found, publishing without it");
        return Ok(false);
    }

    let target_dir = output_dir.join("static");
    std::fs::create_dir_all(&target_dir).map_err(|e| Error::io(&target_dir, e))?;
    let target = target_dir.join("styles.css");
    std::fs::copy(&source, &target).map_err(|e| Error::io(&source, e))?;
    debug!(from = %source.display(), to = %target.display(), "copied stylesheet");
    Ok(true)
}

/// Publish `site.days` consecutive days starting at `start_date`.
pub fn publish_site(
    document: &ScheduleDocument,
    site: &SiteConfig,
    output_dir: &Path,
    start_date: NaiveDate,
) -> Result<PublishReport, Error> {
    std::fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;

    let mut report = PublishReport {
        stylesheet_copied: copy_stylesheet(&site.static_dir, output_dir)?,
        ..PublishReport::default()
    };

    let dates: Vec<NaiveDate> = (0..u64::from(site.days))
        .map_while(|offset| start_date.checked_add_days(Days::new(offset)))
        .collect();

    for &date in &dates {
        let date_dir: PathBuf = output_dir.join(date.to_string());

        for (page, direction, root) in DAY_PAGES {
            let view = build_day_view(document, date, direction, &site.home);
            write_file(&date_dir.join(page), &render_day(&view, site, root)?)?;
            report.files_written += 1;

            if direction == DirectionFilter::Any {
                let json = serde_json::to_string_pretty(&view)?;
                write_file(&date_dir.join("departures.json"), &json)?;
                report.files_written += 1;
                report.days.push(PublishedDay {
                    date,
                    departures: view.len(),
                });
            }
        }
    }

    write_file(&output_dir.join("index.html"), &render_home(&dates, site, "")?)?;
    report.files_written += 1;

    info!(
        output = %output_dir.display(),
        days = report.days.len(),
        files = report.files_written,
        without_service = report.days_without_service(),
        "published site"
    );
    Ok(report)
}
