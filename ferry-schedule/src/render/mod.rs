//! Turning day views into pages.
//!
//! HTML goes through askama templates in `templates/`; plain text is for
//! the command line. Links inside pages are relative to `root`, so the same
//! markup works for the static site ("../") and the server ("/").

mod templates;

use askama::Template;
use chrono::{Days, NaiveDate};

use crate::config::SiteConfig;
use crate::domain::TimeFormat;
use crate::schedule::{DayView, DirectionFilter};

pub use templates::{DateLinkView, DayTemplate, DepartureView, HomeTemplate, ServiceLinkView};

/// Heading for a view's direction.
fn heading(direction: DirectionFilter) -> &'static str {
    match direction {
        DirectionFilter::Any => "All sailings",
        DirectionFilter::ArrivalsOnly => "Arrivals",
        DirectionFilter::DeparturesOnly => "Departures",
    }
}

/// Build the template for a day view.
///
/// Direction colouring is only shown on unfiltered views; on a filtered
/// page every row would be the same colour.
pub fn day_template(view: &DayView, site: &SiteConfig, root: &str) -> DayTemplate {
    let format = site.time_format();
    let departures = view
        .departures
        .iter()
        .map(|d| DepartureView::from_departure(d, &view.services, &site.home, format))
        .collect();
    let services = view.services.iter().map(ServiceLinkView::from_summary).collect();

    let step = |date: Option<NaiveDate>| date.map(|d| d.to_string()).unwrap_or_default();

    DayTemplate {
        title: site.title.clone(),
        root: root.to_string(),
        date: view.date.to_string(),
        date_formatted: view.date.format("%A, %B %-d, %Y").to_string(),
        heading: heading(view.direction).to_string(),
        home: site.home.clone(),
        departures,
        services,
        show_direction_colors: view.direction == DirectionFilter::Any,
        previous: step(view.date.checked_sub_days(Days::new(1))),
        next: step(view.date.checked_add_days(Days::new(1))),
    }
}

/// Render a day view as an HTML page.
pub fn render_day(view: &DayView, site: &SiteConfig, root: &str) -> Result<String, askama::Error> {
    day_template(view, site, root).render()
}

/// Render the landing page listing `dates`.
///
/// The page redirects to today's date when it is listed and otherwise links
/// to the first one.
pub fn render_home(dates: &[NaiveDate], site: &SiteConfig, root: &str) -> Result<String, askama::Error> {
    HomeTemplate {
        title: site.title.clone(),
        root: root.to_string(),
        dates: dates.iter().copied().map(DateLinkView::from_date).collect(),
        fallback_date: dates.first().map(|d| d.to_string()).unwrap_or_default(),
    }
    .render()
}

/// Render a day view as aligned plain text, one sailing per line.
///
/// ```text
/// Monday, June 2, 2025 (All sailings)
///  6:30 AM  CTC  Chebeague Island -> Cousins Island
/// ```
pub fn render_text(view: &DayView, format: TimeFormat) -> String {
    let mut out = format!(
        "{} ({})\n",
        view.date.format("%A, %B %-d, %Y"),
        heading(view.direction)
    );

    if view.is_empty() {
        out.push_str("No service\n");
        return out;
    }

    let width = match format {
        TimeFormat::TwentyFourHour => 5,
        TimeFormat::TwelveHour => 8,
    };
    for d in &view.departures {
        out.push_str(&format!(
            "{:>width$}  {}  {} -> {}\n",
            d.time.display(format),
            d.service_id.as_str().to_uppercase(),
            d.origin,
            d.destination,
        ));
    }
    out
}
