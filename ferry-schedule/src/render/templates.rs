//! Askama templates for schedule pages.

use askama::Template;
use chrono::NaiveDate;

use crate::domain::{Departure, TimeFormat};
use crate::schedule::ServiceSummary;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// One day's sailings.
#[derive(Template)]
#[template(path = "day.html")]
pub struct DayTemplate {
    pub title: String,
    /// Relative path from this page back to the site root, e.g. "../"
    pub root: String,
    pub date: String,
    pub date_formatted: String,
    /// "All sailings", "Arrivals" or "Departures"
    pub heading: String,
    pub home: String,
    pub departures: Vec<DepartureView>,
    pub services: Vec<ServiceLinkView>,
    pub show_direction_colors: bool,
    pub previous: String,
    pub next: String,
}

/// Site landing page: date list plus a redirect to today.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub title: String,
    pub root: String,
    pub dates: Vec<DateLinkView>,
    pub fallback_date: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Departure view model for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureView {
    pub time: String,
    pub origin: String,
    pub destination: String,
    pub service: String,
    pub service_url: Option<String>,
    /// CSS class: "arrive", "depart" or "through"
    pub direction: &'static str,
}

impl DepartureView {
    /// Create from a domain departure.
    pub fn from_departure(
        departure: &Departure,
        services: &[ServiceSummary],
        home: &str,
        format: TimeFormat,
    ) -> Self {
        let service_url = services
            .iter()
            .find(|s| s.service_id == departure.service_id)
            .and_then(|s| s.url.clone());

        let direction = if departure.destination == home {
            "arrive"
        } else if departure.origin == home {
            "depart"
        } else {
            "through"
        };

        Self {
            time: departure.time.display(format),
            origin: departure.origin.clone(),
            destination: departure.destination.clone(),
            service: departure.service_id.as_str().to_uppercase(),
            service_url,
            direction,
        }
    }
}

/// Link to a service's published timetable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceLinkView {
    pub label: String,
    pub url: Option<String>,
}

impl ServiceLinkView {
    pub fn from_summary(summary: &ServiceSummary) -> Self {
        Self {
            label: summary.label(),
            url: summary.url.clone(),
        }
    }
}

/// Date link on the home page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateLinkView {
    pub iso: String,
    /// e.g. "Mon Jun 02"
    pub label: String,
}

impl DateLinkView {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            iso: date.to_string(),
            label: date.format("%a %b %d").to_string(),
        }
    }
}
