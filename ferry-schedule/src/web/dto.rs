//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

/// Query parameters for the day API.
#[derive(Debug, Default, Deserialize)]
pub struct DayQuery {
    /// "any", "arrive" or "depart" (defaults to any)
    pub direction: Option<String>,

    /// Comma-separated service ids (defaults to all services)
    pub service: Option<String>,
}

impl DayQuery {
    /// The requested service ids, if any were named.
    pub fn service_ids(&self) -> Option<Vec<&str>> {
        self.service.as_deref().map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .collect()
        })
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_ids_split() {
        let query = DayQuery {
            direction: None,
            service: Some("ctc, cbl,,".to_string()),
        };
        assert_eq!(query.service_ids(), Some(vec!["ctc", "cbl"]));
        assert_eq!(DayQuery::default().service_ids(), None);
    }
}
