//! Service identifier type.

use std::borrow::Borrow;
use std::fmt;

use serde::Serialize;

/// Error returned when constructing an invalid service identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid service id: {reason}")]
pub struct InvalidServiceId {
    reason: &'static str,
}

/// A stable identifier for one ferry operator's schedule (e.g. "ctc").
///
/// Service ids are free-form operator codes. The only validation is that
/// they must be non-empty and free of surrounding whitespace.
///
/// # Examples
///
/// ```
/// use ferry_schedule::domain::ServiceId;
///
/// let id = ServiceId::new("ctc".to_string()).unwrap();
/// assert_eq!(id.as_str(), "ctc");
///
/// // Empty strings are rejected
/// assert!(ServiceId::new("".to_string()).is_err());
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ServiceId(String);

impl ServiceId {
    /// Create a new service id from a string.
    pub fn new(s: String) -> Result<Self, InvalidServiceId> {
        if s.is_empty() {
            return Err(InvalidServiceId {
                reason: "service id cannot be empty",
            });
        }
        if s.trim() != s {
            return Err(InvalidServiceId {
                reason: "service id cannot have leading or trailing whitespace",
            });
        }
        Ok(ServiceId(s))
    }

    /// Returns the service id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the ServiceId and returns the inner String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

// Ord on the newtype matches Ord on the inner String, so map lookups by
// `&str` agree with lookups by `&ServiceId`.
impl Borrow<str> for ServiceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceId({})", self.0)
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Roundtrip: new then as_str returns the original
        #[test]
        fn roundtrip(s in "[a-z][a-z0-9-]{0,12}") {
            let id = ServiceId::new(s.clone()).unwrap();
            prop_assert_eq!(id.as_str(), s.as_str());
        }

        /// Ordering agrees with the underlying strings
        #[test]
        fn ordering_matches_strings(a in "[a-z]{1,6}", b in "[a-z]{1,6}") {
            let ia = ServiceId::new(a.clone()).unwrap();
            let ib = ServiceId::new(b.clone()).unwrap();
            prop_assert_eq!(ia.cmp(&ib), a.cmp(&b));
        }
    }
}
