//! Lenient parsing of source text.
//!
//! Times and table cells come from OCR output or scraped HTML, so they are
//! messier than the canonical document: "8:15 PM", "8:15\npm", "NOON",
//! check-mark glyphs. These functions normalize that text; they are only
//! used at ingestion, never when loading the canonical document.

use crate::domain::SailingTime;

/// Source text that is not a recognizable time of day.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("could not parse time {text:?}")]
pub struct ClockError {
    pub text: String,
}

/// Source text that is neither a service mark nor a "no service" mark.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("could not parse service cell {text:?}")]
pub struct CellError {
    pub text: String,
}

/// Glyphs OCR produces for a ticked cell.
const CHECK_MARKS: [&str; 6] = ["✓", "√", "v", ">", "<", "→"];

/// Parse a time of day from timetable text.
///
/// Accepts 24-hour `H:MM`/`HH:MM`, 12-hour `H:MMAM`/`H:MM pm` and `NOON`.
/// Whitespace anywhere (including newlines from wrapped cells) and case are
/// ignored.
///
/// # Examples
///
/// ```
/// use ferry_schedule::ingest::parse_clock;
///
/// assert_eq!(parse_clock("8:15 PM").unwrap().to_string(), "20:15");
/// assert_eq!(parse_clock("12:05am").unwrap().to_string(), "00:05");
/// assert_eq!(parse_clock("Noon").unwrap().to_string(), "12:00");
/// assert_eq!(parse_clock("7:05").unwrap().to_string(), "07:05");
/// assert!(parse_clock("soon").is_err());
/// ```
pub fn parse_clock(text: &str) -> Result<SailingTime, ClockError> {
    let error = || ClockError {
        text: text.to_string(),
    };

    let compact: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase();

    if compact == "NOON" {
        return SailingTime::from_hm(12, 0).ok_or_else(error);
    }

    let (digits, pm) = if let Some(rest) = compact.strip_suffix("PM") {
        (rest, Some(true))
    } else if let Some(rest) = compact.strip_suffix("AM") {
        (rest, Some(false))
    } else {
        (compact.as_str(), None)
    };

    let (hour, minute) = split_hour_minute(digits).ok_or_else(error)?;
    let hour = match pm {
        None => hour,
        Some(_) if !(1..=12).contains(&hour) => return Err(error()),
        Some(true) => hour % 12 + 12,
        Some(false) => hour % 12,
    };

    SailingTime::from_hm(hour, minute).ok_or_else(error)
}

/// Split "H:MM" or "HH:MM" into numbers, without range checks.
fn split_hour_minute(s: &str) -> Option<(u32, u32)> {
    let (hour, minute) = s.split_once(':')?;
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if hour.len() > 2 || minute.len() != 2 || !digits(hour) || !digits(minute) {
        return None;
    }
    Some((hour.parse().ok()?, minute.parse().ok()?))
}

/// Does a timetable cell say the sailing runs that day?
///
/// Empty cells, `false` and anything mentioning "no service" mean it does
/// not; check marks and `true` mean it does. Anything else is an error so
/// OCR noise is surfaced rather than guessed at.
pub fn parse_service_cell(text: &str) -> Result<bool, CellError> {
    let content = text.trim().to_lowercase();

    if content.is_empty() || content == "false" || content.contains("no service") {
        return Ok(false);
    }
    if content == "true" || CHECK_MARKS.contains(&content.as_str()) {
        return Ok(true);
    }

    Err(CellError {
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(s: &str) -> String {
        parse_clock(s).unwrap().to_string()
    }

    #[test]
    fn twenty_four_hour() {
        assert_eq!(clock("06:30"), "06:30");
        assert_eq!(clock("6:30"), "06:30");
        assert_eq!(clock(" 23:59 "), "23:59");
        assert_eq!(clock("00:00"), "00:00");
    }

    #[test]
    fn twelve_hour() {
        assert_eq!(clock("8:15PM"), "20:15");
        assert_eq!(clock("8:15 pm"), "20:15");
        assert_eq!(clock("8:15\nPM"), "20:15");
        assert_eq!(clock("12:30PM"), "12:30");
        assert_eq!(clock("12:30AM"), "00:30");
        assert_eq!(clock("5:45am"), "05:45");
    }

    #[test]
    fn noon() {
        assert_eq!(clock("NOON"), "12:00");
        assert_eq!(clock(" noon\n"), "12:00");
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "   ", "8", "8:5", "24:00", "13:00PM", "0:30AM", "8:75", "8.15", "abc", "1:2:3"] {
            assert_eq!(
                parse_clock(bad),
                Err(ClockError { text: bad.to_string() }),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn service_cells() {
        for yes in ["✓", "√", "v", "V", ">", "<", "→", "true", " TRUE "] {
            assert_eq!(parse_service_cell(yes), Ok(true), "{yes:?}");
        }
        for no in ["", "  ", "false", "No Service", "NO SERVICE Sundays"] {
            assert_eq!(parse_service_cell(no), Ok(false), "{no:?}");
        }
        assert!(parse_service_cell("x").is_err());
        assert!(parse_service_cell("7:00").is_err());
    }
}
