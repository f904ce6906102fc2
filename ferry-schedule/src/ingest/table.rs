//! Shuttle timetables extracted from images.
//!
//! The extraction step produces a grid whose first row is a header and
//! whose remaining rows look like:
//!
//! ```text
//! label, leave <A> time, leave <B> time, MO, TU, WE, TH, FR, SA, SU
//! ```
//!
//! Each row yields two sailings (A→B and B→A) running on the same days.
//! Extraction is noisy, so a bad row is reported and skipped rather than
//! failing the whole table.

use std::io;
use std::path::Path;

use tracing::{debug, warn};

use crate::domain::{DayCode, DaySet, DepartureRule};
use crate::error::Error;

use super::clock::{parse_clock, parse_service_cell};

/// Column holding the first day cell; days follow Monday first.
const FIRST_DAY_COLUMN: usize = 3;

/// Which locations the two time columns leave from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    /// Origin of the second column's sailings
    pub outbound_from: String,
    /// Origin of the third column's sailings
    pub outbound_to: String,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self::new("Chebeague Island", "Cousins Island")
    }
}

impl TableLayout {
    pub fn new(outbound_from: impl Into<String>, outbound_to: impl Into<String>) -> Self {
        Self {
            outbound_from: outbound_from.into(),
            outbound_to: outbound_to.into(),
        }
    }
}

/// A table row that produced no sailings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// Row index in the table, counting the header as 0
    pub row: usize,
    pub reason: String,
}

/// Outcome of converting a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableReport {
    pub rules: Vec<DepartureRule>,
    pub skipped: Vec<SkippedRow>,
    /// Day cells that could not be read and were treated as "no service"
    pub unreadable_cells: usize,
}

/// Convert an extracted table into departure rules.
///
/// The header row is ignored, as are rows with no outbound time (spacers
/// and footnotes). Rows whose times do not parse, or that run on no day at
/// all, are skipped and recorded in the report.
pub fn rules_from_table(table: &[Vec<String>], layout: &TableLayout) -> TableReport {
    let mut report = TableReport::default();

    for (index, row) in table.iter().enumerate().skip(1) {
        if row.get(1).is_none_or(|cell| cell.trim().is_empty()) {
            debug!(row = index, "skipping row without a time");
            continue;
        }

        let times = parse_clock(&row[1]).and_then(|outbound| {
            let inbound = parse_clock(row.get(2).map_or("", String::as_str))?;
            Ok((outbound, inbound))
        });
        let (outbound, inbound) = match times {
            Ok(times) => times,
            Err(e) => {
                warn!(row = index, error = %e, "skipping row");
                report.skipped.push(SkippedRow {
                    row: index,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let mut days = Vec::new();
        for (offset, code) in DayCode::ALL.into_iter().enumerate() {
            let column = FIRST_DAY_COLUMN + offset;
            let Some(cell) = row.get(column) else {
                continue;
            };
            match parse_service_cell(cell) {
                Ok(true) => days.push(code),
                Ok(false) => {}
                Err(e) => {
                    warn!(row = index, column, error = %e, "treating cell as no service");
                    report.unreadable_cells += 1;
                }
            }
        }

        let Ok(days) = DaySet::new(days) else {
            warn!(row = index, "skipping row with no service days");
            report.skipped.push(SkippedRow {
                row: index,
                reason: "no service days".to_string(),
            });
            continue;
        };

        report.rules.push(DepartureRule::new(
            outbound,
            layout.outbound_from.clone(),
            layout.outbound_to.clone(),
            days,
        ));
        report.rules.push(DepartureRule::new(
            inbound,
            layout.outbound_to.clone(),
            layout.outbound_from.clone(),
            days,
        ));
    }

    report
}

/// Read an extracted table from CSV. Rows may have differing lengths.
pub fn read_table(reader: impl io::Read) -> Result<Vec<Vec<String>>, csv::Error> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
        .records()
        .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
        .collect()
}

/// Read an extracted table from a CSV file.
pub fn read_table_file(path: &Path) -> Result<Vec<Vec<String>>, Error> {
    let file = std::fs::File::open(path).map_err(|e| Error::io(path, e))?;
    let table = read_table(file)?;
    debug!(path = %path.display(), rows = table.len(), "read table");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CTC_TABLE: &str = "\
Ferry,Leave Chebeague,Leave Cousins,Mon,Tue,Wed,Thu,Fri,Sat,Sun
1,6:30AM,7:00AM,✓,✓,✓,✓,✓,,
2,NOON,12:30 PM,✓,✓,✓,✓,✓,✓,✓
,,,,,,,,,
3,\"8:15\nPM\",8:45PM,,,,,✓,✓,No Service
4,late,9:00PM,✓,✓,✓,✓,✓,✓,✓
5,10:00PM,10:30PM,,,,,,,
6,11:00PM,11:30PM,?,✓,✓,✓,✓,,
";

    fn table() -> Vec<Vec<String>> {
        read_table(CTC_TABLE.as_bytes()).unwrap()
    }

    fn describe(rule: &DepartureRule) -> String {
        format!("{} {}->{} {}", rule.time, rule.origin, rule.destination, rule.days.describe())
    }

    #[test]
    fn reads_flexible_csv() {
        let t = read_table("a,b\nc\n".as_bytes()).unwrap();
        assert_eq!(t, vec![vec!["a".to_string(), "b".to_string()], vec!["c".to_string()]]);
    }

    #[test]
    fn converts_rows_into_paired_rules() {
        let report = rules_from_table(&table(), &TableLayout::default());
        let rules: Vec<String> = report.rules.iter().map(describe).collect();
        assert_eq!(
            rules,
            vec![
                "06:30 Chebeague Island->Cousins Island weekdays",
                "07:00 Cousins Island->Chebeague Island weekdays",
                "12:00 Chebeague Island->Cousins Island every day",
                "12:30 Cousins Island->Chebeague Island every day",
                "20:15 Chebeague Island->Cousins Island FR SA",
                "20:45 Cousins Island->Chebeague Island FR SA",
                "23:00 Chebeague Island->Cousins Island TU WE TH FR",
                "23:30 Cousins Island->Chebeague Island TU WE TH FR",
            ]
        );
    }

    #[test]
    fn reports_skipped_rows_and_bad_cells() {
        let report = rules_from_table(&table(), &TableLayout::default());
        let skipped: Vec<usize> = report.skipped.iter().map(|s| s.row).collect();
        assert_eq!(skipped, vec![5, 6]);
        assert!(report.skipped[0].reason.contains("late"));
        assert_eq!(report.skipped[1].reason, "no service days");
        assert_eq!(report.unreadable_cells, 1);
    }

    #[test]
    fn custom_layout() {
        let layout = TableLayout::new("Portland", "Chebeague Island");
        let t = vec![
            vec!["header".to_string()],
            ["1", "5:45AM", "6:50AM", "v", "v", "v", "v", "v", "v", "v"]
                .map(str::to_string)
                .to_vec(),
        ];
        let report = rules_from_table(&t, &layout);
        assert_eq!(report.rules[0].origin, "Portland");
        assert_eq!(report.rules[1].origin, "Chebeague Island");
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn empty_table() {
        assert_eq!(rules_from_table(&[], &TableLayout::default()), TableReport::default());
    }

    #[test]
    fn read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_table_file(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
