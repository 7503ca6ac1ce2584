#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CSV dataset loader.
//!
//! Reads a crime-incident CSV export with a header row and returns the raw
//! [`Incident`] rows. Columns are looked up by header name, so exports with
//! extra or reordered columns load unchanged.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crime_stats_crime_models::Incident;
use serde::Deserialize;

/// Errors that can occur while loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// I/O error (file open/read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parse error.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// A configured column is not present in the header row.
    #[error("Column '{column}' not found in CSV header")]
    MissingColumn {
        /// Configured header name.
        column: String,
    },

    /// The victim age cell holds something other than an integer.
    #[error("Invalid victim age '{value}' on line {line}")]
    InvalidAge {
        /// The raw cell value.
        value: String,
        /// 1-based line number in the CSV file.
        line: u64,
    },

    /// A record ends before one of the configured columns.
    #[error("Record on line {line} is missing column '{column}'")]
    ShortRecord {
        /// Configured header name of the first absent cell.
        column: String,
        /// 1-based line number in the CSV file.
        line: u64,
    },

    /// A required cell is empty.
    #[error("Empty '{column}' on line {line}")]
    EmptyField {
        /// Configured header name.
        column: String,
        /// 1-based line number in the CSV file.
        line: u64,
    },
}

/// Header names of the columns the loader reads.
///
/// Defaults to the headers of the Los Angeles open-data crime export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    /// Report date column (`MM/dd/yyyy ...`).
    pub report_date: String,
    /// Unique report number column.
    pub report_no: String,
    /// Offense description column.
    pub crime_description: String,
    /// Victim age column. Empty cells mean no age.
    pub victim_age: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            report_date: "Date Rptd".to_string(),
            report_no: "DR_NO".to_string(),
            crime_description: "Crm Cd Desc".to_string(),
            victim_age: "Vict Age".to_string(),
        }
    }
}

/// Resolved header positions for a [`ColumnMapping`].
struct ColumnIndices {
    report_date: usize,
    report_no: usize,
    crime_description: usize,
    victim_age: usize,
}

impl ColumnIndices {
    fn resolve(headers: &[String], columns: &ColumnMapping) -> Result<Self, LoadError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| LoadError::MissingColumn {
                    column: name.to_string(),
                })
        };

        Ok(Self {
            report_date: find(&columns.report_date)?,
            report_no: find(&columns.report_no)?,
            crime_description: find(&columns.crime_description)?,
            victim_age: find(&columns.victim_age)?,
        })
    }
}

fn cell<'a>(
    record: &'a csv::StringRecord,
    index: usize,
    column: &str,
    line: u64,
) -> Result<&'a str, LoadError> {
    record
        .get(index)
        .map(str::trim)
        .ok_or_else(|| LoadError::ShortRecord {
            column: column.to_string(),
            line,
        })
}

fn required_cell<'a>(
    record: &'a csv::StringRecord,
    index: usize,
    column: &str,
    line: u64,
) -> Result<&'a str, LoadError> {
    let value = cell(record, index, column, line)?;
    if value.is_empty() {
        return Err(LoadError::EmptyField {
            column: column.to_string(),
            line,
        });
    }
    Ok(value)
}

fn parse_age(raw: &str, line: u64) -> Result<Option<i32>, LoadError> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i32>()
        .map(Some)
        .map_err(|_| LoadError::InvalidAge {
            value: raw.to_string(),
            line,
        })
}

/// Reads incidents from CSV data with a header row.
///
/// # Errors
///
/// Returns [`LoadError`] if the CSV cannot be parsed, a configured column is
/// missing, a record is shorter than the configured columns, a report number
/// or crime description is empty, or a victim age is not an integer.
pub fn read_incidents<R: Read>(
    reader: R,
    columns: &ColumnMapping,
) -> Result<Vec<Incident>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();
    let idx = ColumnIndices::resolve(&headers, columns)?;

    let mut incidents = Vec::new();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, csv::Position::line);

        incidents.push(Incident {
            report_date: cell(&record, idx.report_date, &columns.report_date, line)?.to_owned(),
            report_no: required_cell(&record, idx.report_no, &columns.report_no, line)?
                .to_owned(),
            crime_description: required_cell(
                &record,
                idx.crime_description,
                &columns.crime_description,
                line,
            )?
            .to_owned(),
            victim_age: parse_age(cell(&record, idx.victim_age, &columns.victim_age, line)?, line)?,
        });
    }

    log::debug!("Parsed {} incident rows", incidents.len());

    Ok(incidents)
}

/// Loads incidents from a CSV file on disk.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be opened or read.
pub fn load_incidents(path: &Path, columns: &ColumnMapping) -> Result<Vec<Incident>, LoadError> {
    log::info!("Loading incidents from {}", path.display());
    let file = File::open(path)?;
    let incidents = read_incidents(file, columns)?;
    log::info!("Loaded {} incidents from {}", incidents.len(), path.display());
    Ok(incidents)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LA_SAMPLE: &str = "\
DR_NO,Date Rptd,DATE OCC,AREA NAME,Crm Cd Desc,Vict Age
010304468,01/08/2020 12:00:00 AM,01/08/2020 12:00:00 AM,Southwest,BATTERY - SIMPLE ASSAULT,36
190101086,01/02/2020 12:00:00 AM,01/01/2020 12:00:00 AM,Central,VEHICLE - STOLEN,
200110444,04/14/2020 12:00:00 AM,02/13/2020 12:00:00 AM,Central,\"THEFT FROM MOTOR VEHICLE - PETTY ($950 & UNDER)\",0
";

    #[test]
    fn reads_la_export() {
        let incidents = read_incidents(LA_SAMPLE.as_bytes(), &ColumnMapping::default()).unwrap();
        assert_eq!(incidents.len(), 3);
        assert_eq!(incidents[0].report_no, "010304468");
        assert_eq!(incidents[0].report_date, "01/08/2020 12:00:00 AM");
        assert_eq!(incidents[0].crime_description, "BATTERY - SIMPLE ASSAULT");
        assert_eq!(incidents[0].victim_age, Some(36));
        assert_eq!(incidents[1].victim_age, None);
        assert_eq!(
            incidents[2].crime_description,
            "THEFT FROM MOTOR VEHICLE - PETTY ($950 & UNDER)"
        );
        assert_eq!(incidents[2].victim_age, Some(0));
    }

    #[test]
    fn custom_column_names() {
        let csv = "id,reported,offense,age\nA1,02/03/2021,ARSON,41\n";
        let columns = ColumnMapping {
            report_date: "reported".to_string(),
            report_no: "id".to_string(),
            crime_description: "offense".to_string(),
            victim_age: "age".to_string(),
        };
        let incidents = read_incidents(csv.as_bytes(), &columns).unwrap();
        assert_eq!(incidents.len(), 1);
        assert_eq!(incidents[0].report_no, "A1");
        assert_eq!(incidents[0].victim_age, Some(41));
    }

    #[test]
    fn missing_column_is_reported() {
        let csv = "DR_NO,Date Rptd,Crm Cd Desc\n1,01/01/2020,ARSON\n";
        match read_incidents(csv.as_bytes(), &ColumnMapping::default()) {
            Err(LoadError::MissingColumn { column }) => assert_eq!(column, "Vict Age"),
            other => panic!("expected missing column, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_age_is_an_error() {
        let csv = "DR_NO,Date Rptd,Crm Cd Desc,Vict Age\n1,01/01/2020,ARSON,old\n";
        match read_incidents(csv.as_bytes(), &ColumnMapping::default()) {
            Err(LoadError::InvalidAge { value, line }) => {
                assert_eq!(value, "old");
                assert_eq!(line, 2);
            }
            other => panic!("expected invalid age, got {other:?}"),
        }
    }

    #[test]
    fn truncated_record_is_an_error() {
        let csv = "DR_NO,Date Rptd,Crm Cd Desc,Vict Age\n1,01/01/2020,ARSON,30\n2,01/02/2020\n";
        match read_incidents(csv.as_bytes(), &ColumnMapping::default()) {
            Err(LoadError::ShortRecord { column, line }) => {
                assert_eq!(column, "Crm Cd Desc");
                assert_eq!(line, 3);
            }
            other => panic!("expected short record, got {other:?}"),
        }
    }

    #[test]
    fn extra_trailing_cells_are_ignored() {
        let csv = "DR_NO,Date Rptd,Crm Cd Desc,Vict Age\n1,01/01/2020,ARSON,30,extra\n";
        let incidents = read_incidents(csv.as_bytes(), &ColumnMapping::default()).unwrap();
        assert_eq!(incidents.len(), 1);
        assert_eq!(incidents[0].victim_age, Some(30));
    }

    #[test]
    fn empty_crime_description_is_an_error() {
        let csv = "DR_NO,Date Rptd,Crm Cd Desc,Vict Age\n1,01/01/2020,  ,30\n";
        match read_incidents(csv.as_bytes(), &ColumnMapping::default()) {
            Err(LoadError::EmptyField { column, line }) => {
                assert_eq!(column, "Crm Cd Desc");
                assert_eq!(line, 2);
            }
            other => panic!("expected empty field, got {other:?}"),
        }
    }

    #[test]
    fn empty_report_number_is_an_error() {
        let csv = "DR_NO,Date Rptd,Crm Cd Desc,Vict Age\n,01/01/2020,ARSON,30\n";
        assert!(matches!(
            read_incidents(csv.as_bytes(), &ColumnMapping::default()),
            Err(LoadError::EmptyField { ref column, line: 2 }) if column == "DR_NO"
        ));
    }
}
