#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derivation of calendar and categorical fields from raw incidents.
//!
//! Turns each [`Incident`] into exactly one [`DerivedIncident`]. Bad rows are
//! never skipped: a malformed report date or a repeated report number fails
//! the whole batch.

pub mod parsing;

use std::collections::HashSet;

use chrono::Datelike as _;
use crime_stats_crime_models::{AgeBracket, DerivedIncident, Incident, Season};

/// Errors that can occur while deriving incidents.
#[derive(Debug, thiserror::Error)]
pub enum DerivationError {
    /// The report date does not start with an `MM/dd/yyyy` date.
    #[error("Malformed report date '{value}' for report {report_no}")]
    MalformedDate {
        /// Report number of the offending row.
        report_no: String,
        /// The raw date value.
        value: String,
    },

    /// Two rows share the same report number.
    #[error("Duplicate report number: {report_no}")]
    DuplicateKey {
        /// The repeated report number.
        report_no: String,
    },
}

/// Derives the computed fields for a single incident.
///
/// # Errors
///
/// Returns [`DerivationError::MalformedDate`] if the report date cannot be
/// parsed.
pub fn derive_incident(incident: &Incident) -> Result<DerivedIncident, DerivationError> {
    let date_reported = parsing::parse_report_date(&incident.report_date).ok_or_else(|| {
        DerivationError::MalformedDate {
            report_no: incident.report_no.clone(),
            value: incident.report_date.clone(),
        }
    })?;

    Ok(DerivedIncident {
        report_no: incident.report_no.clone(),
        crime_description: incident.crime_description.clone(),
        victim_age: incident.victim_age,
        date_reported,
        year: date_reported.year(),
        month: date_reported.month(),
        season: Season::from_date(date_reported),
        age_bracket: AgeBracket::from_age(incident.victim_age),
    })
}

/// Verifies that no two incidents share a report number.
///
/// # Errors
///
/// Returns [`DerivationError::DuplicateKey`] for the first repeated report
/// number.
pub fn ensure_unique_report_numbers(incidents: &[Incident]) -> Result<(), DerivationError> {
    let mut seen = HashSet::with_capacity(incidents.len());
    for incident in incidents {
        if !seen.insert(incident.report_no.as_str()) {
            return Err(DerivationError::DuplicateKey {
                report_no: incident.report_no.clone(),
            });
        }
    }
    Ok(())
}

/// Checks report-number uniqueness, then derives every incident.
///
/// # Errors
///
/// Returns [`DerivationError`] on the first duplicate report number or
/// malformed date.
pub fn derive_incidents(incidents: &[Incident]) -> Result<Vec<DerivedIncident>, DerivationError> {
    ensure_unique_report_numbers(incidents)?;

    let derived = incidents
        .iter()
        .map(derive_incident)
        .collect::<Result<Vec<_>, _>>()?;

    let unbracketed = derived
        .iter()
        .filter(|d| !d.age_bracket.is_bracketed())
        .count();

    log::info!(
        "Derived {} incidents ({unbracketed} without an age bracket)",
        derived.len()
    );

    Ok(derived)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident(report_no: &str, date: &str, age: Option<i32>) -> Incident {
        Incident {
            report_date: date.to_string(),
            report_no: report_no.to_string(),
            crime_description: "VEHICLE - STOLEN".to_string(),
            victim_age: age,
        }
    }

    #[test]
    fn derives_calendar_fields() {
        let derived = derive_incident(&incident("1", "08/14/2022 12:00:00 AM", Some(34))).unwrap();
        assert_eq!(derived.year, 2022);
        assert_eq!(derived.month, 8);
        assert_eq!(derived.season, Season::Summer);
        assert_eq!(derived.age_bracket, AgeBracket::Thirties);
        assert_eq!(derived.date_reported.to_string(), "2022-08-14");
    }

    #[test]
    fn missing_age_is_unbracketed() {
        let derived = derive_incident(&incident("1", "11/02/2020", None)).unwrap();
        assert_eq!(derived.season, Season::Fall);
        assert_eq!(derived.age_bracket, AgeBracket::Unbracketed);
    }

    #[test]
    fn malformed_date_is_an_error() {
        let err = derive_incident(&incident("42", "2020-01-01", None)).unwrap_err();
        match err {
            DerivationError::MalformedDate { report_no, value } => {
                assert_eq!(report_no, "42");
                assert_eq!(value, "2020-01-01");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn batch_fails_on_any_malformed_date() {
        let rows = vec![
            incident("1", "01/01/2021", None),
            incident("2", "not a date at all", None),
        ];
        assert!(matches!(
            derive_incidents(&rows),
            Err(DerivationError::MalformedDate { .. })
        ));
    }

    #[test]
    fn duplicate_report_numbers_are_rejected() {
        let rows = vec![
            incident("7", "01/01/2021", None),
            incident("8", "01/02/2021", None),
            incident("7", "01/03/2021", None),
        ];
        match derive_incidents(&rows) {
            Err(DerivationError::DuplicateKey { report_no }) => assert_eq!(report_no, "7"),
            other => panic!("expected duplicate key, got {other:?}"),
        }
    }

    #[test]
    fn derives_one_row_per_incident() {
        let rows = vec![
            incident("1", "01/01/2021", Some(25)),
            incident("2", "05/01/2021", Some(70)),
            incident("3", "09/30/2021", None),
        ];
        let derived = derive_incidents(&rows).unwrap();
        assert_eq!(derived.len(), 3);
        assert_eq!(
            derived.iter().map(|d| d.season).collect::<Vec<_>>(),
            vec![Season::Winter, Season::Spring, Season::Summer]
        );
    }
}
