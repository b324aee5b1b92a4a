//! YAML wire format of the read-only patient store.
//!
//! A store document has two top-level sequences:
//!
//! ```yaml
//! patients:          # directory summaries, in display order
//!   - uhid: WMN-2025-001
//!     name: Chaitra
//!     ...
//! records:           # full records, for the patients that have one
//!   - profile:
//!       uhid: WMN-2025-001
//!     ...
//! ```
//!
//! Keys are camelCase and unknown keys are rejected, so a typo in a hand-edited
//! store fails loudly with the path of the offending key.

use crate::{PatientRecord, PatientSummary, RecordsError, RecordsResult, BUNDLED_STORE_YAML};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Parsed contents of a store document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StoreData {
    pub patients: Vec<PatientSummary>,
    #[serde(default)]
    pub records: Vec<PatientRecord>,
}

impl StoreData {
    /// Parse a store document from YAML text.
    ///
    /// This uses `serde_path_to_error` to report the path of the failing field
    /// (for example `records[0].profile.rhStatus`) when the YAML does not match
    /// the wire schema.
    ///
    /// # Errors
    ///
    /// Returns [`RecordsError`] if:
    /// - the YAML does not match the schema ([`RecordsError::Schema`]),
    /// - two summaries or two records share a UHID ([`RecordsError::InvalidInput`]).
    pub fn parse(yaml_text: &str) -> RecordsResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let data = match serde_path_to_error::deserialize::<_, StoreData>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>".to_string()
                } else {
                    path
                };
                return Err(RecordsError::Schema {
                    path,
                    message: source.to_string(),
                });
            }
        };

        data.check_unique_identifiers()?;
        Ok(data)
    }

    /// Read and parse a store document from a file.
    ///
    /// # Errors
    ///
    /// Returns [`RecordsError::Io`] if the file cannot be read, otherwise the
    /// errors of [`StoreData::parse`].
    pub fn load(path: &Path) -> RecordsResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// The demo store compiled into this crate.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled document itself is malformed.
    pub fn bundled() -> RecordsResult<Self> {
        Self::parse(BUNDLED_STORE_YAML)
    }

    /// Render the store back to YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`RecordsError::InvalidYaml`] if serialisation fails.
    pub fn render(&self) -> RecordsResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn check_unique_identifiers(&self) -> RecordsResult<()> {
        let mut seen = HashSet::new();
        for summary in &self.patients {
            if !seen.insert(summary.uhid.as_str()) {
                return Err(RecordsError::InvalidInput(format!(
                    "duplicate patient summary for UHID {}",
                    summary.uhid
                )));
            }
        }

        let mut seen = HashSet::new();
        for record in &self.records {
            if !seen.insert(record.profile.uhid.as_str()) {
                return Err(RecordsError::InvalidInput(format!(
                    "duplicate patient record for UHID {}",
                    record.profile.uhid
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PatientStatus, RhStatus, RiskLevel};
    use chrono::NaiveDate;

    const MINIMAL: &str = r#"patients:
  - uhid: WMN-2025-002
    name: Priya Sharma
    age: 26
    mobile: "9876543211"
    bloodGroup: A
    rhStatus: Positive
    riskLevel: Low
    status: Active
"#;

    #[test]
    fn bundled_store_parses() {
        let store = StoreData::bundled().expect("bundled store should parse");
        assert_eq!(store.patients.len(), 7);
        assert_eq!(store.records.len(), 1);

        let chaitra = &store.records[0];
        assert_eq!(chaitra.profile.uhid.as_str(), "WMN-2025-001");
        assert_eq!(chaitra.profile.name.as_str(), "Chaitra");
        assert_eq!(chaitra.obstetric_history.gpla_badge(), "G4 P0 L0 A3");
        assert_eq!(
            chaitra.obstetric_history.lmp,
            NaiveDate::from_ymd_opt(2025, 4, 1)
        );
        assert_eq!(chaitra.past_obstetric_history.len(), 4);
        assert_eq!(chaitra.visits.len(), 3);
        assert_eq!(chaitra.lab_results.hb, Some(11.5));
    }

    #[test]
    fn bundled_store_keeps_directory_order() {
        let store = StoreData::bundled().expect("bundled store should parse");
        let names: Vec<&str> = store.patients.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names[0], "Chaitra");
        assert_eq!(names[1], "Priya Sharma");
        assert_eq!(names[6], "Kavitha Nair");
        assert_eq!(store.patients[5].status, PatientStatus::Delivered);
        assert_eq!(store.patients[2].rh_status, RhStatus::Negative);
        assert_eq!(store.patients[4].risk_level, RiskLevel::High);
    }

    #[test]
    fn parses_minimal_store_without_records() {
        let store = StoreData::parse(MINIMAL).expect("should parse");
        assert_eq!(store.patients.len(), 1);
        assert!(store.records.is_empty());
        assert!(store.patients[0].lmp.is_none());
    }

    #[test]
    fn schema_errors_report_the_path() {
        let input = MINIMAL.replace("rhStatus: Positive", "rhStatus: Unknown");
        let err = StoreData::parse(&input).expect_err("should reject bad enum");
        match err {
            RecordsError::Schema { path, .. } => {
                assert!(path.contains("patients"), "path was {path}");
                assert!(path.contains("rhStatus"), "path was {path}");
            }
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_keys() {
        let input = format!("{MINIMAL}    favouriteColour: blue\n");
        let err = StoreData::parse(&input).expect_err("should reject unknown key");
        assert!(matches!(err, RecordsError::Schema { .. }));
    }

    #[test]
    fn rejects_duplicate_summaries() {
        let second = MINIMAL.trim_start_matches("patients:\n");
        let input = format!("{MINIMAL}{second}");
        let err = StoreData::parse(&input).expect_err("should reject duplicates");
        assert!(matches!(err, RecordsError::InvalidInput(msg) if msg.contains("WMN-2025-002")));
    }

    #[test]
    fn render_then_parse_preserves_bundled_store() {
        let store = StoreData::bundled().expect("bundled");
        let yaml = store.render().expect("render");
        let back = StoreData::parse(&yaml).expect("parse rendered");
        assert_eq!(back, store);
    }
}
