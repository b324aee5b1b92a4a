//! Read-only patient store and identifier lookup.
//!
//! The store is the whole universe of known patients: an ordered list of
//! directory summaries plus the full records that exist. Only some summaries
//! have a full record, so a lookup can miss; a miss is an ordinary
//! [`Lookup::NotFound`] value, not an error.

use crate::config::StoreSource;
use crate::CoreResult;
use obgyn_records::{PatientRecord, PatientSummary, StoreData};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Outcome of looking a patient up by identifier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Lookup<'a> {
    Found(&'a PatientRecord),
    NotFound,
}

impl<'a> Lookup<'a> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn record(self) -> Option<&'a PatientRecord> {
        match self {
            Lookup::Found(record) => Some(record),
            Lookup::NotFound => None,
        }
    }
}

/// Source of patient summaries and full records.
pub trait PatientStore {
    /// Directory summaries in display order.
    fn list_summaries(&self) -> &[PatientSummary];

    /// Full record for `id` (a UHID), compared exactly after trimming.
    fn get_by_identifier(&self, id: &str) -> Lookup<'_>;
}

/// A store held entirely in memory.
#[derive(Clone, Debug)]
pub struct InMemoryStore {
    summaries: Vec<PatientSummary>,
    records: HashMap<String, PatientRecord>,
}

impl InMemoryStore {
    pub fn new(data: StoreData) -> Self {
        let records = data
            .records
            .into_iter()
            .map(|record| (record.profile.uhid.as_str().to_string(), record))
            .collect();
        Self {
            summaries: data.patients,
            records,
        }
    }

    /// The demo store compiled into `obgyn-records`.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled document is malformed.
    pub fn bundled() -> CoreResult<Self> {
        Ok(Self::new(StoreData::bundled()?))
    }

    /// Load a YAML store document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::Records`] if the file cannot be read or does
    /// not match the store schema.
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        Ok(Self::new(StoreData::load(path)?))
    }

    /// Open the store a configuration points at.
    ///
    /// # Errors
    ///
    /// See [`InMemoryStore::bundled`] and [`InMemoryStore::from_file`].
    pub fn open(source: &StoreSource) -> CoreResult<Self> {
        let store = match source {
            StoreSource::Bundled => Self::bundled()?,
            StoreSource::File(path) => Self::from_file(path)?,
        };
        info!(
            source = %source,
            summaries = store.summaries.len(),
            records = store.records.len(),
            "patient store loaded"
        );
        Ok(store)
    }

    /// Number of patients with a full record.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

impl PatientStore for InMemoryStore {
    fn list_summaries(&self) -> &[PatientSummary] {
        &self.summaries
    }

    fn get_by_identifier(&self, id: &str) -> Lookup<'_> {
        match self.records.get(id.trim()) {
            Some(record) => Lookup::Found(record),
            None => {
                debug!(id, "no full record for patient");
                Lookup::NotFound
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn bundled_store_has_one_full_record() {
        let store = InMemoryStore::bundled().expect("bundled");
        assert_eq!(store.list_summaries().len(), 7);
        assert_eq!(store.record_count(), 1);

        let record = store
            .get_by_identifier("WMN-2025-001")
            .record()
            .expect("Chaitra has a full record");
        assert_eq!(record.profile.name.as_str(), "Chaitra");
    }

    #[test]
    fn lookup_miss_is_a_value() {
        let store = InMemoryStore::bundled().expect("bundled");
        assert_eq!(store.get_by_identifier("WMN-2025-002"), Lookup::NotFound);
        assert_eq!(store.get_by_identifier(""), Lookup::NotFound);
        assert!(!store.get_by_identifier("wmn-2025-001").is_found());
        assert!(store.get_by_identifier("  WMN-2025-001 ").is_found());
    }

    #[test]
    fn loads_store_from_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(
            file,
            "patients:\n  - uhid: WMN-2025-010\n    name: Asha\n    age: 31\n    mobile: \"9000000000\"\n    bloodGroup: B\n    rhStatus: Positive\n    riskLevel: Low\n    status: Closed\n"
        )
        .expect("write store");

        let store =
            InMemoryStore::open(&StoreSource::File(file.path().to_path_buf())).expect("load");
        assert_eq!(store.list_summaries().len(), 1);
        assert_eq!(store.list_summaries()[0].name.as_str(), "Asha");
        assert_eq!(store.get_by_identifier("WMN-2025-010"), Lookup::NotFound);
    }

    #[test]
    fn malformed_file_reports_schema_path() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, "patients:\n  - uhid: WMN-2025-010\n    age: old\n").expect("write");

        let err = InMemoryStore::from_file(file.path()).expect_err("bad store");
        assert!(matches!(err, CoreError::Records(_)));
    }
}
