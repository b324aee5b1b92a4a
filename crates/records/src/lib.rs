//! Clinical record model for the obstetrics and gynecology clinic.
//!
//! This crate provides the plain data carriers the clinic works with, and the
//! YAML wire format of the read-only patient store:
//! - patient profile, obstetric and medical histories, lab results, visit log
//! - the ANC (antenatal care) case and its sections
//! - gynecology visits
//! - the standalone medical-history and obstetric-history forms
//!
//! Records are value data. Nothing here mutates a record in place or knows
//! about editing; the `obgyn-core` crate layers field selection, derivation and
//! list lifecycle on top of these types.
//!
//! Sections of the larger records (ANC case, gynecology visit) are held behind
//! `Arc` so that an edit can copy the one section it touches and share the rest.

pub mod anc;
pub mod gyne;
pub mod history;
pub mod labs;
pub mod obstetric;
pub mod patient;
pub mod profile;
pub mod store;
pub mod visit;

// Re-export the record types most callers need
pub use anc::{
    AncCase, BaselineTests, BookingVisit, DeliveryOutcome, FollowUpTest, FollowUpVisit,
    ObstetricStatus, PostnatalCare, PostnatalChecklist, PostnatalExamination, UsgTracking,
    Vaccinations,
};
pub use gyne::{
    GyneFamilyHistory, GynePastMedicalHistory, GynePersonalHistory, GyneVisit, PhysicalExam,
    VaginalExam,
};
pub use history::{
    FamilyChecklist, FamilyHistory, MedicalHistory, MedicalHistoryData, PastMedicalHistory,
    PersonalHabits, PersonalHistory,
};
pub use labs::LabResults;
pub use obstetric::{MenstrualCycle, ObstetricHistory, ObstetricHistoryData, PapSmear, PastPregnancy};
pub use patient::{PatientRecord, PatientStatus, PatientSummary, RiskLevel};
pub use profile::{PatientProfile, RhStatus};
pub use store::StoreData;
pub use visit::{VisitRecord, VisitTemplate};

pub use obgyn_ids::EntryId;
pub use obgyn_types::{NonEmptyText, Uhid};

/// The demo patient store compiled into the crate.
///
/// Seven directory summaries and one fully populated record (WMN-2025-001).
pub const BUNDLED_STORE_YAML: &str = include_str!("../data/clinic.yaml");

/// Errors returned by the records crate.
#[derive(Debug, thiserror::Error)]
pub enum RecordsError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store schema mismatch at {path}: {message}")]
    Schema { path: String, message: String },
}

/// Type alias for Results that can fail with a [`RecordsError`].
pub type RecordsResult<T> = Result<T, RecordsError>;
