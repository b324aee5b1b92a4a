//! Patient aggregate and directory summary.

use crate::{
    EntryId, FamilyHistory, LabResults, MedicalHistory, ObstetricHistory, PastPregnancy,
    PatientProfile, PersonalHistory, RhStatus, VisitRecord, VisitTemplate,
};
use chrono::NaiveDate;
use obgyn_types::{NonEmptyText, Uhid};
use serde::{Deserialize, Serialize};

/// Where a patient is in their care episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatientStatus {
    Active,
    Delivered,
    Closed,
}

impl PatientStatus {
    /// The closed set of statuses, in display order.
    pub const ALL: [PatientStatus; 3] = [
        PatientStatus::Active,
        PatientStatus::Delivered,
        PatientStatus::Closed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PatientStatus::Active => "Active",
            PatientStatus::Delivered => "Delivered",
            PatientStatus::Closed => "Closed",
        }
    }

    /// Parse a status name, ignoring case.
    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

/// Clinical risk grading shown in the directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// One row of the patient directory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PatientSummary {
    pub uhid: Uhid,
    pub name: NonEmptyText,
    pub age: u32,
    pub mobile: String,
    pub blood_group: String,
    pub rh_status: RhStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lmp: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edd: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weeks_pregnant: Option<u32>,
    pub risk_level: RiskLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visit: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_visit: Option<NaiveDate>,
    pub status: PatientStatus,
}

/// The fully populated record of one patient.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PatientRecord {
    pub profile: PatientProfile,
    pub obstetric_history: ObstetricHistory,
    #[serde(default)]
    pub past_obstetric_history: Vec<PastPregnancy>,
    pub medical_history: MedicalHistory,
    pub family_history: FamilyHistory,
    pub personal_history: PersonalHistory,
    #[serde(default)]
    pub present_medication: String,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub lab_results: LabResults,
    #[serde(default)]
    pub visits: Vec<VisitRecord>,
}

impl PatientRecord {
    /// Number of logged visits recorded with `template`.
    pub fn visit_count(&self, template: VisitTemplate) -> usize {
        self.visits
            .iter()
            .filter(|visit| visit.template == template)
            .count()
    }

    /// Ids of every list entry in the record.
    pub fn entry_ids(&self) -> impl Iterator<Item = &EntryId> {
        self.past_obstetric_history
            .iter()
            .map(|entry| &entry.id)
            .chain(self.visits.iter().map(|visit| &visit.id))
    }
}
