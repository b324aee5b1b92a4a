//! Patient demographic profile.

use chrono::NaiveDate;
use obgyn_types::{NonEmptyText, Uhid};
use serde::{Deserialize, Serialize};

/// Rhesus factor of a blood group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RhStatus {
    Positive,
    Negative,
}

impl RhStatus {
    /// All variants, in display order.
    pub const ALL: [RhStatus; 2] = [RhStatus::Positive, RhStatus::Negative];

    /// Wire name of the variant.
    pub fn as_str(self) -> &'static str {
        match self {
            RhStatus::Positive => "Positive",
            RhStatus::Negative => "Negative",
        }
    }

    /// Parse a wire name, ignoring case.
    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// `+` or `-`, as shown after the blood group.
    pub fn sign(self) -> char {
        match self {
            RhStatus::Positive => '+',
            RhStatus::Negative => '-',
        }
    }
}

/// Demographic details captured at intake and changed through profile edits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PatientProfile {
    pub uhid: Uhid,
    pub name: NonEmptyText,
    pub age: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<NaiveDate>,
    #[serde(default)]
    pub occupation: String,
    #[serde(default)]
    pub spouse_name: String,
    #[serde(default)]
    pub spouse_occupation: String,
    pub address: String,
    pub mobile: String,
    #[serde(default)]
    pub allergies: Vec<String>,
    pub blood_group: String,
    pub rh_status: RhStatus,
    #[serde(default)]
    pub husband_blood_group: String,
}

impl PatientProfile {
    /// Blood group with the Rh sign appended, e.g. `O+`.
    pub fn blood_group_badge(&self) -> String {
        format!("{}{}", self.blood_group, self.rh_status.sign())
    }
}
