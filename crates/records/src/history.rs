//! Medical, family and personal history.
//!
//! Two shapes exist side by side:
//! - the patient-level histories stored with the patient record
//!   ([`MedicalHistory`], [`FamilyHistory`], [`PersonalHistory`]), and
//! - the checklist sections captured by the ANC case and the standalone
//!   medical-history form ([`PastMedicalHistory`], [`FamilyChecklist`],
//!   [`PersonalHabits`]).
//!
//! Both are flat maps of condition name to yes/no plus a few free-text
//! exceptions. None of them has identity; they are embedded in their owner.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Past medical history as stored with the patient record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MedicalHistory {
    pub diabetes: bool,
    pub hypertension: bool,
    pub thyroid: bool,
    pub migraine: bool,
    pub cardiac: bool,
    pub epilepsy: bool,
    pub asthma: bool,
    pub tb: bool,
    pub blood_transfusion: bool,
    #[serde(default)]
    pub surgery: Option<String>,
    pub thromboembolism: bool,
    #[serde(default)]
    pub psychiatric_problems: Option<String>,
    pub hdu_icu_admission: bool,
    #[serde(default)]
    pub others: String,
}

impl MedicalHistory {
    /// Condition name to yes/no, in form order.
    pub fn conditions(&self) -> [(&'static str, bool); 11] {
        [
            ("Diabetes", self.diabetes),
            ("Hypertension", self.hypertension),
            ("Thyroid", self.thyroid),
            ("Migraine", self.migraine),
            ("Cardiac", self.cardiac),
            ("Epilepsy", self.epilepsy),
            ("Asthma", self.asthma),
            ("TB", self.tb),
            ("Blood transfusion", self.blood_transfusion),
            ("Thromboembolism", self.thromboembolism),
            ("HDU/ICU admission", self.hdu_icu_admission),
        ]
    }
}

/// Family history as stored with the patient record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FamilyHistory {
    pub diabetes: bool,
    pub hypertension: bool,
    pub thyroid: bool,
    pub stroke: bool,
    pub tb: bool,
    pub cancers: bool,
    pub twin: bool,
    pub physically_challenged: bool,
    pub mentally_challenged: bool,
    pub thromboembolism: bool,
    pub psychiatric_problems: bool,
    #[serde(default)]
    pub others: String,
}

impl FamilyHistory {
    /// Condition name to yes/no, in form order.
    pub fn conditions(&self) -> [(&'static str, bool); 11] {
        [
            ("Diabetes", self.diabetes),
            ("Hypertension", self.hypertension),
            ("Thyroid", self.thyroid),
            ("Stroke", self.stroke),
            ("TB", self.tb),
            ("Cancers", self.cancers),
            ("Twins", self.twin),
            ("Physically challenged", self.physically_challenged),
            ("Mentally challenged", self.mentally_challenged),
            ("Thromboembolism", self.thromboembolism),
            ("Psychiatric problems", self.psychiatric_problems),
        ]
    }
}

/// Personal history as stored with the patient record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PersonalHistory {
    pub smoking: bool,
    pub alcohol: bool,
    pub consanguinity: bool,
    pub psych_stress: bool,
}

impl PersonalHistory {
    pub fn conditions(&self) -> [(&'static str, bool); 4] {
        [
            ("Smoking", self.smoking),
            ("Alcohol", self.alcohol),
            ("Consanguinity", self.consanguinity),
            ("Psychological stress", self.psych_stress),
        ]
    }
}

/// Past medical history checklist of the ANC case and medical-history form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PastMedicalHistory {
    pub diabetes: bool,
    pub hypertension: bool,
    pub thyroid: bool,
    pub migraine: bool,
    pub cardiac: bool,
    pub epilepsy: bool,
    pub asthma: bool,
    pub tb: bool,
    pub blood_transfusion: bool,
    pub surgery: String,
    pub thromboembolism: bool,
    pub psychiatric_problems: bool,
}

/// Family history checklist of the ANC case and medical-history form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FamilyChecklist {
    pub diabetes: bool,
    pub hypertension: bool,
    pub thyroid: bool,
    pub stroke: bool,
    pub tb: bool,
    pub cancers: bool,
    pub twins: bool,
    pub mentally_challenged: bool,
}

/// Personal habits checklist of the ANC case and medical-history form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PersonalHabits {
    pub smoking: bool,
    pub alcohol: bool,
    pub consanguinity: bool,
    pub psychological_stress: bool,
}

/// The standalone medical-history form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MedicalHistoryData {
    pub past_history: Arc<PastMedicalHistory>,
    pub family_history: Arc<FamilyChecklist>,
    pub personal_habits: Arc<PersonalHabits>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conditions_follow_field_values() {
        let history = MedicalHistory {
            thyroid: true,
            surgery: Some("H/o Lap Appendicectomy".into()),
            ..MedicalHistory::default()
        };

        let positive: Vec<&str> = history
            .conditions()
            .into_iter()
            .filter_map(|(name, yes)| yes.then_some(name))
            .collect();
        assert_eq!(positive, vec!["Thyroid"]);
    }

    #[test]
    fn empty_form_has_nothing_ticked() {
        let form = MedicalHistoryData::default();
        assert!(!form.past_history.diabetes);
        assert!(form.past_history.surgery.is_empty());
        assert!(!form.personal_habits.psychological_stress);
    }
}
