//! Gynecology visits.
//!
//! Unlike the ANC case, a patient can have any number of independent
//! gynecology visits. Each visit carries its own histories and examination.

use chrono::NaiveDate;
use obgyn_ids::EntryId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Past medical history as asked in the gynecology record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GynePastMedicalHistory {
    pub diabetes: bool,
    pub hypertension: bool,
    pub thyroid_dysfunction: bool,
    pub migraine: bool,
    pub cardiac: bool,
    pub epilepsy: bool,
    pub asthma: bool,
    pub tb: bool,
    pub blood_transfusion: bool,
    pub surgery: String,
    pub thromboembolism: bool,
}

/// Family history as asked in the gynecology record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GyneFamilyHistory {
    pub diabetes: bool,
    pub hypertension: bool,
    pub thyroid_dysfunction: bool,
    pub tb: bool,
    pub cancers: String,
    pub ihd_cva: bool,
    pub thromboembolism: bool,
    pub psychiatric_problems: bool,
}

/// Personal history as asked in the gynecology record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GynePersonalHistory {
    pub allergies: String,
    pub smoking: bool,
    pub alcohol: bool,
    pub psych_stress: bool,
}

/// General physical examination. `bmi` is derived from height and weight.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PhysicalExam {
    pub height: f64,
    pub weight: f64,
    pub bmi: f64,
    pub pallor: bool,
    pub goiter: bool,
    pub pulse: u32,
    pub bp_systolic: u32,
    pub bp_diastolic: u32,
    pub cvs: String,
    pub breasts: String,
    pub rs: String,
    pub per_abdomen: String,
}

/// Vaginal examination findings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VaginalExam {
    pub vulva_vagina: String,
    pub cervix: String,
    pub uterus: String,
    pub adnexa: String,
}

/// One gynecology consultation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GyneVisit {
    pub id: EntryId,
    pub date: NaiveDate,
    pub name: String,
    pub age: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lmp: Option<NaiveDate>,
    pub para: String,
    pub contraception: String,
    pub previous_smear: String,
    pub menstrual_cycles: String,

    pub presenting_complaints: String,
    pub micturition: String,
    pub bowels: String,

    pub past_medical_history: Arc<GynePastMedicalHistory>,
    pub family_history: Arc<GyneFamilyHistory>,
    pub personal_history: Arc<GynePersonalHistory>,

    pub medications: String,
    pub physical_exam: Arc<PhysicalExam>,
    pub vaginal_exam: Arc<VaginalExam>,

    pub impression: String,
    pub advice: String,
    pub doctor_signature: String,
}

impl GyneVisit {
    /// A blank visit for a patient, dated `date`.
    pub fn new(id: EntryId, date: NaiveDate, name: impl Into<String>, age: u32) -> Self {
        Self {
            id,
            date,
            name: name.into(),
            age,
            lmp: None,
            para: String::new(),
            contraception: String::new(),
            previous_smear: String::new(),
            menstrual_cycles: String::new(),
            presenting_complaints: String::new(),
            micturition: String::new(),
            bowels: String::new(),
            past_medical_history: Arc::default(),
            family_history: Arc::default(),
            personal_history: Arc::default(),
            medications: String::new(),
            physical_exam: Arc::default(),
            vaginal_exam: Arc::default(),
            impression: String::new(),
            advice: String::new(),
            doctor_signature: String::new(),
        }
    }
}
