//! Antenatal care (ANC) case.
//!
//! One ANC case aggregates everything recorded over a single pregnancy: the
//! obstetric status, histories, investigations, the booking visit, follow-up
//! visits, the delivery outcome and postnatal care. A patient has at most one
//! active case.
//!
//! Every section is held behind an `Arc`. Cloning a case is a handful of
//! pointer copies; editors copy-on-write only the section they change.

use crate::{FamilyChecklist, PastMedicalHistory, PastPregnancy, PersonalHabits};
use chrono::NaiveDate;
use obgyn_ids::EntryId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// Sections
// ============================================================================

/// Obstetric status of the current pregnancy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ObstetricStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lmp: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edd: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_edd: Option<NaiveDate>,
    pub gravida: u32,
    pub para: u32,
    pub living: u32,
    pub abortions: u32,
    pub risk_factors: String,
    pub menstrual_cycle: String,
    pub previous_contraception: String,
    pub pap_smear: String,
    pub married_life_duration: String,
}

impl Default for ObstetricStatus {
    /// A new case starts as a first pregnancy.
    fn default() -> Self {
        Self {
            lmp: None,
            edd: None,
            scan_edd: None,
            gravida: 1,
            para: 0,
            living: 0,
            abortions: 0,
            risk_factors: String::new(),
            menstrual_cycle: String::new(),
            previous_contraception: String::new(),
            pap_smear: String::new(),
            married_life_duration: String::new(),
        }
    }
}

/// Baseline investigations, recorded as free text as reported by the lab.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BaselineTests {
    pub hb: String,
    pub pcv: String,
    pub platelets: String,
    pub fbs_rbs: String,
    pub gct_gtt: String,
    pub tsh: String,
    #[serde(rename = "rubellaIgG")]
    pub rubella_igg: String,
    pub hiv: String,
    pub hbs_ag: String,
    pub vdrl: String,
    pub urine_analysis: String,
    pub hba1c: String,
}

/// Repeat investigations at a gestational period (24-28 wks, 32 wks, 36 wks).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FollowUpTest {
    pub id: EntryId,
    pub period: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub hb: String,
    pub pcv: String,
    pub rbs_fbs: String,
    pub gtt: String,
    pub tsh: String,
}

impl FollowUpTest {
    pub fn new(id: EntryId, date: NaiveDate) -> Self {
        Self {
            id,
            period: String::new(),
            date: Some(date),
            hb: String::new(),
            pcv: String::new(),
            rbs_fbs: String::new(),
            gtt: String::new(),
            tsh: String::new(),
        }
    }
}

/// Dates of the scheduled ultrasound scans.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UsgTracking {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dating_scan_date: Option<NaiveDate>,
    #[serde(
        default,
        rename = "scan11_13WeeksDate",
        skip_serializing_if = "Option::is_none"
    )]
    pub scan_11_13_weeks_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combined_screening_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anomaly_scan_date: Option<NaiveDate>,
}

/// Vaccination and prophylaxis dates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Vaccinations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub td_vaccine_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tdap_vaccine_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ict_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anti_d_date: Option<NaiveDate>,
}

/// First (booking) visit of the pregnancy.
///
/// `bmi` is derived from `height` (cm) and `weight` (kg) when both are
/// positive, and stored as a plain value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BookingVisit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_date: Option<NaiveDate>,
    pub height: f64,
    pub weight: f64,
    pub bmi: f64,
    pub thyroid_exam: String,
    pub breast_exam: String,
    pub cvs_exam: String,
    pub rs_exam: String,
    pub per_abdomen_findings: String,
}

/// One recurring antenatal follow-up visit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FollowUpVisit {
    pub id: EntryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub complaints: String,
    pub weight: f64,
    pub bp_systolic: u32,
    pub bp_diastolic: u32,
    pub weeks_by_lmp: u32,
    pub sfh: String,
    pub fetal_heart: String,
    pub presentation: String,
    pub remarks_plan: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_visit_date: Option<NaiveDate>,
    pub seen_by: String,
}

impl FollowUpVisit {
    /// A blank visit dated `date`.
    pub fn new(id: EntryId, date: NaiveDate) -> Self {
        Self {
            id,
            date: Some(date),
            complaints: String::new(),
            weight: 0.0,
            bp_systolic: 0,
            bp_diastolic: 0,
            weeks_by_lmp: 0,
            sfh: String::new(),
            fetal_heart: String::new(),
            presentation: String::new(),
            remarks_plan: String::new(),
            next_visit_date: None,
            seen_by: String::new(),
        }
    }
}

/// Outcome of the delivery.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeliveryOutcome {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_delivery: Option<NaiveDate>,
    pub sex_of_baby: String,
    pub mode_of_delivery: String,
    pub birth_weight: String,
    #[serde(rename = "indicationForCS")]
    pub indication_for_cs: String,
    pub perineal_tear: String,
    pub complications: String,
}

/// Conditions to review at the postnatal check.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PostnatalChecklist {
    pub diabetes: bool,
    pub hypertension: bool,
    pub thyroid: bool,
    pub mood_depression: bool,
}

/// Postnatal examination findings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PostnatalExamination {
    pub bp: String,
    pub pallor: bool,
    pub breasts: String,
    pub per_abdomen: String,
    pub perineum: String,
}

/// Postnatal care. Nested two levels deep inside the case.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PostnatalCare {
    pub checklist: Arc<PostnatalChecklist>,
    pub examination: Arc<PostnatalExamination>,
    pub contraception_advice: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_checkup_date: Option<NaiveDate>,
}

// ============================================================================
// Case
// ============================================================================

/// A complete ANC case.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AncCase {
    pub id: EntryId,
    pub patient_name: String,
    pub patient_age: u32,
    pub obstetric_status: Arc<ObstetricStatus>,
    pub past_obstetric_history: Arc<Vec<PastPregnancy>>,
    pub past_history: Arc<PastMedicalHistory>,
    pub family_history: Arc<FamilyChecklist>,
    pub personal_habits: Arc<PersonalHabits>,
    pub baseline_tests: Arc<BaselineTests>,
    pub follow_up_tests: Arc<Vec<FollowUpTest>>,
    pub usg_tracking: Arc<UsgTracking>,
    pub vaccinations: Arc<Vaccinations>,
    pub booking_visit: Arc<BookingVisit>,
    pub follow_up_visits: Arc<Vec<FollowUpVisit>>,
    pub delivery_outcome: Arc<DeliveryOutcome>,
    pub postnatal_care: Arc<PostnatalCare>,
}

impl AncCase {
    /// An empty case for a patient, with the booking visit dated `today`.
    pub fn new(id: EntryId, patient_name: impl Into<String>, patient_age: u32, today: NaiveDate) -> Self {
        Self {
            id,
            patient_name: patient_name.into(),
            patient_age,
            obstetric_status: Arc::default(),
            past_obstetric_history: Arc::default(),
            past_history: Arc::default(),
            family_history: Arc::default(),
            personal_habits: Arc::default(),
            baseline_tests: Arc::default(),
            follow_up_tests: Arc::default(),
            usg_tracking: Arc::default(),
            vaccinations: Arc::default(),
            booking_visit: Arc::new(BookingVisit {
                booking_date: Some(today),
                ..BookingVisit::default()
            }),
            follow_up_visits: Arc::default(),
            delivery_outcome: Arc::default(),
            postnatal_care: Arc::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 16).expect("valid date")
    }

    #[test]
    fn new_case_is_a_first_pregnancy_booked_today() {
        let id = EntryId::parse("anc-1").expect("valid id");
        let case = AncCase::new(id, "Chaitra", 29, today());

        assert_eq!(case.patient_name, "Chaitra");
        assert_eq!(case.obstetric_status.gravida, 1);
        assert_eq!(case.obstetric_status.para, 0);
        assert!(case.obstetric_status.lmp.is_none());
        assert_eq!(case.booking_visit.booking_date, Some(today()));
        assert_eq!(case.booking_visit.bmi, 0.0);
        assert!(case.follow_up_visits.is_empty());
        assert!(case.past_obstetric_history.is_empty());
    }

    #[test]
    fn cloning_a_case_shares_sections() {
        let id = EntryId::parse("anc-1").expect("valid id");
        let case = AncCase::new(id, "Chaitra", 29, today());
        let copy = case.clone();

        assert!(Arc::ptr_eq(&case.booking_visit, &copy.booking_visit));
        assert!(Arc::ptr_eq(&case.postnatal_care, &copy.postnatal_care));
    }

    #[test]
    fn serialises_with_wire_names() {
        let id = EntryId::parse("anc-1").expect("valid id");
        let case = AncCase::new(id, "Chaitra", 29, today());
        let yaml = serde_yaml::to_string(&case).expect("render");

        assert!(yaml.contains("bookingVisit:"));
        // unset dates are omitted
        assert!(!yaml.contains("scan11_13WeeksDate"));
        assert!(yaml.contains("rubellaIgG:"));
        assert!(yaml.contains("indicationForCS:"));
        assert!(yaml.contains("bookingDate: 2025-05-16") || yaml.contains("bookingDate: '2025-05-16'"));
    }
}
