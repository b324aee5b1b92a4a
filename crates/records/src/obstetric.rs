//! Obstetric history: the current pregnancy summary and prior pregnancies.

use chrono::NaiveDate;
use obgyn_ids::EntryId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Regularity of the menstrual cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenstrualCycle {
    Regular,
    Irregular,
}

/// Result of the last cervical smear.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PapSmear {
    Nil,
    Normal,
    Abnormal,
}

/// Current-pregnancy summary stored with the patient record.
///
/// `edd` is derivable from `lmp` but is stored independently; nothing keeps
/// the two consistent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ObstetricHistory {
    pub gravida: u32,
    pub para: u32,
    pub living: u32,
    pub abortion: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lmp: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edd: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_edd: Option<NaiveDate>,
    pub menstrual_cycle: MenstrualCycle,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(default)]
    pub plan_for_management: String,
    #[serde(default)]
    pub previous_contraception: String,
    pub pap_smear: PapSmear,
    #[serde(default)]
    pub married_life: String,
}

impl ObstetricHistory {
    /// Gravida/Para/Living/Abortion counters as shown in the sidebar.
    pub fn gpla_badge(&self) -> String {
        format!(
            "G{} P{} L{} A{}",
            self.gravida, self.para, self.living, self.abortion
        )
    }

    pub fn has_risk_factors(&self) -> bool {
        !self.risk_factors.is_empty()
    }
}

/// One prior pregnancy.
///
/// `pregnancy_number` is positional: it is 1-based and is reassigned from list
/// position whenever an entry is removed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PastPregnancy {
    pub id: EntryId,
    pub pregnancy_number: u32,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub antenatal_course: String,
    #[serde(default)]
    pub mode_of_delivery: String,
    #[serde(default)]
    pub sex_of_baby: String,
    #[serde(default)]
    pub birth_weight: String,
    #[serde(default)]
    pub remarks: String,
}

impl PastPregnancy {
    /// A blank row with the given id and position.
    pub fn new(id: EntryId, pregnancy_number: u32) -> Self {
        Self {
            id,
            pregnancy_number,
            year: String::new(),
            antenatal_course: String::new(),
            mode_of_delivery: String::new(),
            sex_of_baby: String::new(),
            birth_weight: String::new(),
            remarks: String::new(),
        }
    }
}

/// The standalone obstetric-history form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ObstetricHistoryData {
    pub entries: Arc<Vec<PastPregnancy>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpla_badge_lists_counters() {
        let history = ObstetricHistory {
            gravida: 4,
            para: 0,
            living: 0,
            abortion: 3,
            lmp: None,
            edd: None,
            scan_edd: None,
            menstrual_cycle: MenstrualCycle::Regular,
            risk_factors: vec![],
            plan_for_management: String::new(),
            previous_contraception: String::new(),
            pap_smear: PapSmear::Normal,
            married_life: String::new(),
        };
        assert_eq!(history.gpla_badge(), "G4 P0 L0 A3");
        assert!(!history.has_risk_factors());
    }

    #[test]
    fn new_past_pregnancy_is_blank() {
        let id = EntryId::parse("ob-1").expect("valid id");
        let entry = PastPregnancy::new(id.clone(), 3);
        assert_eq!(entry.id, id);
        assert_eq!(entry.pregnancy_number, 3);
        assert!(entry.year.is_empty());
        assert!(entry.remarks.is_empty());
    }
}
