//! Visit log entries stored with the patient record.

use chrono::NaiveDate;
use obgyn_ids::EntryId;
use serde::{Deserialize, Serialize};

/// Form template a visit was recorded with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisitTemplate {
    #[serde(rename = "ANC")]
    Anc,
    #[serde(rename = "GYNE")]
    Gyne,
    #[serde(rename = "GENERAL")]
    General,
}

impl VisitTemplate {
    pub const ALL: [VisitTemplate; 3] = [VisitTemplate::Anc, VisitTemplate::Gyne, VisitTemplate::General];

    /// Wire name of the template.
    pub fn as_str(self) -> &'static str {
        match self {
            VisitTemplate::Anc => "ANC",
            VisitTemplate::Gyne => "GYNE",
            VisitTemplate::General => "GENERAL",
        }
    }

    /// Parse a wire name, ignoring case.
    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

/// One clinical encounter in the patient's visit log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VisitRecord {
    pub id: EntryId,
    pub date: NaiveDate,
    pub template: VisitTemplate,
    #[serde(default)]
    pub complaints: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bp_systolic: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bp_diastolic: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weeks_from_lmp: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sfh: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetal_heart_rate: Option<u32>,
    #[serde(default)]
    pub fetal_position: String,
    pub pallor: bool,
    pub pedal_edema: bool,
    #[serde(default)]
    pub pv_exam: String,
    #[serde(default)]
    pub urine_albumin: String,
    #[serde(default)]
    pub urine_sugar: String,
    #[serde(default)]
    pub remarks: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_visit_date: Option<NaiveDate>,
    #[serde(default)]
    pub seen_by: String,
}

impl VisitRecord {
    /// A blank visit dated `date` for the given template.
    pub fn new(id: EntryId, date: NaiveDate, template: VisitTemplate) -> Self {
        Self {
            id,
            date,
            template,
            complaints: String::new(),
            weight: None,
            bp_systolic: None,
            bp_diastolic: None,
            weeks_from_lmp: None,
            sfh: None,
            fetal_heart_rate: None,
            fetal_position: String::new(),
            pallor: false,
            pedal_edema: false,
            pv_exam: String::new(),
            urine_albumin: String::new(),
            urine_sugar: String::new(),
            remarks: String::new(),
            next_visit_date: None,
            seen_by: String::new(),
        }
    }

    /// Blood pressure as `sys/dia`, when both readings are present.
    pub fn blood_pressure(&self) -> Option<String> {
        match (self.bp_systolic, self.bp_diastolic) {
            (Some(sys), Some(dia)) => Some(format!("{sys}/{dia}")),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_names_round_trip() {
        for template in VisitTemplate::ALL {
            assert_eq!(VisitTemplate::from_name(template.as_str()), Some(template));
        }
        assert_eq!(VisitTemplate::from_name("gyne"), Some(VisitTemplate::Gyne));
        assert_eq!(VisitTemplate::from_name("other"), None);
    }

    #[test]
    fn new_visit_has_no_findings() {
        let id = EntryId::parse("v-1").expect("valid id");
        let date = NaiveDate::from_ymd_opt(2025, 7, 10).expect("valid date");
        let visit = VisitRecord::new(id, date, VisitTemplate::General);

        assert_eq!(visit.date, date);
        assert!(!visit.pallor);
        assert!(!visit.pedal_edema);
        assert!(visit.weight.is_none());
        assert!(visit.blood_pressure().is_none());
    }
}
