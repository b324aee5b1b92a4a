//! Selectors for the medical-history sections and the standalone form.

use super::{section_leaf, unknown_section};
use crate::field::{leaf_fields, split_section, Editable, FieldKind, FieldSelector, FieldValue};
use crate::CoreResult;
use obgyn_records::{FamilyChecklist, MedicalHistoryData, PastMedicalHistory, PersonalHabits};
use std::fmt;
use std::sync::Arc;

leaf_fields! {
    /// Leaves of [`PastMedicalHistory`].
    pub enum PastHistoryField for PastMedicalHistory {
        Diabetes => "diabetes": diabetes,
        Hypertension => "hypertension": hypertension,
        Thyroid => "thyroid": thyroid,
        Migraine => "migraine": migraine,
        Cardiac => "cardiac": cardiac,
        Epilepsy => "epilepsy": epilepsy,
        Asthma => "asthma": asthma,
        Tb => "tb": tb,
        BloodTransfusion => "bloodTransfusion": blood_transfusion,
        Surgery => "surgery": surgery,
        Thromboembolism => "thromboembolism": thromboembolism,
        PsychiatricProblems => "psychiatricProblems": psychiatric_problems,
    }
}

leaf_fields! {
    /// Leaves of [`FamilyChecklist`].
    pub enum FamilyChecklistField for FamilyChecklist {
        Diabetes => "diabetes": diabetes,
        Hypertension => "hypertension": hypertension,
        Thyroid => "thyroid": thyroid,
        Stroke => "stroke": stroke,
        Tb => "tb": tb,
        Cancers => "cancers": cancers,
        Twins => "twins": twins,
        MentallyChallenged => "mentallyChallenged": mentally_challenged,
    }
}

leaf_fields! {
    /// Leaves of [`PersonalHabits`].
    pub enum PersonalHabitsField for PersonalHabits {
        Smoking => "smoking": smoking,
        Alcohol => "alcohol": alcohol,
        Consanguinity => "consanguinity": consanguinity,
        PsychologicalStress => "psychologicalStress": psychological_stress,
    }
}

/// A leaf of the standalone medical-history form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MedicalHistoryField {
    PastHistory(PastHistoryField),
    FamilyHistory(FamilyChecklistField),
    PersonalHabits(PersonalHabitsField),
}

impl MedicalHistoryField {
    pub fn section(self) -> &'static str {
        match self {
            MedicalHistoryField::PastHistory(_) => "pastHistory",
            MedicalHistoryField::FamilyHistory(_) => "familyHistory",
            MedicalHistoryField::PersonalHabits(_) => "personalHabits",
        }
    }

    pub fn leaf(self) -> &'static str {
        match self {
            MedicalHistoryField::PastHistory(f) => f.name(),
            MedicalHistoryField::FamilyHistory(f) => f.name(),
            MedicalHistoryField::PersonalHabits(f) => f.name(),
        }
    }
}

impl fmt::Display for MedicalHistoryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section(), self.leaf())
    }
}

impl FieldSelector for MedicalHistoryField {
    fn all() -> Vec<Self> {
        let past = PastHistoryField::ALL.iter().copied().map(Self::PastHistory);
        let family = FamilyChecklistField::ALL
            .iter()
            .copied()
            .map(Self::FamilyHistory);
        let habits = PersonalHabitsField::ALL
            .iter()
            .copied()
            .map(Self::PersonalHabits);
        past.chain(family).chain(habits).collect()
    }

    fn kind(self) -> FieldKind {
        match self {
            MedicalHistoryField::PastHistory(f) => f.kind(),
            MedicalHistoryField::FamilyHistory(f) => f.kind(),
            MedicalHistoryField::PersonalHabits(f) => f.kind(),
        }
    }

    fn parse_path(path: &str) -> CoreResult<Self> {
        let (section, rest) = split_section(path)?;
        match section {
            "pastHistory" => section_leaf(path, section, rest).map(Self::PastHistory),
            "familyHistory" => section_leaf(path, section, rest).map(Self::FamilyHistory),
            "personalHabits" => section_leaf(path, section, rest).map(Self::PersonalHabits),
            _ => Err(unknown_section(path, section)),
        }
    }
}

impl Editable for MedicalHistoryData {
    type Field = MedicalHistoryField;

    fn get(&self, field: MedicalHistoryField) -> FieldValue {
        match field {
            MedicalHistoryField::PastHistory(f) => f.get(&self.past_history),
            MedicalHistoryField::FamilyHistory(f) => f.get(&self.family_history),
            MedicalHistoryField::PersonalHabits(f) => f.get(&self.personal_habits),
        }
    }

    fn put(&mut self, field: MedicalHistoryField, value: FieldValue) -> CoreResult<()> {
        let path = field.to_string();
        match field {
            MedicalHistoryField::PastHistory(f) => {
                f.put(Arc::make_mut(&mut self.past_history), value, &path)
            }
            MedicalHistoryField::FamilyHistory(f) => {
                f.put(Arc::make_mut(&mut self.family_history), value, &path)
            }
            MedicalHistoryField::PersonalHabits(f) => {
                f.put(Arc::make_mut(&mut self.personal_habits), value, &path)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::update;
    use crate::CoreError;

    #[test]
    fn paths_resolve_to_typed_fields() {
        assert_eq!(
            MedicalHistoryField::parse_path("pastHistory.surgery").expect("resolves"),
            MedicalHistoryField::PastHistory(PastHistoryField::Surgery)
        );
        assert_eq!(
            MedicalHistoryField::parse_path("personalHabits.psychologicalStress")
                .expect("resolves")
                .to_string(),
            "personalHabits.psychologicalStress"
        );
        assert_eq!(
            MedicalHistoryField::PastHistory(PastHistoryField::Surgery).kind(),
            FieldKind::Text
        );
    }

    #[test]
    fn section_paths_are_not_leaves() {
        let err = MedicalHistoryField::parse_path("familyHistory").expect_err("section only");
        assert!(
            matches!(err, CoreError::PathResolution { reason, .. } if reason.contains("section"))
        );

        let err = MedicalHistoryField::parse_path("socialHistory.smoking").expect_err("unknown");
        assert!(matches!(err, CoreError::PathResolution { .. }));
    }

    #[test]
    fn update_copies_only_the_touched_section() {
        let form = MedicalHistoryData::default();
        let next = update(
            &form,
            MedicalHistoryField::FamilyHistory(FamilyChecklistField::Twins),
            FieldValue::Flag(true),
        )
        .expect("update should succeed");

        assert!(next.family_history.twins);
        assert!(!form.family_history.twins);
        assert!(!Arc::ptr_eq(&form.family_history, &next.family_history));
        assert!(Arc::ptr_eq(&form.past_history, &next.past_history));
        assert!(Arc::ptr_eq(&form.personal_habits, &next.personal_habits));
    }

    #[test]
    fn every_field_round_trips_through_its_path() {
        for field in MedicalHistoryField::all() {
            let parsed = MedicalHistoryField::parse_path(&field.to_string()).expect("parses");
            assert_eq!(parsed, field);
        }
        assert_eq!(MedicalHistoryField::all().len(), 24);
    }
}
