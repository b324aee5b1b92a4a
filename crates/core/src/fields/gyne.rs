//! Selectors for a gynecology visit.
//!
//! Visit-level leaves are addressed by their bare name (`impression`), section
//! leaves as `section.leaf` (`physicalExam.weight`). Writing
//! `physicalExam.height` or `physicalExam.weight` recomputes
//! `physicalExam.bmi` when both are positive.

use super::{section_leaf, unknown_section};
use crate::derive;
use crate::field::{
    leaf_fields, path_error, split_section, Editable, FieldKind, FieldSelector, FieldValue,
};
use crate::CoreResult;
use obgyn_records::{
    GyneFamilyHistory, GynePastMedicalHistory, GynePersonalHistory, GyneVisit, PhysicalExam,
    VaginalExam,
};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

leaf_fields! {
    /// Leaves stored directly on the visit.
    pub enum GyneVisitField for GyneVisit {
        Date => "date": date,
        Name => "name": name,
        Age => "age": age,
        Lmp => "lmp": lmp,
        Para => "para": para,
        Contraception => "contraception": contraception,
        PreviousSmear => "previousSmear": previous_smear,
        MenstrualCycles => "menstrualCycles": menstrual_cycles,
        PresentingComplaints => "presentingComplaints": presenting_complaints,
        Micturition => "micturition": micturition,
        Bowels => "bowels": bowels,
        Medications => "medications": medications,
        Impression => "impression": impression,
        Advice => "advice": advice,
        DoctorSignature => "doctorSignature": doctor_signature,
    }
}

leaf_fields! {
    pub enum GynePastHistoryField for GynePastMedicalHistory {
        Diabetes => "diabetes": diabetes,
        Hypertension => "hypertension": hypertension,
        ThyroidDysfunction => "thyroidDysfunction": thyroid_dysfunction,
        Migraine => "migraine": migraine,
        Cardiac => "cardiac": cardiac,
        Epilepsy => "epilepsy": epilepsy,
        Asthma => "asthma": asthma,
        Tb => "tb": tb,
        BloodTransfusion => "bloodTransfusion": blood_transfusion,
        Surgery => "surgery": surgery,
        Thromboembolism => "thromboembolism": thromboembolism,
    }
}

leaf_fields! {
    pub enum GyneFamilyHistoryField for GyneFamilyHistory {
        Diabetes => "diabetes": diabetes,
        Hypertension => "hypertension": hypertension,
        ThyroidDysfunction => "thyroidDysfunction": thyroid_dysfunction,
        Tb => "tb": tb,
        Cancers => "cancers": cancers,
        IhdCva => "ihdCva": ihd_cva,
        Thromboembolism => "thromboembolism": thromboembolism,
        PsychiatricProblems => "psychiatricProblems": psychiatric_problems,
    }
}

leaf_fields! {
    pub enum GynePersonalHistoryField for GynePersonalHistory {
        Allergies => "allergies": allergies,
        Smoking => "smoking": smoking,
        Alcohol => "alcohol": alcohol,
        PsychStress => "psychStress": psych_stress,
    }
}

leaf_fields! {
    /// Physical examination leaves. `bmi` is derived and has no selector.
    pub enum PhysicalExamField for PhysicalExam {
        Height => "height": height,
        Weight => "weight": weight,
        Pallor => "pallor": pallor,
        Goiter => "goiter": goiter,
        Pulse => "pulse": pulse,
        BpSystolic => "bpSystolic": bp_systolic,
        BpDiastolic => "bpDiastolic": bp_diastolic,
        Cvs => "cvs": cvs,
        Breasts => "breasts": breasts,
        Rs => "rs": rs,
        PerAbdomen => "perAbdomen": per_abdomen,
    }
}

leaf_fields! {
    pub enum VaginalExamField for VaginalExam {
        VulvaVagina => "vulvaVagina": vulva_vagina,
        Cervix => "cervix": cervix,
        Uterus => "uterus": uterus,
        Adnexa => "adnexa": adnexa,
    }
}

const SECTIONS: [&str; 5] = [
    "pastMedicalHistory",
    "familyHistory",
    "personalHistory",
    "physicalExam",
    "vaginalExam",
];

/// A leaf of a [`GyneVisit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GyneField {
    Visit(GyneVisitField),
    PastMedicalHistory(GynePastHistoryField),
    FamilyHistory(GyneFamilyHistoryField),
    PersonalHistory(GynePersonalHistoryField),
    PhysicalExam(PhysicalExamField),
    VaginalExam(VaginalExamField),
}

impl fmt::Display for GyneField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GyneField::Visit(leaf) => write!(f, "{leaf}"),
            GyneField::PastMedicalHistory(leaf) => write!(f, "pastMedicalHistory.{leaf}"),
            GyneField::FamilyHistory(leaf) => write!(f, "familyHistory.{leaf}"),
            GyneField::PersonalHistory(leaf) => write!(f, "personalHistory.{leaf}"),
            GyneField::PhysicalExam(leaf) => write!(f, "physicalExam.{leaf}"),
            GyneField::VaginalExam(leaf) => write!(f, "vaginalExam.{leaf}"),
        }
    }
}

impl FieldSelector for GyneField {
    fn all() -> Vec<Self> {
        let mut fields = Vec::new();
        fields.extend(GyneVisitField::ALL.iter().copied().map(Self::Visit));
        fields.extend(GynePastHistoryField::ALL.iter().copied().map(Self::PastMedicalHistory));
        fields.extend(GyneFamilyHistoryField::ALL.iter().copied().map(Self::FamilyHistory));
        fields.extend(GynePersonalHistoryField::ALL.iter().copied().map(Self::PersonalHistory));
        fields.extend(PhysicalExamField::ALL.iter().copied().map(Self::PhysicalExam));
        fields.extend(VaginalExamField::ALL.iter().copied().map(Self::VaginalExam));
        fields
    }

    fn kind(self) -> FieldKind {
        match self {
            GyneField::Visit(f) => f.kind(),
            GyneField::PastMedicalHistory(f) => f.kind(),
            GyneField::FamilyHistory(f) => f.kind(),
            GyneField::PersonalHistory(f) => f.kind(),
            GyneField::PhysicalExam(f) => f.kind(),
            GyneField::VaginalExam(f) => f.kind(),
        }
    }

    fn parse_path(path: &str) -> CoreResult<Self> {
        let (head, rest) = split_section(path)?;
        if rest.is_none() {
            if let Some(leaf) = GyneVisitField::from_name(head) {
                return Ok(Self::Visit(leaf));
            }
        } else if GyneVisitField::from_name(head).is_some() {
            return Err(path_error(
                path,
                format!("'{head}' is a field and has no children"),
            ));
        }

        match head {
            "pastMedicalHistory" => section_leaf(path, head, rest).map(Self::PastMedicalHistory),
            "familyHistory" => section_leaf(path, head, rest).map(Self::FamilyHistory),
            "personalHistory" => section_leaf(path, head, rest).map(Self::PersonalHistory),
            "physicalExam" => section_leaf(path, head, rest).map(Self::PhysicalExam),
            "vaginalExam" => section_leaf(path, head, rest).map(Self::VaginalExam),
            _ if rest.is_none() => Err(path_error(path, format!("unknown field '{head}'"))),
            _ => Err(unknown_section(path, head)),
        }
    }
}

impl GyneField {
    /// Known section names, for help output.
    pub fn sections() -> &'static [&'static str] {
        &SECTIONS
    }
}

impl Editable for GyneVisit {
    type Field = GyneField;

    fn get(&self, field: GyneField) -> FieldValue {
        match field {
            GyneField::Visit(f) => f.get(self),
            GyneField::PastMedicalHistory(f) => f.get(&self.past_medical_history),
            GyneField::FamilyHistory(f) => f.get(&self.family_history),
            GyneField::PersonalHistory(f) => f.get(&self.personal_history),
            GyneField::PhysicalExam(f) => f.get(&self.physical_exam),
            GyneField::VaginalExam(f) => f.get(&self.vaginal_exam),
        }
    }

    fn put(&mut self, field: GyneField, value: FieldValue) -> CoreResult<()> {
        let path = field.to_string();
        match field {
            GyneField::Visit(f) => f.put(self, value, &path),
            GyneField::PastMedicalHistory(f) => {
                f.put(Arc::make_mut(&mut self.past_medical_history), value, &path)
            }
            GyneField::FamilyHistory(f) => {
                f.put(Arc::make_mut(&mut self.family_history), value, &path)
            }
            GyneField::PersonalHistory(f) => {
                f.put(Arc::make_mut(&mut self.personal_history), value, &path)
            }
            GyneField::PhysicalExam(f) => {
                f.put(Arc::make_mut(&mut self.physical_exam), value, &path)
            }
            GyneField::VaginalExam(f) => {
                f.put(Arc::make_mut(&mut self.vaginal_exam), value, &path)
            }
        }
    }

    fn derive(&mut self, field: GyneField) {
        if let GyneField::PhysicalExam(PhysicalExamField::Height | PhysicalExamField::Weight) =
            field
        {
            let exam = &self.physical_exam;
            if let Some(bmi) = derive::bmi(exam.height, exam.weight) {
                Arc::make_mut(&mut self.physical_exam).bmi = bmi;
                debug!(bmi, "examination BMI recomputed");
            }
        }
    }
}
