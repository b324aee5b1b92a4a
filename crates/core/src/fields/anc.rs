//! Selectors for the ANC case.
//!
//! Two derivations hang off case updates:
//! - writing `bookingVisit.height` or `bookingVisit.weight` recomputes
//!   `bookingVisit.bmi` when both are positive,
//! - writing `obstetricStatus.lmp` sets `obstetricStatus.edd` to LMP + 280 days
//!   when the new LMP is present.
//!
//! EDD stays writable on its own so a clinician can override it; the next LMP
//! write replaces any override.

use super::history::{FamilyChecklistField, PastHistoryField, PersonalHabitsField};
use super::{section_leaf, unknown_section};
use crate::derive;
use crate::field::{
    leaf_fields, path_error, split_section, Editable, FieldKind, FieldSelector, FieldValue,
};
use crate::CoreResult;
use obgyn_records::{
    AncCase, BaselineTests, BookingVisit, DeliveryOutcome, ObstetricStatus, PostnatalCare,
    PostnatalChecklist, PostnatalExamination, UsgTracking, Vaccinations,
};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

leaf_fields! {
    pub enum ObstetricStatusField for ObstetricStatus {
        Lmp => "lmp": lmp,
        Edd => "edd": edd,
        ScanEdd => "scanEdd": scan_edd,
        Gravida => "gravida": gravida,
        Para => "para": para,
        Living => "living": living,
        Abortions => "abortions": abortions,
        RiskFactors => "riskFactors": risk_factors,
        MenstrualCycle => "menstrualCycle": menstrual_cycle,
        PreviousContraception => "previousContraception": previous_contraception,
        PapSmear => "papSmear": pap_smear,
        MarriedLifeDuration => "marriedLifeDuration": married_life_duration,
    }
}

leaf_fields! {
    pub enum BaselineTestsField for BaselineTests {
        Hb => "hb": hb,
        Pcv => "pcv": pcv,
        Platelets => "platelets": platelets,
        FbsRbs => "fbsRbs": fbs_rbs,
        GctGtt => "gctGtt": gct_gtt,
        Tsh => "tsh": tsh,
        RubellaIgg => "rubellaIgG": rubella_igg,
        Hiv => "hiv": hiv,
        HbsAg => "hbsAg": hbs_ag,
        Vdrl => "vdrl": vdrl,
        UrineAnalysis => "urineAnalysis": urine_analysis,
        Hba1c => "hba1c": hba1c,
    }
}

leaf_fields! {
    pub enum UsgTrackingField for UsgTracking {
        DatingScanDate => "datingScanDate": dating_scan_date,
        Scan11To13WeeksDate => "scan11_13WeeksDate": scan_11_13_weeks_date,
        CombinedScreeningDate => "combinedScreeningDate": combined_screening_date,
        AnomalyScanDate => "anomalyScanDate": anomaly_scan_date,
    }
}

leaf_fields! {
    pub enum VaccinationsField for Vaccinations {
        TdVaccineDate => "tdVaccineDate": td_vaccine_date,
        TdapVaccineDate => "tdapVaccineDate": tdap_vaccine_date,
        IctDate => "ictDate": ict_date,
        AntiDDate => "antiDDate": anti_d_date,
    }
}

leaf_fields! {
    /// Booking visit leaves. `bmi` is derived and has no selector.
    pub enum BookingVisitField for BookingVisit {
        BookingDate => "bookingDate": booking_date,
        Height => "height": height,
        Weight => "weight": weight,
        ThyroidExam => "thyroidExam": thyroid_exam,
        BreastExam => "breastExam": breast_exam,
        CvsExam => "cvsExam": cvs_exam,
        RsExam => "rsExam": rs_exam,
        PerAbdomenFindings => "perAbdomenFindings": per_abdomen_findings,
    }
}

leaf_fields! {
    pub enum DeliveryOutcomeField for DeliveryOutcome {
        DateOfDelivery => "dateOfDelivery": date_of_delivery,
        SexOfBaby => "sexOfBaby": sex_of_baby,
        ModeOfDelivery => "modeOfDelivery": mode_of_delivery,
        BirthWeight => "birthWeight": birth_weight,
        IndicationForCs => "indicationForCS": indication_for_cs,
        PerinealTear => "perinealTear": perineal_tear,
        Complications => "complications": complications,
    }
}

leaf_fields! {
    pub enum PostnatalChecklistField for PostnatalChecklist {
        Diabetes => "diabetes": diabetes,
        Hypertension => "hypertension": hypertension,
        Thyroid => "thyroid": thyroid,
        MoodDepression => "moodDepression": mood_depression,
    }
}

leaf_fields! {
    pub enum PostnatalExaminationField for PostnatalExamination {
        Bp => "bp": bp,
        Pallor => "pallor": pallor,
        Breasts => "breasts": breasts,
        PerAbdomen => "perAbdomen": per_abdomen,
        Perineum => "perineum": perineum,
    }
}

// ============================================================================
// Postnatal care (two levels deep)
// ============================================================================

/// A leaf of [`PostnatalCare`], either direct or inside one of its subsections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PostnatalCareField {
    Checklist(PostnatalChecklistField),
    Examination(PostnatalExaminationField),
    ContraceptionAdvice,
    NextCheckupDate,
}

impl PostnatalCareField {
    fn get(self, care: &PostnatalCare) -> FieldValue {
        match self {
            PostnatalCareField::Checklist(f) => f.get(&care.checklist),
            PostnatalCareField::Examination(f) => f.get(&care.examination),
            PostnatalCareField::ContraceptionAdvice => care.contraception_advice.into(),
            PostnatalCareField::NextCheckupDate => care.next_checkup_date.into(),
        }
    }

    fn put(self, care: &mut PostnatalCare, value: FieldValue, path: &str) -> CoreResult<()> {
        match self {
            PostnatalCareField::Checklist(f) => f.put(Arc::make_mut(&mut care.checklist), value, path),
            PostnatalCareField::Examination(f) => {
                f.put(Arc::make_mut(&mut care.examination), value, path)
            }
            PostnatalCareField::ContraceptionAdvice => {
                care.contraception_advice = crate::field::LeafValue::from_field_value(value, path)?;
                Ok(())
            }
            PostnatalCareField::NextCheckupDate => {
                care.next_checkup_date = crate::field::LeafValue::from_field_value(value, path)?;
                Ok(())
            }
        }
    }
}

impl fmt::Display for PostnatalCareField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostnatalCareField::Checklist(leaf) => write!(f, "checklist.{leaf}"),
            PostnatalCareField::Examination(leaf) => write!(f, "examination.{leaf}"),
            PostnatalCareField::ContraceptionAdvice => f.write_str("contraceptionAdvice"),
            PostnatalCareField::NextCheckupDate => f.write_str("nextCheckupDate"),
        }
    }
}

impl FieldSelector for PostnatalCareField {
    fn all() -> Vec<Self> {
        let checklist = PostnatalChecklistField::ALL
            .iter()
            .copied()
            .map(Self::Checklist);
        let examination = PostnatalExaminationField::ALL
            .iter()
            .copied()
            .map(Self::Examination);
        checklist
            .chain(examination)
            .chain([Self::ContraceptionAdvice, Self::NextCheckupDate])
            .collect()
    }

    fn kind(self) -> FieldKind {
        match self {
            PostnatalCareField::Checklist(f) => f.kind(),
            PostnatalCareField::Examination(f) => f.kind(),
            PostnatalCareField::ContraceptionAdvice => FieldKind::Flag,
            PostnatalCareField::NextCheckupDate => FieldKind::Date,
        }
    }

    fn parse_path(path: &str) -> CoreResult<Self> {
        let (head, rest) = split_section(path)?;
        match (head, rest) {
            ("checklist", rest) => section_leaf(path, head, rest).map(Self::Checklist),
            ("examination", rest) => section_leaf(path, head, rest).map(Self::Examination),
            ("contraceptionAdvice", None) => Ok(Self::ContraceptionAdvice),
            ("nextCheckupDate", None) => Ok(Self::NextCheckupDate),
            ("contraceptionAdvice" | "nextCheckupDate", Some(_)) => {
                Err(path_error(path, format!("'{head}' is a field and has no children")))
            }
            _ => Err(path_error(path, format!("unknown field '{head}'"))),
        }
    }
}

// ============================================================================
// Case
// ============================================================================

const LIST_SECTIONS: [&str; 3] = ["pastObstetricHistory", "followUpTests", "followUpVisits"];

/// A leaf of an [`AncCase`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AncField {
    ObstetricStatus(ObstetricStatusField),
    PastHistory(PastHistoryField),
    FamilyHistory(FamilyChecklistField),
    PersonalHabits(PersonalHabitsField),
    BaselineTests(BaselineTestsField),
    UsgTracking(UsgTrackingField),
    Vaccinations(VaccinationsField),
    BookingVisit(BookingVisitField),
    DeliveryOutcome(DeliveryOutcomeField),
    PostnatalCare(PostnatalCareField),
}

impl AncField {
    pub fn section(self) -> &'static str {
        match self {
            AncField::ObstetricStatus(_) => "obstetricStatus",
            AncField::PastHistory(_) => "pastHistory",
            AncField::FamilyHistory(_) => "familyHistory",
            AncField::PersonalHabits(_) => "personalHabits",
            AncField::BaselineTests(_) => "baselineTests",
            AncField::UsgTracking(_) => "usgTracking",
            AncField::Vaccinations(_) => "vaccinations",
            AncField::BookingVisit(_) => "bookingVisit",
            AncField::DeliveryOutcome(_) => "deliveryOutcome",
            AncField::PostnatalCare(_) => "postnatalCare",
        }
    }
}

impl fmt::Display for AncField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let section = self.section();
        match self {
            AncField::ObstetricStatus(leaf) => write!(f, "{section}.{leaf}"),
            AncField::PastHistory(leaf) => write!(f, "{section}.{leaf}"),
            AncField::FamilyHistory(leaf) => write!(f, "{section}.{leaf}"),
            AncField::PersonalHabits(leaf) => write!(f, "{section}.{leaf}"),
            AncField::BaselineTests(leaf) => write!(f, "{section}.{leaf}"),
            AncField::UsgTracking(leaf) => write!(f, "{section}.{leaf}"),
            AncField::Vaccinations(leaf) => write!(f, "{section}.{leaf}"),
            AncField::BookingVisit(leaf) => write!(f, "{section}.{leaf}"),
            AncField::DeliveryOutcome(leaf) => write!(f, "{section}.{leaf}"),
            AncField::PostnatalCare(leaf) => write!(f, "{section}.{leaf}"),
        }
    }
}

impl FieldSelector for AncField {
    fn all() -> Vec<Self> {
        let mut fields = Vec::new();
        fields.extend(ObstetricStatusField::ALL.iter().copied().map(Self::ObstetricStatus));
        fields.extend(PastHistoryField::ALL.iter().copied().map(Self::PastHistory));
        fields.extend(FamilyChecklistField::ALL.iter().copied().map(Self::FamilyHistory));
        fields.extend(PersonalHabitsField::ALL.iter().copied().map(Self::PersonalHabits));
        fields.extend(BaselineTestsField::ALL.iter().copied().map(Self::BaselineTests));
        fields.extend(UsgTrackingField::ALL.iter().copied().map(Self::UsgTracking));
        fields.extend(VaccinationsField::ALL.iter().copied().map(Self::Vaccinations));
        fields.extend(BookingVisitField::ALL.iter().copied().map(Self::BookingVisit));
        fields.extend(DeliveryOutcomeField::ALL.iter().copied().map(Self::DeliveryOutcome));
        fields.extend(PostnatalCareField::all().into_iter().map(Self::PostnatalCare));
        fields
    }

    fn kind(self) -> FieldKind {
        match self {
            AncField::ObstetricStatus(f) => f.kind(),
            AncField::PastHistory(f) => f.kind(),
            AncField::FamilyHistory(f) => f.kind(),
            AncField::PersonalHabits(f) => f.kind(),
            AncField::BaselineTests(f) => f.kind(),
            AncField::UsgTracking(f) => f.kind(),
            AncField::Vaccinations(f) => f.kind(),
            AncField::BookingVisit(f) => f.kind(),
            AncField::DeliveryOutcome(f) => f.kind(),
            AncField::PostnatalCare(f) => f.kind(),
        }
    }

    fn parse_path(path: &str) -> CoreResult<Self> {
        let (section, rest) = split_section(path)?;
        match section {
            "obstetricStatus" => section_leaf(path, section, rest).map(Self::ObstetricStatus),
            "pastHistory" => section_leaf(path, section, rest).map(Self::PastHistory),
            "familyHistory" => section_leaf(path, section, rest).map(Self::FamilyHistory),
            "personalHabits" => section_leaf(path, section, rest).map(Self::PersonalHabits),
            "baselineTests" => section_leaf(path, section, rest).map(Self::BaselineTests),
            "usgTracking" => section_leaf(path, section, rest).map(Self::UsgTracking),
            "vaccinations" => section_leaf(path, section, rest).map(Self::Vaccinations),
            "bookingVisit" => section_leaf(path, section, rest).map(Self::BookingVisit),
            "deliveryOutcome" => section_leaf(path, section, rest).map(Self::DeliveryOutcome),
            "postnatalCare" => section_leaf(path, section, rest).map(Self::PostnatalCare),
            list if LIST_SECTIONS.contains(&list) => Err(path_error(
                path,
                format!("'{list}' is a list; edit its entries by id"),
            )),
            _ => Err(unknown_section(path, section)),
        }
    }

    fn fallback(self) -> FieldValue {
        match self {
            // a pregnancy being recorded is at least the first
            AncField::ObstetricStatus(ObstetricStatusField::Gravida) => FieldValue::Count(1),
            other => other.kind().zero(),
        }
    }
}

impl Editable for AncCase {
    type Field = AncField;

    fn get(&self, field: AncField) -> FieldValue {
        match field {
            AncField::ObstetricStatus(f) => f.get(&self.obstetric_status),
            AncField::PastHistory(f) => f.get(&self.past_history),
            AncField::FamilyHistory(f) => f.get(&self.family_history),
            AncField::PersonalHabits(f) => f.get(&self.personal_habits),
            AncField::BaselineTests(f) => f.get(&self.baseline_tests),
            AncField::UsgTracking(f) => f.get(&self.usg_tracking),
            AncField::Vaccinations(f) => f.get(&self.vaccinations),
            AncField::BookingVisit(f) => f.get(&self.booking_visit),
            AncField::DeliveryOutcome(f) => f.get(&self.delivery_outcome),
            AncField::PostnatalCare(f) => f.get(&self.postnatal_care),
        }
    }

    fn put(&mut self, field: AncField, value: FieldValue) -> CoreResult<()> {
        let path = field.to_string();
        match field {
            AncField::ObstetricStatus(f) => {
                f.put(Arc::make_mut(&mut self.obstetric_status), value, &path)
            }
            AncField::PastHistory(f) => f.put(Arc::make_mut(&mut self.past_history), value, &path),
            AncField::FamilyHistory(f) => {
                f.put(Arc::make_mut(&mut self.family_history), value, &path)
            }
            AncField::PersonalHabits(f) => {
                f.put(Arc::make_mut(&mut self.personal_habits), value, &path)
            }
            AncField::BaselineTests(f) => {
                f.put(Arc::make_mut(&mut self.baseline_tests), value, &path)
            }
            AncField::UsgTracking(f) => f.put(Arc::make_mut(&mut self.usg_tracking), value, &path),
            AncField::Vaccinations(f) => {
                f.put(Arc::make_mut(&mut self.vaccinations), value, &path)
            }
            AncField::BookingVisit(f) => {
                f.put(Arc::make_mut(&mut self.booking_visit), value, &path)
            }
            AncField::DeliveryOutcome(f) => {
                f.put(Arc::make_mut(&mut self.delivery_outcome), value, &path)
            }
            AncField::PostnatalCare(f) => {
                f.put(Arc::make_mut(&mut self.postnatal_care), value, &path)
            }
        }
    }

    fn derive(&mut self, field: AncField) {
        match field {
            AncField::BookingVisit(BookingVisitField::Height | BookingVisitField::Weight) => {
                let booking = &self.booking_visit;
                if let Some(bmi) = derive::bmi(booking.height, booking.weight) {
                    Arc::make_mut(&mut self.booking_visit).bmi = bmi;
                    debug!(bmi, "booking BMI recomputed");
                }
            }
            AncField::ObstetricStatus(ObstetricStatusField::Lmp) => {
                if let Some(edd) = self
                    .obstetric_status
                    .lmp
                    .and_then(derive::estimated_delivery_date)
                {
                    Arc::make_mut(&mut self.obstetric_status).edd = Some(edd);
                    debug!(%edd, "EDD recomputed from LMP");
                }
            }
            _ => {}
        }
    }
}
