//! Selectors for list entries: follow-up visits and tests, past pregnancies,
//! and the patient's visit log.
//!
//! Entries are flat, so each selector is a single enum. Ids and the positional
//! `pregnancyNumber` are not selectable; the list operations own them.

use crate::field::{leaf_fields, Editable, FieldValue};
use crate::lists::Entry;
use crate::CoreResult;
use obgyn_ids::EntryId;
use obgyn_records::{FollowUpTest, FollowUpVisit, GyneVisit, PastPregnancy, VisitRecord};

leaf_fields! {
    pub enum FollowUpVisitField for FollowUpVisit {
        Date => "date": date,
        Complaints => "complaints": complaints,
        Weight => "weight": weight,
        BpSystolic => "bpSystolic": bp_systolic,
        BpDiastolic => "bpDiastolic": bp_diastolic,
        WeeksByLmp => "weeksByLmp": weeks_by_lmp,
        Sfh => "sfh": sfh,
        FetalHeart => "fetalHeart": fetal_heart,
        Presentation => "presentation": presentation,
        RemarksPlan => "remarksPlan": remarks_plan,
        NextVisitDate => "nextVisitDate": next_visit_date,
        SeenBy => "seenBy": seen_by,
    }
}

leaf_fields! {
    pub enum FollowUpTestField for FollowUpTest {
        Period => "period": period,
        Date => "date": date,
        Hb => "hb": hb,
        Pcv => "pcv": pcv,
        RbsFbs => "rbsFbs": rbs_fbs,
        Gtt => "gtt": gtt,
        Tsh => "tsh": tsh,
    }
}

leaf_fields! {
    pub enum PastPregnancyField for PastPregnancy {
        Year => "year": year,
        AntenatalCourse => "antenatalCourse": antenatal_course,
        ModeOfDelivery => "modeOfDelivery": mode_of_delivery,
        SexOfBaby => "sexOfBaby": sex_of_baby,
        BirthWeight => "birthWeight": birth_weight,
        Remarks => "remarks": remarks,
    }
}

leaf_fields! {
    /// Visit-log leaves. Optional measurements read as 0 when not recorded.
    pub enum VisitRecordField for VisitRecord {
        Date => "date": date,
        Complaints => "complaints": complaints,
        Weight => "weight": weight,
        BpSystolic => "bpSystolic": bp_systolic,
        BpDiastolic => "bpDiastolic": bp_diastolic,
        WeeksFromLmp => "weeksFromLmp": weeks_from_lmp,
        Sfh => "sfh": sfh,
        FetalHeartRate => "fetalHeartRate": fetal_heart_rate,
        FetalPosition => "fetalPosition": fetal_position,
        Pallor => "pallor": pallor,
        PedalEdema => "pedalEdema": pedal_edema,
        PvExam => "pvExam": pv_exam,
        UrineAlbumin => "urineAlbumin": urine_albumin,
        UrineSugar => "urineSugar": urine_sugar,
        Remarks => "remarks": remarks,
        NextVisitDate => "nextVisitDate": next_visit_date,
        SeenBy => "seenBy": seen_by,
    }
}

impl Editable for FollowUpVisit {
    type Field = FollowUpVisitField;

    fn get(&self, field: FollowUpVisitField) -> FieldValue {
        field.get(self)
    }

    fn put(&mut self, field: FollowUpVisitField, value: FieldValue) -> CoreResult<()> {
        field.put(self, value, field.name())
    }
}

impl Entry for FollowUpVisit {
    const LIST: &'static str = "follow-up visit";

    fn entry_id(&self) -> &EntryId {
        &self.id
    }
}

impl Editable for FollowUpTest {
    type Field = FollowUpTestField;

    fn get(&self, field: FollowUpTestField) -> FieldValue {
        field.get(self)
    }

    fn put(&mut self, field: FollowUpTestField, value: FieldValue) -> CoreResult<()> {
        field.put(self, value, field.name())
    }
}

impl Entry for FollowUpTest {
    const LIST: &'static str = "follow-up test";

    fn entry_id(&self) -> &EntryId {
        &self.id
    }
}

impl Editable for PastPregnancy {
    type Field = PastPregnancyField;

    fn get(&self, field: PastPregnancyField) -> FieldValue {
        field.get(self)
    }

    fn put(&mut self, field: PastPregnancyField, value: FieldValue) -> CoreResult<()> {
        field.put(self, value, field.name())
    }
}

impl Entry for PastPregnancy {
    const LIST: &'static str = "past pregnancy";

    fn entry_id(&self) -> &EntryId {
        &self.id
    }
}

impl Editable for VisitRecord {
    type Field = VisitRecordField;

    fn get(&self, field: VisitRecordField) -> FieldValue {
        field.get(self)
    }

    fn put(&mut self, field: VisitRecordField, value: FieldValue) -> CoreResult<()> {
        field.put(self, value, field.name())
    }
}

impl Entry for VisitRecord {
    const LIST: &'static str = "visit";

    fn entry_id(&self) -> &EntryId {
        &self.id
    }
}

impl Entry for GyneVisit {
    const LIST: &'static str = "gynecology visit";

    fn entry_id(&self) -> &EntryId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{update, update_input, FieldKind, FieldSelector};
    use chrono::NaiveDate;
    use obgyn_records::VisitTemplate;

    fn record() -> VisitRecord {
        let id = EntryId::parse("v-9").expect("valid id");
        let date = NaiveDate::from_ymd_opt(2025, 7, 15).expect("valid date");
        VisitRecord::new(id, date, VisitTemplate::Anc)
    }

    #[test]
    fn optional_measurements_read_as_zero() {
        let visit = record();
        assert_eq!(visit.get(VisitRecordField::Weight), FieldValue::Number(0.0));
        assert_eq!(VisitRecordField::Weight.kind(), FieldKind::Number);
        assert_eq!(VisitRecordField::FetalHeartRate.kind(), FieldKind::Count);
    }

    #[test]
    fn zero_clears_an_optional_measurement() {
        let visit = update(&record(), VisitRecordField::Weight, FieldValue::Number(58.5))
            .expect("weight");
        assert_eq!(visit.weight, Some(58.5));

        let visit = update_input(&visit, "weight", "").expect("blank weight");
        assert_eq!(visit.weight, None);
    }

    #[test]
    fn follow_up_visit_fields() {
        let id = EntryId::parse("fv-1").expect("valid id");
        let date = NaiveDate::from_ymd_opt(2025, 7, 15).expect("valid date");
        let visit = FollowUpVisit::new(id, date);

        let visit = update_input(&visit, "bpSystolic", "110").expect("bp");
        let visit = update_input(&visit, "fetalHeart", "142").expect("fhr");
        assert_eq!(visit.bp_systolic, 110);
        assert_eq!(visit.fetal_heart, "142");
        assert_eq!(
            FollowUpVisitField::parse_path("weeksByLmp").expect("resolves"),
            FollowUpVisitField::WeeksByLmp
        );
    }

    #[test]
    fn pregnancy_number_is_not_selectable() {
        assert!(PastPregnancyField::parse_path("pregnancyNumber").is_err());
        assert!(PastPregnancyField::parse_path("id").is_err());
    }
}
