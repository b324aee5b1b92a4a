//! Selector for the patient profile.
//!
//! The profile has a few leaves that are not plain text: the name must stay
//! non-empty, allergies are a list edited as comma-separated text, and the Rh
//! status is a closed choice. The UHID is the patient's key and is not editable.

use crate::field::{path_error, Editable, FieldKind, FieldSelector, FieldValue, LeafValue};
use crate::{CoreError, CoreResult};
use obgyn_records::{NonEmptyText, PatientProfile, RhStatus};
use std::fmt;

const RH_STATUS_NAMES: &[&str] = &["Positive", "Negative"];

/// A leaf of a [`PatientProfile`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Name,
    Age,
    Dob,
    Occupation,
    SpouseName,
    SpouseOccupation,
    Address,
    Mobile,
    Allergies,
    BloodGroup,
    RhStatus,
    HusbandBloodGroup,
}

impl ProfileField {
    pub const ALL: &'static [ProfileField] = &[
        ProfileField::Name,
        ProfileField::Age,
        ProfileField::Dob,
        ProfileField::Occupation,
        ProfileField::SpouseName,
        ProfileField::SpouseOccupation,
        ProfileField::Address,
        ProfileField::Mobile,
        ProfileField::Allergies,
        ProfileField::BloodGroup,
        ProfileField::RhStatus,
        ProfileField::HusbandBloodGroup,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Age => "age",
            ProfileField::Dob => "dob",
            ProfileField::Occupation => "occupation",
            ProfileField::SpouseName => "spouseName",
            ProfileField::SpouseOccupation => "spouseOccupation",
            ProfileField::Address => "address",
            ProfileField::Mobile => "mobile",
            ProfileField::Allergies => "allergies",
            ProfileField::BloodGroup => "bloodGroup",
            ProfileField::RhStatus => "rhStatus",
            ProfileField::HusbandBloodGroup => "husbandBloodGroup",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FieldSelector for ProfileField {
    fn all() -> Vec<Self> {
        Self::ALL.to_vec()
    }

    fn kind(self) -> FieldKind {
        match self {
            ProfileField::Age => FieldKind::Count,
            ProfileField::Dob => FieldKind::Date,
            ProfileField::RhStatus => FieldKind::Choice(RH_STATUS_NAMES),
            _ => FieldKind::Text,
        }
    }

    fn parse_path(path: &str) -> CoreResult<Self> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Err(path_error(path, "path is empty"));
        }
        if trimmed == "uhid" {
            return Err(path_error(path, "the UHID cannot be edited"));
        }
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.name() == trimmed)
            .ok_or_else(|| path_error(path, format!("unknown field '{trimmed}'")))
    }
}

/// Split comma-separated allergies, dropping blanks.
fn parse_allergies(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

impl Editable for PatientProfile {
    type Field = ProfileField;

    fn get(&self, field: ProfileField) -> FieldValue {
        match field {
            ProfileField::Name => self.name.as_str().into(),
            ProfileField::Age => self.age.into(),
            ProfileField::Dob => self.dob.into(),
            ProfileField::Occupation => self.occupation.clone().into(),
            ProfileField::SpouseName => self.spouse_name.clone().into(),
            ProfileField::SpouseOccupation => self.spouse_occupation.clone().into(),
            ProfileField::Address => self.address.clone().into(),
            ProfileField::Mobile => self.mobile.clone().into(),
            ProfileField::Allergies => self.allergies.join(", ").into(),
            ProfileField::BloodGroup => self.blood_group.clone().into(),
            ProfileField::RhStatus => self.rh_status.as_str().into(),
            ProfileField::HusbandBloodGroup => self.husband_blood_group.clone().into(),
        }
    }

    fn put(&mut self, field: ProfileField, value: FieldValue) -> CoreResult<()> {
        let path = field.name();
        match field {
            ProfileField::Name => {
                let text = String::from_field_value(value, path)?;
                self.name = NonEmptyText::new(&text)
                    .map_err(|_| CoreError::InvalidInput("patient name cannot be empty".into()))?;
            }
            ProfileField::Age => self.age = LeafValue::from_field_value(value, path)?,
            ProfileField::Dob => self.dob = LeafValue::from_field_value(value, path)?,
            ProfileField::Occupation => self.occupation = LeafValue::from_field_value(value, path)?,
            ProfileField::SpouseName => self.spouse_name = LeafValue::from_field_value(value, path)?,
            ProfileField::SpouseOccupation => {
                self.spouse_occupation = LeafValue::from_field_value(value, path)?
            }
            ProfileField::Address => self.address = LeafValue::from_field_value(value, path)?,
            ProfileField::Mobile => self.mobile = LeafValue::from_field_value(value, path)?,
            ProfileField::Allergies => {
                let text = String::from_field_value(value, path)?;
                self.allergies = parse_allergies(&text);
            }
            ProfileField::BloodGroup => self.blood_group = LeafValue::from_field_value(value, path)?,
            ProfileField::RhStatus => {
                let text = String::from_field_value(value, path)?;
                self.rh_status = RhStatus::from_name(&text).ok_or(CoreError::InvalidChoice {
                    path: path.to_string(),
                    value: text,
                })?;
            }
            ProfileField::HusbandBloodGroup => {
                self.husband_blood_group = LeafValue::from_field_value(value, path)?
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{update, update_input};
    use obgyn_records::StoreData;

    fn profile() -> PatientProfile {
        StoreData::bundled()
            .expect("bundled store")
            .records
            .remove(0)
            .profile
    }

    #[test]
    fn rh_status_is_a_closed_choice() {
        let p = update_input(&profile(), "rhStatus", "negative").expect("valid choice");
        assert_eq!(p.rh_status, RhStatus::Negative);
        assert_eq!(p.blood_group_badge(), "O-");

        let err = update_input(&p, "rhStatus", "maybe").expect_err("not a choice");
        assert!(matches!(err, CoreError::InvalidChoice { value, .. } if value == "maybe"));
    }

    #[test]
    fn name_cannot_be_blank() {
        let err = update(&profile(), ProfileField::Name, FieldValue::Text("  ".into()))
            .expect_err("blank name");
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn allergies_are_edited_as_text() {
        let p = update_input(&profile(), "allergies", "Penicillin, , Latex ").expect("allergies");
        assert_eq!(p.allergies, vec!["Penicillin".to_string(), "Latex".to_string()]);
        assert_eq!(p.get(ProfileField::Allergies), FieldValue::Text("Penicillin, Latex".into()));
    }

    #[test]
    fn uhid_is_not_a_field() {
        let err = ProfileField::parse_path("uhid").expect_err("read-only");
        assert!(matches!(err, CoreError::PathResolution { reason, .. } if reason.contains("UHID")));
    }

    #[test]
    fn age_input_is_coerced() {
        let p = update_input(&profile(), "age", "29").expect("age");
        assert_eq!(p.age, 29);
        let p = update_input(&p, "age", "twenty").expect("age");
        assert_eq!(p.age, 0);
    }
}
