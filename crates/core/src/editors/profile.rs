//! Draft-based editing of the patient profile.
//!
//! `Begin` copies the profile into a draft and `Set` edits the draft. `Save`
//! replaces the profile with the draft; `Cancel` discards it.

use super::{apply, Edit};
use crate::component::{Component, Context};
use crate::fields::profile::ProfileField;
use crate::{CoreError, CoreResult};
use obgyn_records::PatientProfile;
use tracing::info;

#[derive(Clone, Debug, PartialEq)]
pub enum ProfileAction {
    Begin,
    Set(Edit<ProfileField>),
    Save,
    Cancel,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProfileEditor {
    profile: PatientProfile,
    draft: Option<PatientProfile>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProfileView {
    pub profile: PatientProfile,
    pub draft: Option<PatientProfile>,
}

impl ProfileEditor {
    pub fn new(profile: PatientProfile) -> Self {
        Self {
            profile,
            draft: None,
        }
    }

    pub fn profile(&self) -> &PatientProfile {
        &self.profile
    }

    pub fn draft(&self) -> Option<&PatientProfile> {
        self.draft.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    fn current(&self) -> CoreResult<&PatientProfile> {
        self.draft.as_ref().ok_or(CoreError::NoProfileDraft)
    }
}

impl Component for ProfileEditor {
    type Action = ProfileAction;
    type View = ProfileView;

    fn reduce(&self, action: ProfileAction, _ctx: &mut Context) -> CoreResult<Self> {
        let mut next = self.clone();
        match action {
            ProfileAction::Begin => next.draft = Some(self.profile.clone()),
            ProfileAction::Set(edit) => next.draft = Some(apply(self.current()?, edit)?),
            ProfileAction::Save => {
                next.profile = self.current()?.clone();
                next.draft = None;
                info!(uhid = %next.profile.uhid, "profile saved");
            }
            ProfileAction::Cancel => {
                self.current()?;
                next.draft = None;
            }
        }
        Ok(next)
    }

    fn view(&self) -> ProfileView {
        ProfileView {
            profile: self.profile.clone(),
            draft: self.draft.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use obgyn_ids::SequentialIdGenerator;
    use obgyn_records::StoreData;

    fn ctx() -> Context {
        let today = NaiveDate::from_ymd_opt(2025, 7, 15).expect("valid date");
        Context::new(Box::new(SequentialIdGenerator::new()), today)
    }

    fn profile() -> PatientProfile {
        StoreData::bundled()
            .expect("bundled store")
            .records
            .remove(0)
            .profile
    }

    fn drafting(ctx: &mut Context) -> ProfileEditor {
        ProfileEditor::new(profile())
            .reduce(ProfileAction::Begin, ctx)
            .expect("begin")
    }

    #[test]
    fn save_replaces_the_profile() {
        let mut ctx = ctx();
        let editor = drafting(&mut ctx)
            .reduce(ProfileAction::Set(Edit::input("occupation", "Engineer")), &mut ctx)
            .expect("set");
        assert_ne!(editor.profile().occupation, "Engineer");

        let editor = editor.reduce(ProfileAction::Save, &mut ctx).expect("save");
        assert!(!editor.is_editing());
        assert_eq!(editor.profile().occupation, "Engineer");
    }

    #[test]
    fn cancel_discards_the_draft() {
        let mut ctx = ctx();
        let editor = drafting(&mut ctx)
            .reduce(ProfileAction::Set(Edit::input("address", "Mysuru")), &mut ctx)
            .expect("set")
            .reduce(ProfileAction::Cancel, &mut ctx)
            .expect("cancel");

        assert!(editor.draft().is_none());
        assert_eq!(editor.profile(), &profile());
    }

    #[test]
    fn set_without_draft_is_rejected() {
        let mut ctx = ctx();
        for action in [
            ProfileAction::Set(Edit::input("address", "x")),
            ProfileAction::Save,
            ProfileAction::Cancel,
        ] {
            let err = ProfileEditor::new(profile())
                .reduce(action, &mut ctx)
                .expect_err("no draft");
            assert!(matches!(err, CoreError::NoProfileDraft));
        }
    }

    #[test]
    fn invalid_choice_keeps_draft() {
        let mut ctx = ctx();
        let editor = drafting(&mut ctx);
        let err = editor
            .reduce(ProfileAction::Set(Edit::input("rhStatus", "unknown")), &mut ctx)
            .expect_err("bad choice");
        assert!(matches!(err, CoreError::InvalidChoice { .. }));
        assert_eq!(editor.draft(), Some(&profile()));
    }
}
