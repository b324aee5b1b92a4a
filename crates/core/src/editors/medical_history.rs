//! Standalone medical-history form.
//!
//! Field edits are only accepted between `BeginEdit` and `Save` or `Cancel`.
//! Both leave edit mode with the edits kept.

use super::{apply, Edit};
use crate::component::{Component, Context};
use crate::field::{Editable, FieldSelector, FieldValue};
use crate::fields::history::MedicalHistoryField;
use crate::{CoreError, CoreResult};
use obgyn_records::MedicalHistoryData;
use tracing::info;

#[derive(Clone, Debug, PartialEq)]
pub enum MedicalHistoryAction {
    BeginEdit,
    Edit(Edit<MedicalHistoryField>),
    Save,
    Cancel,
}

#[derive(Clone, Debug, Default)]
pub struct MedicalHistoryEditor {
    data: MedicalHistoryData,
    editing: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MedicalHistoryView {
    pub data: MedicalHistoryData,
    pub editing: bool,
    /// Names of every ticked condition, across all three sections.
    pub positives: Vec<String>,
}

impl MedicalHistoryEditor {
    pub fn new(data: MedicalHistoryData) -> Self {
        Self {
            data,
            editing: false,
        }
    }

    pub fn data(&self) -> &MedicalHistoryData {
        &self.data
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    fn require_editing(&self) -> CoreResult<()> {
        if self.editing {
            Ok(())
        } else {
            Err(CoreError::NotEditing("medical history"))
        }
    }
}

impl Component for MedicalHistoryEditor {
    type Action = MedicalHistoryAction;
    type View = MedicalHistoryView;

    fn reduce(&self, action: MedicalHistoryAction, _ctx: &mut Context) -> CoreResult<Self> {
        let mut next = self.clone();
        match action {
            MedicalHistoryAction::BeginEdit => {
                next.editing = true;
            }
            MedicalHistoryAction::Edit(edit) => {
                self.require_editing()?;
                next.data = apply(&self.data, edit)?;
            }
            MedicalHistoryAction::Save => {
                self.require_editing()?;
                info!("medical history saved");
                next.editing = false;
            }
            MedicalHistoryAction::Cancel => {
                self.require_editing()?;
                next.editing = false;
            }
        }
        Ok(next)
    }

    fn view(&self) -> MedicalHistoryView {
        let positives = MedicalHistoryField::all()
            .into_iter()
            .filter(|field| matches!(self.data.get(*field), FieldValue::Flag(true)))
            .map(|field| field.to_string())
            .collect();
        MedicalHistoryView {
            data: self.data.clone(),
            editing: self.is_editing(),
            positives,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use obgyn_ids::SequentialIdGenerator;
    use std::sync::Arc;

    fn ctx() -> Context {
        let today = NaiveDate::from_ymd_opt(2025, 8, 1).expect("valid date");
        Context::new(Box::new(SequentialIdGenerator::new()), today)
    }

    #[test]
    fn edits_require_edit_mode() {
        let mut ctx = ctx();
        let editor = MedicalHistoryEditor::default();
        let err = editor
            .reduce(
                MedicalHistoryAction::Edit(Edit::input("pastHistory.asthma", "yes")),
                &mut ctx,
            )
            .expect_err("not editing");
        assert!(matches!(err, CoreError::NotEditing("medical history")));
    }

    #[test]
    fn save_keeps_edits_and_leaves_edit_mode() {
        let mut ctx = ctx();
        let editor = MedicalHistoryEditor::default()
            .reduce(MedicalHistoryAction::BeginEdit, &mut ctx)
            .expect("begin")
            .reduce(
                MedicalHistoryAction::Edit(Edit::input("pastHistory.asthma", "yes")),
                &mut ctx,
            )
            .expect("asthma")
            .reduce(
                MedicalHistoryAction::Edit(Edit::input("personalHabits.smoking", "true")),
                &mut ctx,
            )
            .expect("smoking")
            .reduce(MedicalHistoryAction::Save, &mut ctx)
            .expect("save");

        assert!(!editor.is_editing());
        assert!(editor.data().past_history.asthma);
        assert_eq!(
            editor.view().positives,
            vec!["pastHistory.asthma".to_string(), "personalHabits.smoking".to_string()]
        );
    }

    #[test]
    fn cancel_keeps_edits_and_leaves_edit_mode() {
        let mut ctx = ctx();
        let before = MedicalHistoryEditor::default();
        let editor = before
            .reduce(MedicalHistoryAction::BeginEdit, &mut ctx)
            .expect("begin")
            .reduce(
                MedicalHistoryAction::Edit(Edit::input("familyHistory.twins", "yes")),
                &mut ctx,
            )
            .expect("twins")
            .reduce(MedicalHistoryAction::Cancel, &mut ctx)
            .expect("cancel");

        assert!(!editor.is_editing());
        assert!(editor.data().family_history.twins);
        assert!(Arc::ptr_eq(
            &editor.data().past_history,
            &before.data().past_history
        ));

        let err = editor
            .reduce(
                MedicalHistoryAction::Edit(Edit::input("familyHistory.twins", "no")),
                &mut ctx,
            )
            .expect_err("edit mode left");
        assert!(matches!(err, CoreError::NotEditing("medical history")));
    }

    #[test]
    fn save_outside_edit_mode_is_rejected() {
        let mut ctx = ctx();
        let err = MedicalHistoryEditor::default()
            .reduce(MedicalHistoryAction::Save, &mut ctx)
            .expect_err("not editing");
        assert!(matches!(err, CoreError::NotEditing(_)));
    }
}
