//! Standalone obstetric-history form: the numbered past-pregnancy list.

use super::{apply_to_entry, Edit};
use crate::component::{Component, Context};
use crate::fields::entries::PastPregnancyField;
use crate::lists;
use crate::{CoreError, CoreResult};
use obgyn_ids::{EntryId, IdPrefix};
use obgyn_records::{ObstetricHistoryData, PastPregnancy};
use std::sync::Arc;
use tracing::info;

#[derive(Clone, Debug, PartialEq)]
pub enum ObstetricHistoryAction {
    BeginEdit,
    Add,
    Edit(EntryId, Edit<PastPregnancyField>),
    Remove(EntryId),
    Save,
    Cancel,
}

#[derive(Clone, Debug, Default)]
pub struct ObstetricHistoryEditor {
    data: ObstetricHistoryData,
    editing: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObstetricHistoryView {
    pub entries: Vec<PastPregnancy>,
    pub editing: bool,
}

impl ObstetricHistoryEditor {
    pub fn new(data: ObstetricHistoryData) -> Self {
        Self {
            data,
            editing: false,
        }
    }

    pub fn entries(&self) -> &[PastPregnancy] {
        &self.data.entries
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    fn require_editing(&self) -> CoreResult<()> {
        if self.editing {
            Ok(())
        } else {
            Err(CoreError::NotEditing("obstetric history"))
        }
    }
}

impl Component for ObstetricHistoryEditor {
    type Action = ObstetricHistoryAction;
    type View = ObstetricHistoryView;

    fn reduce(&self, action: ObstetricHistoryAction, ctx: &mut Context) -> CoreResult<Self> {
        let mut next = self.clone();
        match action {
            ObstetricHistoryAction::BeginEdit => {
                next.editing = true;
            }
            ObstetricHistoryAction::Add => {
                self.require_editing()?;
                let id = ctx.next_id(IdPrefix::PastPregnancy);
                lists::append_past_pregnancy(Arc::make_mut(&mut next.data.entries), id);
            }
            ObstetricHistoryAction::Edit(id, edit) => {
                self.require_editing()?;
                apply_to_entry(Arc::make_mut(&mut next.data.entries), &id, edit)?;
            }
            ObstetricHistoryAction::Remove(id) => {
                self.require_editing()?;
                lists::remove_past_pregnancy(Arc::make_mut(&mut next.data.entries), &id)?;
            }
            ObstetricHistoryAction::Save => {
                self.require_editing()?;
                info!(entries = self.data.entries.len(), "obstetric history saved");
                next.editing = false;
            }
            ObstetricHistoryAction::Cancel => {
                self.require_editing()?;
                next.editing = false;
            }
        }
        Ok(next)
    }

    fn view(&self) -> ObstetricHistoryView {
        ObstetricHistoryView {
            entries: self.data.entries.to_vec(),
            editing: self.is_editing(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use obgyn_ids::SequentialIdGenerator;

    fn ctx() -> Context {
        let today = NaiveDate::from_ymd_opt(2025, 8, 1).expect("valid date");
        Context::new(Box::new(SequentialIdGenerator::new()), today)
    }

    fn with_entries(ctx: &mut Context, count: usize) -> ObstetricHistoryEditor {
        let mut editor = ObstetricHistoryEditor::default()
            .reduce(ObstetricHistoryAction::BeginEdit, ctx)
            .expect("begin");
        for _ in 0..count {
            editor = editor
                .reduce(ObstetricHistoryAction::Add, ctx)
                .expect("add");
        }
        editor
    }

    fn numbers(editor: &ObstetricHistoryEditor) -> Vec<u32> {
        editor.entries().iter().map(|e| e.pregnancy_number).collect()
    }

    #[test]
    fn add_edit_remove_keeps_numbering_dense() {
        let mut ctx = ctx();
        let editor = with_entries(&mut ctx, 3);
        assert_eq!(numbers(&editor), vec![1, 2, 3]);

        let last = editor.entries()[2].id.clone();
        let editor = editor
            .reduce(
                ObstetricHistoryAction::Edit(last.clone(), Edit::input("modeOfDelivery", "LSCS")),
                &mut ctx,
            )
            .expect("edit");
        let first = editor.entries()[0].id.clone();
        let editor = editor
            .reduce(ObstetricHistoryAction::Remove(first), &mut ctx)
            .expect("remove");

        assert_eq!(numbers(&editor), vec![1, 2]);
        assert_eq!(editor.entries()[1].id, last);
        assert_eq!(editor.entries()[1].mode_of_delivery, "LSCS");
    }

    #[test]
    fn list_changes_require_edit_mode() {
        let mut ctx = ctx();
        let editor = with_entries(&mut ctx, 1)
            .reduce(ObstetricHistoryAction::Save, &mut ctx)
            .expect("save");
        let id = editor.entries()[0].id.clone();

        for action in [
            ObstetricHistoryAction::Add,
            ObstetricHistoryAction::Remove(id),
        ] {
            let err = editor.reduce(action, &mut ctx).expect_err("not editing");
            assert!(matches!(err, CoreError::NotEditing("obstetric history")));
        }
        assert_eq!(editor.entries().len(), 1);
    }

    #[test]
    fn cancel_keeps_the_list_and_leaves_edit_mode() {
        let mut ctx = ctx();
        let editor = with_entries(&mut ctx, 2)
            .reduce(ObstetricHistoryAction::Save, &mut ctx)
            .expect("save")
            .reduce(ObstetricHistoryAction::BeginEdit, &mut ctx)
            .expect("begin")
            .reduce(ObstetricHistoryAction::Add, &mut ctx)
            .expect("add")
            .reduce(ObstetricHistoryAction::Cancel, &mut ctx)
            .expect("cancel");

        assert_eq!(numbers(&editor), vec![1, 2, 3]);
        assert!(!editor.view().editing);
        let err = editor
            .reduce(ObstetricHistoryAction::Cancel, &mut ctx)
            .expect_err("not editing");
        assert!(matches!(err, CoreError::NotEditing("obstetric history")));
    }

    #[test]
    fn unknown_entry_is_reported() {
        let mut ctx = ctx();
        let stranger = EntryId::parse("ob-42").expect("valid id");
        let err = with_entries(&mut ctx, 1)
            .reduce(ObstetricHistoryAction::Remove(stranger), &mut ctx)
            .expect_err("unknown id");
        assert!(matches!(err, CoreError::EntryNotFound { .. }));
    }
}
