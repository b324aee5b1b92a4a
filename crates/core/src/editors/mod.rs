//! Editors for the sections of the patient detail screen.
//!
//! Each editor is a [`Component`](crate::component::Component) owning its
//! record exclusively. Field edits arrive as an [`Edit`], either already typed
//! or as raw form input that still needs a path lookup and coercion.

pub mod anc;
pub mod gyne;
pub mod medical_history;
pub mod obstetric_history;
pub mod profile;
pub mod visit_log;

use crate::field::{update, update_input, Editable, FieldValue};
use crate::lists::{self, Entry};
use crate::CoreResult;
use obgyn_ids::EntryId;
use tracing::warn;

/// One field edit.
#[derive(Clone, Debug, PartialEq)]
pub enum Edit<F> {
    /// A typed value for a known field.
    Set(F, FieldValue),
    /// Raw form input for a dotted path.
    Input { path: String, raw: String },
}

impl<F> Edit<F> {
    pub fn input(path: impl Into<String>, raw: impl Into<String>) -> Self {
        Edit::Input {
            path: path.into(),
            raw: raw.into(),
        }
    }
}

/// Apply an edit to a record, returning the new record.
pub(crate) fn apply<R: Editable>(record: &R, edit: Edit<R::Field>) -> CoreResult<R> {
    let result = match edit {
        Edit::Set(field, value) => update(record, field, value),
        Edit::Input { path, raw } => update_input(record, &path, &raw),
    };
    result.inspect_err(|err| warn!(error = %err, "edit rejected"))
}

/// Apply an edit to the entry with `id`.
pub(crate) fn apply_to_entry<T: Entry + Editable>(
    list: &mut Vec<T>,
    id: &EntryId,
    edit: Edit<T::Field>,
) -> CoreResult<()> {
    let result = match edit {
        Edit::Set(field, value) => lists::update_entry(list, id, field, value),
        Edit::Input { path, raw } => lists::update_entry_input(list, id, &path, &raw),
    };
    result.inspect_err(|err| warn!(list = T::LIST, %id, error = %err, "entry edit rejected"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;
    use obgyn_records::PastPregnancy;
    use std::sync::Arc;

    fn entry(id: &str, number: u32) -> PastPregnancy {
        PastPregnancy::new(EntryId::parse(id).expect("valid id"), number)
    }

    #[test]
    fn entry_edit_writes_through_a_shared_list() {
        let shared = Arc::new(vec![entry("ob-1", 1), entry("ob-2", 2)]);
        let mut list = Arc::clone(&shared);
        let id = EntryId::parse("ob-2").expect("valid id");

        apply_to_entry(Arc::make_mut(&mut list), &id, Edit::input("remarks", "APC Neg"))
            .expect("edit");

        assert_eq!(list[1].remarks, "APC Neg");
        assert!(shared[1].remarks.is_empty());
    }

    #[test]
    fn entry_edit_for_unknown_id_changes_nothing() {
        let mut list = Arc::new(vec![entry("ob-1", 1)]);
        let before = list.as_ref().clone();
        let stranger = EntryId::parse("ob-9").expect("valid id");

        let err = apply_to_entry(Arc::make_mut(&mut list), &stranger, Edit::input("remarks", "x"))
            .expect_err("unknown id");
        assert!(matches!(err, CoreError::EntryNotFound { .. }));
        assert_eq!(*list, before);
    }
}
