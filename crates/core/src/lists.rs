//! Lifecycle of the ordered child lists embedded in records.
//!
//! All lists keep insertion order. Past-pregnancy lists additionally carry a
//! 1-based `pregnancy_number` that always equals the entry's position: it is
//! assigned on append and reassigned after a removal.
//!
//! Operations that address an entry by id fail with
//! [`CoreError::EntryNotFound`] and leave the list untouched when the id is
//! not present.

use crate::field::{update, update_input, Editable, FieldValue};
use crate::{CoreError, CoreResult};
use obgyn_ids::EntryId;
use obgyn_records::PastPregnancy;
use tracing::debug;

/// An element of an id-addressed list.
pub trait Entry {
    /// Human-readable list name used in errors and logs.
    const LIST: &'static str;

    fn entry_id(&self) -> &EntryId;
}

/// Position of the entry with `id`.
///
/// # Errors
///
/// Returns [`CoreError::EntryNotFound`] if no entry has that id.
pub fn position<T: Entry>(list: &[T], id: &EntryId) -> CoreResult<usize> {
    list.iter()
        .position(|entry| entry.entry_id() == id)
        .ok_or_else(|| CoreError::EntryNotFound {
            list: T::LIST,
            id: id.to_string(),
        })
}

/// Replace one leaf of the entry with `id`.
///
/// Other entries and the order of the list are untouched.
///
/// # Errors
///
/// Returns [`CoreError::EntryNotFound`] for an unknown id, otherwise the
/// errors of [`update`]. Nothing is applied on error.
pub fn update_entry<T: Entry + Editable>(
    list: &mut [T],
    id: &EntryId,
    field: T::Field,
    value: FieldValue,
) -> CoreResult<()> {
    let index = position(list, id)?;
    list[index] = update(&list[index], field, value)?;
    debug!(list = T::LIST, %id, %field, "entry updated");
    Ok(())
}

/// Like [`update_entry`], but resolves a path and coerces raw input.
///
/// # Errors
///
/// Returns [`CoreError::EntryNotFound`] for an unknown id, otherwise the
/// errors of [`update_input`].
pub fn update_entry_input<T: Entry + Editable>(
    list: &mut [T],
    id: &EntryId,
    path: &str,
    raw: &str,
) -> CoreResult<()> {
    let index = position(list, id)?;
    list[index] = update_input(&list[index], path, raw)?;
    debug!(list = T::LIST, %id, path, "entry updated from input");
    Ok(())
}

/// Remove the entry with `id`, keeping the order of the rest.
///
/// # Errors
///
/// Returns [`CoreError::EntryNotFound`] if no entry has that id.
pub fn remove_entry<T: Entry>(list: &mut Vec<T>, id: &EntryId) -> CoreResult<T> {
    let index = position(list, id)?;
    let removed = list.remove(index);
    debug!(list = T::LIST, %id, remaining = list.len(), "entry removed");
    Ok(removed)
}

/// Replace the entry with the same id, or append it if there is none.
///
/// Returns `true` if an existing entry was replaced.
pub fn upsert<T: Entry>(list: &mut Vec<T>, entry: T) -> bool {
    match position(list, entry.entry_id()) {
        Ok(index) => {
            list[index] = entry;
            true
        }
        Err(_) => {
            list.push(entry);
            false
        }
    }
}

/// Append a blank past pregnancy numbered after the existing entries.
pub fn append_past_pregnancy(list: &mut Vec<PastPregnancy>, id: EntryId) -> &PastPregnancy {
    let number = next_pregnancy_number(list);
    debug!(%id, number, "past pregnancy appended");
    list.push(PastPregnancy::new(id, number));
    &list[list.len() - 1]
}

/// Remove a past pregnancy and renumber the remaining entries 1..N.
///
/// # Errors
///
/// Returns [`CoreError::EntryNotFound`] if no entry has that id.
pub fn remove_past_pregnancy(
    list: &mut Vec<PastPregnancy>,
    id: &EntryId,
) -> CoreResult<PastPregnancy> {
    let removed = remove_entry(list, id)?;
    renumber(list);
    Ok(removed)
}

/// Reassign pregnancy numbers from position, in the current order.
pub fn renumber(list: &mut [PastPregnancy]) {
    for (number, entry) in (1u32..).zip(list.iter_mut()) {
        entry.pregnancy_number = number;
    }
}

fn next_pregnancy_number(list: &[PastPregnancy]) -> u32 {
    u32::try_from(list.len()).map_or(u32::MAX, |len| len.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::entries::PastPregnancyField;
    use obgyn_ids::{IdGenerator, IdPrefix, SequentialIdGenerator};
    use proptest::prelude::*;

    fn numbered(count: usize) -> (Vec<PastPregnancy>, Vec<EntryId>) {
        let mut ids = SequentialIdGenerator::new();
        let mut list = Vec::new();
        let mut issued = Vec::new();
        for _ in 0..count {
            let id = ids.next_id(IdPrefix::PastPregnancy);
            issued.push(id.clone());
            append_past_pregnancy(&mut list, id);
        }
        (list, issued)
    }

    fn numbers(list: &[PastPregnancy]) -> Vec<u32> {
        list.iter().map(|entry| entry.pregnancy_number).collect()
    }

    #[test]
    fn append_numbers_by_position() {
        let (list, _) = numbered(3);
        assert_eq!(numbers(&list), vec![1, 2, 3]);
    }

    #[test]
    fn removing_middle_entry_renumbers_in_order() {
        let (mut list, ids) = numbered(3);
        let removed = remove_past_pregnancy(&mut list, &ids[1]).expect("remove #2");

        assert_eq!(removed.pregnancy_number, 2);
        assert_eq!(numbers(&list), vec![1, 2]);
        assert_eq!(list[0].id, ids[0]);
        assert_eq!(list[1].id, ids[2]);
    }

    #[test]
    fn unknown_id_changes_nothing() {
        let (mut list, _) = numbered(2);
        let before = list.clone();
        let stranger = EntryId::parse("ob-999").expect("valid id");

        let err = remove_past_pregnancy(&mut list, &stranger).expect_err("unknown id");
        assert!(matches!(err, CoreError::EntryNotFound { list: "past pregnancy", .. }));

        let err = update_entry(
            &mut list,
            &stranger,
            PastPregnancyField::Year,
            FieldValue::Text("2020".into()),
        )
        .expect_err("unknown id");
        assert!(matches!(err, CoreError::EntryNotFound { .. }));
        assert_eq!(list, before);
    }

    #[test]
    fn update_touches_only_the_addressed_entry() {
        let (mut list, ids) = numbered(3);
        let before = list.clone();
        update_entry(
            &mut list,
            &ids[1],
            PastPregnancyField::ModeOfDelivery,
            FieldValue::Text("LSCS".into()),
        )
        .expect("update");

        assert_eq!(list[1].mode_of_delivery, "LSCS");
        assert_eq!(list[0], before[0]);
        assert_eq!(list[2], before[2]);
    }

    #[test]
    fn kind_mismatch_on_entry_update_applies_nothing() {
        let (mut list, ids) = numbered(1);
        let before = list.clone();
        let err = update_entry(&mut list, &ids[0], PastPregnancyField::Year, FieldValue::Count(2020))
            .expect_err("year is text");
        assert!(matches!(err, CoreError::FieldKindMismatch { .. }));
        assert_eq!(list, before);
    }

    #[test]
    fn upsert_replaces_or_appends() {
        let (mut list, ids) = numbered(2);
        let mut changed = list[0].clone();
        changed.remarks = "Preterm".into();

        assert!(upsert(&mut list, changed));
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].remarks, "Preterm");

        let fresh = PastPregnancy::new(EntryId::parse("ob-77").expect("valid id"), 3);
        assert!(!upsert(&mut list, fresh));
        assert_eq!(list.len(), 3);
        assert_eq!(list[1].id, ids[1]);
    }

    proptest! {
        #[test]
        fn removal_keeps_relative_order_and_dense_numbers(len in 1usize..12, pick in 0usize..12) {
            let (mut list, ids) = numbered(len);
            let target = pick % len;
            remove_past_pregnancy(&mut list, &ids[target]).expect("present");

            let expected_ids: Vec<&EntryId> =
                ids.iter().enumerate().filter(|(i, _)| *i != target).map(|(_, id)| id).collect();
            let actual_ids: Vec<&EntryId> = list.iter().map(|entry| &entry.id).collect();
            prop_assert_eq!(actual_ids, expected_ids);

            let expected_numbers: Vec<u32> = (1..=list.len() as u32).collect();
            prop_assert_eq!(numbers(&list), expected_numbers);
        }
    }
}
