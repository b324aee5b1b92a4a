//! Gynecology visit editor.
//!
//! Saved visits form a list. A visit is edited as a draft: either a new visit
//! started from the patient's details or a copy of a saved one. Saving puts the
//! draft back in the list under its id; cancelling drops it.

use super::{apply, Edit};
use crate::component::{Component, Context};
use crate::fields::gyne::GyneField;
use crate::lists::{self, position};
use crate::{CoreError, CoreResult};
use chrono::NaiveDate;
use obgyn_ids::{EntryId, IdPrefix};
use obgyn_records::GyneVisit;
use tracing::info;

#[derive(Clone, Debug, PartialEq)]
pub enum GyneAction {
    NewVisit,
    Open(EntryId),
    Edit(Edit<GyneField>),
    Save,
    Cancel,
}

#[derive(Clone, Debug, Default)]
pub struct GyneEditor {
    patient_name: String,
    patient_age: u32,
    visits: Vec<GyneVisit>,
    draft: Option<GyneVisit>,
}

/// One row of the saved-visit list.
#[derive(Clone, Debug, PartialEq)]
pub struct GyneVisitRow {
    pub id: EntryId,
    pub date: NaiveDate,
    pub presenting_complaints: String,
    pub impression: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GyneView {
    pub visits: Vec<GyneVisitRow>,
    pub draft: Option<GyneVisit>,
}

impl GyneEditor {
    pub fn new(patient_name: impl Into<String>, patient_age: u32) -> Self {
        Self {
            patient_name: patient_name.into(),
            patient_age,
            ..Self::default()
        }
    }

    /// Update the patient details used for new visits.
    pub fn with_patient(&self, patient_name: impl Into<String>, patient_age: u32) -> Self {
        Self {
            patient_name: patient_name.into(),
            patient_age,
            ..self.clone()
        }
    }

    pub fn visits(&self) -> &[GyneVisit] {
        &self.visits
    }

    pub fn draft(&self) -> Option<&GyneVisit> {
        self.draft.as_ref()
    }

    fn current(&self) -> CoreResult<&GyneVisit> {
        self.draft.as_ref().ok_or(CoreError::NoCurrentVisit)
    }
}

impl Component for GyneEditor {
    type Action = GyneAction;
    type View = GyneView;

    fn reduce(&self, action: GyneAction, ctx: &mut Context) -> CoreResult<Self> {
        let mut next = self.clone();
        match action {
            GyneAction::NewVisit => {
                let id = ctx.next_id(IdPrefix::GyneVisit);
                info!(visit = %id, "gynecology visit started");
                next.draft = Some(GyneVisit::new(
                    id,
                    ctx.today(),
                    self.patient_name.clone(),
                    self.patient_age,
                ));
            }
            GyneAction::Open(id) => {
                let index = position(&self.visits, &id)?;
                next.draft = Some(self.visits[index].clone());
            }
            GyneAction::Edit(edit) => {
                next.draft = Some(apply(self.current()?, edit)?);
            }
            GyneAction::Save => {
                let draft = self.current()?.clone();
                let id = draft.id.clone();
                let replaced = lists::upsert(&mut next.visits, draft);
                info!(visit = %id, replaced, "gynecology visit saved");
                next.draft = None;
            }
            GyneAction::Cancel => {
                self.current()?;
                next.draft = None;
            }
        }
        Ok(next)
    }

    fn view(&self) -> GyneView {
        GyneView {
            visits: self
                .visits
                .iter()
                .map(|visit| GyneVisitRow {
                    id: visit.id.clone(),
                    date: visit.date,
                    presenting_complaints: visit.presenting_complaints.clone(),
                    impression: visit.impression.clone(),
                })
                .collect(),
            draft: self.draft.clone(),
        }
    }
}
