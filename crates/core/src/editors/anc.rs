//! ANC case editor.
//!
//! Holds at most one case for the patient. Field and list edits are only
//! accepted while editing. Cancelling leaves edit mode and keeps the edits,
//! except that a case with no booking date is discarded.

use super::{apply, apply_to_entry, Edit};
use crate::component::{Component, Context};
use crate::derive::{gestational_age, GestationalAge};
use crate::fields::anc::AncField;
use crate::fields::entries::{FollowUpTestField, FollowUpVisitField, PastPregnancyField};
use crate::lists;
use crate::{CoreError, CoreResult};
use chrono::NaiveDate;
use obgyn_ids::{EntryId, IdPrefix};
use obgyn_records::{AncCase, FollowUpTest, FollowUpVisit};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Tabs of the case sheet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AncTab {
    #[default]
    Booking,
    FollowUp,
    Investigations,
    Delivery,
}

impl AncTab {
    pub const ALL: [AncTab; 4] = [
        AncTab::Booking,
        AncTab::FollowUp,
        AncTab::Investigations,
        AncTab::Delivery,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AncTab::Booking => "booking",
            AncTab::FollowUp => "followup",
            AncTab::Investigations => "investigations",
            AncTab::Delivery => "delivery",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AncTab::Booking => "Booking & History",
            AncTab::FollowUp => "Follow-up Visits",
            AncTab::Investigations => "Investigations",
            AncTab::Delivery => "Delivery & Postnatal",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

/// Collapsible sections of the booking tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AncSection {
    Obstetric,
    PastOb,
    Medical,
    Baseline,
    Usg,
    Vaccines,
    Booking,
}

impl AncSection {
    pub const ALL: [AncSection; 7] = [
        AncSection::Obstetric,
        AncSection::PastOb,
        AncSection::Medical,
        AncSection::Baseline,
        AncSection::Usg,
        AncSection::Vaccines,
        AncSection::Booking,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AncSection::Obstetric => "obstetric",
            AncSection::PastOb => "pastOb",
            AncSection::Medical => "medical",
            AncSection::Baseline => "baseline",
            AncSection::Usg => "usg",
            AncSection::Vaccines => "vaccines",
            AncSection::Booking => "booking",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AncSection::Obstetric => "Obstetric Status",
            AncSection::PastOb => "Past Obstetric History",
            AncSection::Medical => "Medical, Family & Personal History",
            AncSection::Baseline => "Baseline Investigations",
            AncSection::Usg => "USG Tracking",
            AncSection::Vaccines => "Vaccinations",
            AncSection::Booking => "Booking Visit",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AncAction {
    NewCase,
    BeginEdit,
    Save,
    Cancel,
    Edit(Edit<AncField>),
    ToggleSection(AncSection),
    SelectTab(AncTab),
    AddFollowUpVisit,
    EditFollowUpVisit(EntryId, Edit<FollowUpVisitField>),
    AddFollowUpTest,
    EditFollowUpTest(EntryId, Edit<FollowUpTestField>),
    AddPastPregnancy,
    EditPastPregnancy(EntryId, Edit<PastPregnancyField>),
    RemovePastPregnancy(EntryId),
}

/// ANC editor state.
#[derive(Clone, Debug)]
pub struct AncEditor {
    patient_name: String,
    patient_age: u32,
    today: NaiveDate,
    case: Option<AncCase>,
    editing: bool,
    tab: AncTab,
    collapsed: BTreeSet<AncSection>,
}

/// Render description of the ANC section.
#[derive(Clone, Debug, PartialEq)]
pub enum AncView {
    /// No case yet; offers to start one.
    Empty { patient_name: String },
    Case(Box<AncCaseView>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct AncCaseView {
    pub case: AncCase,
    pub editing: bool,
    pub tab: AncTab,
    /// Every booking-tab section with its expanded flag.
    pub sections: Vec<(AncSection, bool)>,
    pub edd: Option<NaiveDate>,
    pub gestational_age: Option<GestationalAge>,
}

impl AncEditor {
    pub fn new(patient_name: impl Into<String>, patient_age: u32, today: NaiveDate) -> Self {
        Self {
            patient_name: patient_name.into(),
            patient_age,
            today,
            case: None,
            editing: false,
            tab: AncTab::default(),
            collapsed: BTreeSet::new(),
        }
    }

    /// The same editor opened on `tab`.
    pub fn on_tab(mut self, tab: AncTab) -> Self {
        self.tab = tab;
        self
    }

    /// Update the patient details used for new cases.
    pub fn with_patient(&self, patient_name: impl Into<String>, patient_age: u32) -> Self {
        Self {
            patient_name: patient_name.into(),
            patient_age,
            ..self.clone()
        }
    }

    pub fn case(&self) -> Option<&AncCase> {
        self.case.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn tab(&self) -> AncTab {
        self.tab
    }

    pub fn is_expanded(&self, section: AncSection) -> bool {
        !self.collapsed.contains(&section)
    }

    /// Number of recorded follow-up visits, shown in the sidebar.
    pub fn follow_up_count(&self) -> usize {
        self.case
            .as_ref()
            .map_or(0, |case| case.follow_up_visits.len())
    }

    fn editable_case(&self) -> CoreResult<&AncCase> {
        let case = self.case.as_ref().ok_or(CoreError::NoActiveCase)?;
        if !self.editing {
            return Err(CoreError::NotEditing("ANC case"));
        }
        Ok(case)
    }

    fn with_case(&self, case: AncCase) -> Self {
        Self {
            case: Some(case),
            ..self.clone()
        }
    }
}

impl Component for AncEditor {
    type Action = AncAction;
    type View = AncView;

    fn reduce(&self, action: AncAction, ctx: &mut Context) -> CoreResult<Self> {
        let mut next = self.clone();
        next.today = ctx.today();

        match action {
            AncAction::NewCase => {
                if self.case.is_some() {
                    return Err(CoreError::CaseAlreadyOpen);
                }
                let id = ctx.next_id(IdPrefix::AncCase);
                info!(case = %id, "ANC case started");
                next.case = Some(AncCase::new(
                    id,
                    self.patient_name.clone(),
                    self.patient_age,
                    ctx.today(),
                ));
                next.editing = true;
            }
            AncAction::BeginEdit => {
                if self.case.is_none() {
                    return Err(CoreError::NoActiveCase);
                }
                next.editing = true;
            }
            AncAction::Save => {
                let case = self.editable_case()?;
                info!(case = %case.id, "ANC case saved");
                next.editing = false;
            }
            AncAction::Cancel => {
                let case = self.editable_case()?;
                if case.booking_visit.booking_date.is_none() {
                    info!(case = %case.id, "ANC case without booking date discarded");
                    next.case = None;
                }
                next.editing = false;
            }
            AncAction::Edit(edit) => {
                let case = apply(self.editable_case()?, edit)?;
                next = next.with_case(case);
            }
            AncAction::ToggleSection(section) => {
                if !next.collapsed.remove(&section) {
                    next.collapsed.insert(section);
                }
                debug!(section = section.as_str(), "ANC section toggled");
            }
            AncAction::SelectTab(tab) => next.tab = tab,
            AncAction::AddFollowUpVisit => {
                let mut case = self.editable_case()?.clone();
                let mut visit = FollowUpVisit::new(ctx.next_id(IdPrefix::FollowUpVisit), ctx.today());
                if let Some(age) = case
                    .obstetric_status
                    .lmp
                    .and_then(|lmp| gestational_age(lmp, ctx.today()))
                {
                    visit.weeks_by_lmp = age.weeks;
                }
                debug!(visit = %visit.id, "follow-up visit added");
                Arc::make_mut(&mut case.follow_up_visits).push(visit);
                next = next.with_case(case);
            }
            AncAction::EditFollowUpVisit(id, edit) => {
                let mut case = self.editable_case()?.clone();
                apply_to_entry(Arc::make_mut(&mut case.follow_up_visits), &id, edit)?;
                next = next.with_case(case);
            }
            AncAction::AddFollowUpTest => {
                let mut case = self.editable_case()?.clone();
                let test = FollowUpTest::new(ctx.next_id(IdPrefix::FollowUpTest), ctx.today());
                debug!(test = %test.id, "follow-up test added");
                Arc::make_mut(&mut case.follow_up_tests).push(test);
                next = next.with_case(case);
            }
            AncAction::EditFollowUpTest(id, edit) => {
                let mut case = self.editable_case()?.clone();
                apply_to_entry(Arc::make_mut(&mut case.follow_up_tests), &id, edit)?;
                next = next.with_case(case);
            }
            AncAction::AddPastPregnancy => {
                let mut case = self.editable_case()?.clone();
                let id = ctx.next_id(IdPrefix::PastPregnancy);
                lists::append_past_pregnancy(Arc::make_mut(&mut case.past_obstetric_history), id);
                next = next.with_case(case);
            }
            AncAction::EditPastPregnancy(id, edit) => {
                let mut case = self.editable_case()?.clone();
                apply_to_entry(Arc::make_mut(&mut case.past_obstetric_history), &id, edit)?;
                next = next.with_case(case);
            }
            AncAction::RemovePastPregnancy(id) => {
                let mut case = self.editable_case()?.clone();
                lists::remove_past_pregnancy(Arc::make_mut(&mut case.past_obstetric_history), &id)?;
                next = next.with_case(case);
            }
        }

        Ok(next)
    }

    fn view(&self) -> AncView {
        match &self.case {
            None => AncView::Empty {
                patient_name: self.patient_name.clone(),
            },
            Some(case) => {
                let lmp = case.obstetric_status.lmp;
                AncView::Case(Box::new(AncCaseView {
                    case: case.clone(),
                    editing: self.editing,
                    tab: self.tab,
                    sections: AncSection::ALL
                        .into_iter()
                        .map(|section| (section, self.is_expanded(section)))
                        .collect(),
                    edd: case.obstetric_status.edd,
                    gestational_age: lmp.and_then(|lmp| gestational_age(lmp, self.today)),
                }))
            }
        }
    }
}
