//! The patient detail screen.
//!
//! The shell is opened on a deep copy of one patient record and hands each
//! section of it to the editor that owns it: the profile to the profile
//! editor, the past pregnancies to the obstetric-history editor and the visit
//! log to the visit log. [`DetailShell::record`] puts the pieces back together.

use crate::component::{Component, Context};
use crate::editors::anc::{AncAction, AncEditor, AncView};
use crate::editors::gyne::{GyneAction, GyneEditor, GyneView};
use crate::editors::medical_history::{
    MedicalHistoryAction, MedicalHistoryEditor, MedicalHistoryView,
};
use crate::editors::obstetric_history::{
    ObstetricHistoryAction, ObstetricHistoryEditor, ObstetricHistoryView,
};
use crate::editors::profile::{ProfileAction, ProfileEditor, ProfileView};
use crate::editors::visit_log::{VisitLog, VisitLogAction, VisitLogView};
use crate::{CoreError, CoreResult};
use chrono::NaiveDate;
use obgyn_records::{
    MenstrualCycle, ObstetricHistory, ObstetricHistoryData, PatientRecord, VisitTemplate,
};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Sections reachable from the sidebar menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Section {
    #[default]
    Details,
    Anc,
    MedicalHistory,
    ObstetricHistory,
    Gynecology,
    General,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Details,
        Section::Anc,
        Section::MedicalHistory,
        Section::ObstetricHistory,
        Section::Gynecology,
        Section::General,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Details => "details",
            Section::Anc => "anc",
            Section::MedicalHistory => "medical-history",
            Section::ObstetricHistory => "ob-history",
            Section::Gynecology => "gynecology",
            Section::General => "general",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Details => "Patient Details",
            Section::Anc => "ANC Visits",
            Section::MedicalHistory => "Medical History",
            Section::ObstetricHistory => "Obstetric History",
            Section::Gynecology => "Gynecology",
            Section::General => "General Visits",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::InvalidInput(format!("unknown section '{s}'")))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ShellAction {
    ShowSection(Section),
    ToggleMoreDetails,
    Profile(ProfileAction),
    Anc(AncAction),
    Gyne(GyneAction),
    MedicalHistory(MedicalHistoryAction),
    ObstetricHistory(ObstetricHistoryAction),
    Visits(VisitLogAction),
}

/// Detail screen state.
#[derive(Clone, Debug)]
pub struct DetailShell {
    record: PatientRecord,
    section: Section,
    show_more_details: bool,
    profile: ProfileEditor,
    anc: AncEditor,
    gyne: GyneEditor,
    medical_history: MedicalHistoryEditor,
    obstetric_history: ObstetricHistoryEditor,
    visits: VisitLog,
}

// ============================================================================
// View
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct ShellView {
    pub sidebar: SidebarView,
    pub section: Section,
    pub body: SectionView,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SidebarView {
    pub uhid: String,
    pub name: String,
    pub initials: String,
    pub age: u32,
    pub blood_group: String,
    pub gpla: String,
    pub edd: Option<NaiveDate>,
    pub high_risk: bool,
    /// Present while the "more details" panel is open.
    pub more_details: Option<MoreDetails>,
    pub menu: Vec<MenuItem>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MoreDetails {
    pub spouse_name: String,
    pub lmp: Option<NaiveDate>,
    pub menstrual_cycle: MenstrualCycle,
    pub allergies: Vec<String>,
    pub present_medication: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuItem {
    pub section: Section,
    pub label: &'static str,
    pub count: Option<usize>,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SectionView {
    Details(Box<DetailsView>),
    Anc(AncView),
    MedicalHistory(MedicalHistoryView),
    ObstetricHistory(ObstetricHistoryView),
    Gynecology(GyneView),
    General(VisitLogView),
}

/// The read-only summary of the record plus the profile form.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailsView {
    pub profile: ProfileView,
    pub obstetric_history: ObstetricHistory,
    pub medical_conditions: Vec<&'static str>,
    pub family_conditions: Vec<&'static str>,
    pub personal_conditions: Vec<&'static str>,
    pub lab_values: Vec<(&'static str, f64)>,
    pub present_medication: String,
    pub comments: String,
}

fn positives<const N: usize>(conditions: [(&'static str, bool); N]) -> Vec<&'static str> {
    conditions
        .into_iter()
        .filter_map(|(name, yes)| yes.then_some(name))
        .collect()
}

// ============================================================================
// Component
// ============================================================================

impl DetailShell {
    /// Open the shell on a copy of `record`.
    ///
    /// Ids already used by the record's lists are reserved in `ctx`, so
    /// entries added while the shell is open never collide with them.
    pub fn open(record: &PatientRecord, ctx: &mut Context) -> Self {
        for id in record.entry_ids() {
            ctx.reserve_id(id);
        }
        let today = ctx.today();
        let profile = &record.profile;
        let name = profile.name.as_str();
        let anc = AncEditor::new(name, profile.age, today);
        let gyne = GyneEditor::new(name, profile.age);

        Self {
            record: record.clone(),
            section: Section::default(),
            show_more_details: false,
            profile: ProfileEditor::new(profile.clone()),
            anc,
            gyne,
            medical_history: MedicalHistoryEditor::default(),
            obstetric_history: ObstetricHistoryEditor::new(ObstetricHistoryData {
                entries: Arc::new(record.past_obstetric_history.clone()),
            }),
            visits: VisitLog::new(record.visits.clone()),
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn uhid(&self) -> &str {
        self.profile.profile().uhid.as_str()
    }

    pub fn anc(&self) -> &AncEditor {
        &self.anc
    }

    pub fn gyne(&self) -> &GyneEditor {
        &self.gyne
    }

    pub fn profile(&self) -> &ProfileEditor {
        &self.profile
    }

    pub fn medical_history(&self) -> &MedicalHistoryEditor {
        &self.medical_history
    }

    pub fn obstetric_history(&self) -> &ObstetricHistoryEditor {
        &self.obstetric_history
    }

    pub fn visits(&self) -> &VisitLog {
        &self.visits
    }

    /// The record as currently held by the shell and its editors.
    pub fn record(&self) -> PatientRecord {
        PatientRecord {
            profile: self.profile.profile().clone(),
            past_obstetric_history: self.obstetric_history.entries().to_vec(),
            visits: self.visits.visits().to_vec(),
            ..self.record.clone()
        }
    }

    fn sidebar(&self) -> SidebarView {
        let profile = self.profile.profile();
        let history = &self.record.obstetric_history;

        let menu = Section::ALL
            .into_iter()
            .map(|section| MenuItem {
                section,
                label: section.label(),
                count: match section {
                    Section::Anc => Some(self.visits.count(VisitTemplate::Anc)),
                    Section::ObstetricHistory => Some(self.obstetric_history.entries().len()),
                    Section::Gynecology => Some(self.gyne.visits().len()),
                    Section::General => Some(self.visits.visits().len()),
                    Section::Details | Section::MedicalHistory => None,
                },
                active: section == self.section,
            })
            .collect();

        SidebarView {
            uhid: profile.uhid.to_string(),
            name: profile.name.to_string(),
            initials: profile.name.initials(),
            age: profile.age,
            blood_group: profile.blood_group_badge(),
            gpla: history.gpla_badge(),
            edd: history.edd,
            high_risk: history.has_risk_factors(),
            more_details: self.show_more_details.then(|| MoreDetails {
                spouse_name: profile.spouse_name.clone(),
                lmp: history.lmp,
                menstrual_cycle: history.menstrual_cycle,
                allergies: profile.allergies.clone(),
                present_medication: self.record.present_medication.clone(),
            }),
            menu,
        }
    }

    fn details(&self) -> DetailsView {
        DetailsView {
            profile: self.profile.view(),
            obstetric_history: self.record.obstetric_history.clone(),
            medical_conditions: positives(self.record.medical_history.conditions()),
            family_conditions: positives(self.record.family_history.conditions()),
            personal_conditions: positives(self.record.personal_history.conditions()),
            lab_values: self.record.lab_results.recorded_values(),
            present_medication: self.record.present_medication.clone(),
            comments: self.record.comments.clone(),
        }
    }
}

impl Component for DetailShell {
    type Action = ShellAction;
    type View = ShellView;

    fn reduce(&self, action: ShellAction, ctx: &mut Context) -> CoreResult<Self> {
        let mut next = self.clone();
        match action {
            ShellAction::ShowSection(section) => {
                debug!(uhid = self.uhid(), %section, "section shown");
                next.section = section;
            }
            ShellAction::ToggleMoreDetails => next.show_more_details = !self.show_more_details,
            ShellAction::Profile(action) => {
                next.profile = self.profile.reduce(action, ctx)?;
                let profile = next.profile.profile();
                next.anc = self.anc.with_patient(profile.name.as_str(), profile.age);
                next.gyne = self.gyne.with_patient(profile.name.as_str(), profile.age);
            }
            ShellAction::Anc(action) => next.anc = self.anc.reduce(action, ctx)?,
            ShellAction::Gyne(action) => next.gyne = self.gyne.reduce(action, ctx)?,
            ShellAction::MedicalHistory(action) => {
                next.medical_history = self.medical_history.reduce(action, ctx)?
            }
            ShellAction::ObstetricHistory(action) => {
                next.obstetric_history = self.obstetric_history.reduce(action, ctx)?
            }
            ShellAction::Visits(action) => next.visits = self.visits.reduce(action, ctx)?,
        }
        Ok(next)
    }

    fn view(&self) -> ShellView {
        let body = match self.section {
            Section::Details => SectionView::Details(Box::new(self.details())),
            Section::Anc => SectionView::Anc(self.anc.view()),
            Section::MedicalHistory => SectionView::MedicalHistory(self.medical_history.view()),
            Section::ObstetricHistory => {
                SectionView::ObstetricHistory(self.obstetric_history.view())
            }
            Section::Gynecology => SectionView::Gynecology(self.gyne.view()),
            Section::General => SectionView::General(self.visits.view()),
        };
        ShellView {
            sidebar: self.sidebar(),
            section: self.section,
            body,
        }
    }
}
