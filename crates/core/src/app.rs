//! Top-level screen state: the directory, or one open patient.

use crate::component::{Component, Context};
use crate::directory::{Directory, DirectoryAction, DirectoryView, Notice};
use crate::shell::{DetailShell, ShellAction, ShellView};
use crate::store::{Lookup, PatientStore};
use crate::{CoreError, CoreResult};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone, Debug, PartialEq)]
pub enum AppAction {
    Directory(DirectoryAction),
    /// Open the patient with this identifier.
    Select(String),
    Shell(ShellAction),
    BackToList,
}

#[derive(Clone, Debug)]
enum Screen {
    Directory,
    Patient(Box<DetailShell>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum AppView {
    Directory(DirectoryView),
    Patient(Box<ShellView>),
}

/// The application state over a patient store.
///
/// The directory is kept while a patient is open, so going back to the list
/// restores its query and facet.
pub struct App<S> {
    store: Arc<S>,
    directory: Directory,
    screen: Screen,
}

impl<S> Clone for App<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            directory: self.directory.clone(),
            screen: self.screen.clone(),
        }
    }
}

impl<S> fmt::Debug for App<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("directory", &self.directory)
            .field("screen", &self.screen)
            .finish_non_exhaustive()
    }
}

impl<S: PatientStore> App<S> {
    pub fn new(store: Arc<S>, ctx: &Context) -> Self {
        let directory = Directory::new(store.list_summaries(), ctx.today());
        Self {
            store,
            directory,
            screen: Screen::Directory,
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// The open patient, if any.
    pub fn shell(&self) -> Option<&DetailShell> {
        match &self.screen {
            Screen::Directory => None,
            Screen::Patient(shell) => Some(shell),
        }
    }

    fn open_shell(&self) -> CoreResult<&DetailShell> {
        self.shell().ok_or(CoreError::NoPatientOpen)
    }

    fn select(&self, identifier: &str, ctx: &mut Context) -> CoreResult<Self> {
        if let Some(shell) = self.shell() {
            return Err(CoreError::InvalidInput(format!(
                "patient {} is open; go back to the list first",
                shell.uhid()
            )));
        }

        let mut next = self.clone();
        match self.store.get_by_identifier(identifier) {
            Lookup::Found(record) => {
                info!(uhid = %record.profile.uhid, "patient opened");
                next.directory = self.directory.reduce(DirectoryAction::DismissNotice, ctx)?;
                next.screen = Screen::Patient(Box::new(DetailShell::open(record, ctx)));
            }
            Lookup::NotFound => {
                let identifier = identifier.trim().to_string();
                warn!(%identifier, "selected patient has no full record");
                next.directory = self
                    .directory
                    .with_notice(Notice::PatientUnavailable(identifier));
            }
        }
        Ok(next)
    }
}

impl<S: PatientStore> Component for App<S> {
    type Action = AppAction;
    type View = AppView;

    fn reduce(&self, action: AppAction, ctx: &mut Context) -> CoreResult<Self> {
        match action {
            AppAction::Directory(action) => Ok(Self {
                directory: self.directory.reduce(action, ctx)?,
                ..self.clone()
            }),
            AppAction::Select(identifier) => self.select(&identifier, ctx),
            AppAction::Shell(action) => {
                let shell = self.open_shell()?.reduce(action, ctx)?;
                Ok(Self {
                    screen: Screen::Patient(Box::new(shell)),
                    ..self.clone()
                })
            }
            AppAction::BackToList => {
                let shell = self.open_shell()?;
                info!(uhid = shell.uhid(), "patient closed");
                Ok(Self {
                    screen: Screen::Directory,
                    ..self.clone()
                })
            }
        }
    }

    fn view(&self) -> AppView {
        match &self.screen {
            Screen::Directory => AppView::Directory(self.directory.view()),
            Screen::Patient(shell) => AppView::Patient(Box::new(shell.view())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::StatusFilter;
    use crate::editors::anc::AncAction;
    use crate::editors::obstetric_history::ObstetricHistoryAction;
    use crate::editors::visit_log::VisitLogAction;
    use crate::editors::Edit;
    use crate::shell::Section;
    use crate::store::InMemoryStore;
    use chrono::NaiveDate;
    use obgyn_ids::SequentialIdGenerator;
    use obgyn_records::{PatientStatus, VisitTemplate};

    fn ctx() -> Context {
        let today = NaiveDate::from_ymd_opt(2025, 7, 15).expect("valid date");
        Context::new(Box::new(SequentialIdGenerator::new()), today)
    }

    fn app(ctx: &Context) -> App<InMemoryStore> {
        let store = InMemoryStore::bundled().expect("bundled store");
        App::new(Arc::new(store), ctx)
    }

    #[test]
    fn selecting_a_full_record_opens_the_shell() {
        let mut ctx = ctx();
        let app = app(&ctx)
            .reduce(AppAction::Select(" WMN-2025-001 ".into()), &mut ctx)
            .expect("select");

        let shell = app.shell().expect("patient open");
        assert_eq!(shell.uhid(), "WMN-2025-001");
        assert_eq!(shell.section(), Section::Details);
        assert!(matches!(app.view(), AppView::Patient(_)));
    }

    #[test]
    fn selecting_a_summary_only_patient_shows_a_notice() {
        let mut ctx = ctx();
        let app = app(&ctx)
            .reduce(AppAction::Select("WMN-2025-002".into()), &mut ctx)
            .expect("miss is not an error");

        assert!(app.shell().is_none());
        let notice = app.directory().notice().expect("notice shown");
        assert_eq!(
            notice.to_string(),
            "Patient WMN-2025-002 data not available. Only patients with a full record can be opened."
        );
        match app.view() {
            AppView::Directory(view) => assert!(view.notice.is_some()),
            other => panic!("expected directory, got {other:?}"),
        }

        let app = app
            .reduce(AppAction::Directory(DirectoryAction::DismissNotice), &mut ctx)
            .expect("dismiss");
        assert!(app.directory().notice().is_none());
    }

    #[test]
    fn back_to_list_keeps_query_and_facet() {
        let mut ctx = ctx();
        let app = [
            AppAction::Directory(DirectoryAction::Search("chaitra".into())),
            AppAction::Directory(DirectoryAction::SetStatus(StatusFilter::Only(
                PatientStatus::Active,
            ))),
            AppAction::Select("WMN-2025-001".into()),
            AppAction::Shell(ShellAction::ShowSection(Section::Anc)),
            AppAction::BackToList,
        ]
        .into_iter()
        .try_fold(app(&ctx), |state, action| state.reduce(action, &mut ctx))
        .expect("actions apply");

        assert!(app.shell().is_none());
        assert_eq!(app.directory().query(), "chaitra");
        assert_eq!(app.directory().status(), StatusFilter::Only(PatientStatus::Active));
    }

    #[test]
    fn shell_actions_need_an_open_patient() {
        let mut ctx = ctx();
        let app = app(&ctx);
        for action in [
            AppAction::Shell(ShellAction::ToggleMoreDetails),
            AppAction::BackToList,
        ] {
            let err = app.reduce(action, &mut ctx).expect_err("nothing open");
            assert!(matches!(err, CoreError::NoPatientOpen));
        }
    }

    #[test]
    fn select_while_open_is_rejected() {
        let mut ctx = ctx();
        let app = app(&ctx)
            .reduce(AppAction::Select("WMN-2025-001".into()), &mut ctx)
            .expect("select");
        let err = app
            .reduce(AppAction::Select("WMN-2025-001".into()), &mut ctx)
            .expect_err("already open");
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn debug_output_names_the_screen() {
        let mut ctx = ctx();
        let app = app(&ctx)
            .reduce(AppAction::Select("WMN-2025-001".into()), &mut ctx)
            .expect("select");
        let text = format!("{app:?}");
        assert!(text.starts_with("App {"));
        assert!(text.contains("Patient"));
    }

    #[test]
    fn sequential_ids_stay_unique_after_opening_a_record() {
        let mut ctx = ctx();
        let app = [
            AppAction::Select("WMN-2025-001".into()),
            AppAction::Shell(ShellAction::ObstetricHistory(ObstetricHistoryAction::BeginEdit)),
            AppAction::Shell(ShellAction::ObstetricHistory(ObstetricHistoryAction::Add)),
            AppAction::Shell(ShellAction::Visits(VisitLogAction::Add(VisitTemplate::Anc))),
        ]
        .into_iter()
        .try_fold(app(&ctx), |state, action| state.reduce(action, &mut ctx))
        .expect("actions apply");

        let record = app.shell().expect("patient open").record();
        let ob: Vec<String> = record
            .past_obstetric_history
            .iter()
            .map(|entry| entry.id.to_string())
            .collect();
        let visits: Vec<String> = record.visits.iter().map(|v| v.id.to_string()).collect();
        assert_eq!(ob, ["ob-1", "ob-2", "ob-3", "ob-4", "ob-5"]);
        assert_eq!(visits, ["v-1", "v-2", "v-3", "v-6"]);
    }

    #[test]
    fn reopening_starts_from_the_store_record() {
        let mut ctx = ctx();
        let app = [
            AppAction::Select("WMN-2025-001".into()),
            AppAction::Shell(ShellAction::Anc(AncAction::NewCase)),
            AppAction::Shell(ShellAction::Anc(AncAction::Edit(Edit::input(
                "bookingVisit.height",
                "160",
            )))),
        ]
        .into_iter()
        .try_fold(app(&ctx), |state, action| state.reduce(action, &mut ctx))
        .expect("actions apply");
        assert!(app.shell().and_then(|s| s.anc().case()).is_some());

        let app = app
            .reduce(AppAction::BackToList, &mut ctx)
            .expect("back")
            .reduce(AppAction::Select("WMN-2025-001".into()), &mut ctx)
            .expect("reopen");
        assert!(app.shell().and_then(|s| s.anc().case()).is_none());
    }
}
