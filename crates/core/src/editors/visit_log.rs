//! The patient's visit log, shown in the "General" section.

use super::{apply_to_entry, Edit};
use crate::component::{Component, Context};
use crate::fields::entries::VisitRecordField;
use crate::CoreResult;
use obgyn_ids::{EntryId, IdPrefix};
use obgyn_records::{VisitRecord, VisitTemplate};
use tracing::info;

#[derive(Clone, Debug, PartialEq)]
pub enum VisitLogAction {
    /// Record a new visit dated today.
    Add(VisitTemplate),
    Edit(EntryId, Edit<VisitRecordField>),
}

#[derive(Clone, Debug, Default)]
pub struct VisitLog {
    visits: Vec<VisitRecord>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VisitLogView {
    pub visits: Vec<VisitRecord>,
    /// Visit count per template, in template order.
    pub counts: Vec<(VisitTemplate, usize)>,
}

impl VisitLog {
    pub fn new(visits: Vec<VisitRecord>) -> Self {
        Self { visits }
    }

    pub fn visits(&self) -> &[VisitRecord] {
        &self.visits
    }

    pub fn count(&self, template: VisitTemplate) -> usize {
        self.visits
            .iter()
            .filter(|visit| visit.template == template)
            .count()
    }
}

impl Component for VisitLog {
    type Action = VisitLogAction;
    type View = VisitLogView;

    fn reduce(&self, action: VisitLogAction, ctx: &mut Context) -> CoreResult<Self> {
        let mut next = self.clone();
        match action {
            VisitLogAction::Add(template) => {
                let visit = VisitRecord::new(ctx.next_id(IdPrefix::Visit), ctx.today(), template);
                info!(visit = %visit.id, template = template.as_str(), "visit recorded");
                next.visits.push(visit);
            }
            VisitLogAction::Edit(id, edit) => apply_to_entry(&mut next.visits, &id, edit)?,
        }
        Ok(next)
    }

    fn view(&self) -> VisitLogView {
        VisitLogView {
            visits: self.visits.clone(),
            counts: VisitTemplate::ALL
                .into_iter()
                .map(|template| (template, self.count(template)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldValue;
    use crate::CoreError;
    use chrono::NaiveDate;
    use obgyn_ids::SequentialIdGenerator;

    fn ctx() -> Context {
        let today = NaiveDate::from_ymd_opt(2025, 7, 15).expect("valid date");
        Context::new(Box::new(SequentialIdGenerator::new()), today)
    }

    #[test]
    fn add_records_a_visit_for_today() {
        let mut ctx = ctx();
        let log = VisitLog::default()
            .reduce(VisitLogAction::Add(VisitTemplate::Anc), &mut ctx)
            .expect("add")
            .reduce(VisitLogAction::Add(VisitTemplate::General), &mut ctx)
            .expect("add");

        assert_eq!(log.visits().len(), 2);
        assert_eq!(log.visits()[0].date, ctx.today());
        assert_eq!(log.visits()[1].template, VisitTemplate::General);
        assert_eq!(
            log.view().counts,
            vec![
                (VisitTemplate::Anc, 1),
                (VisitTemplate::Gyne, 0),
                (VisitTemplate::General, 1)
            ]
        );
    }

    #[test]
    fn optional_measurements_treat_zero_as_unrecorded() {
        let mut ctx = ctx();
        let log = VisitLog::default()
            .reduce(VisitLogAction::Add(VisitTemplate::Anc), &mut ctx)
            .expect("add");
        let id = log.visits()[0].id.clone();

        let log = log
            .reduce(VisitLogAction::Edit(id.clone(), Edit::input("weight", "61.5")), &mut ctx)
            .expect("weight");
        assert_eq!(log.visits()[0].weight, Some(61.5));

        let log = log
            .reduce(VisitLogAction::Edit(id, Edit::input("weight", "0")), &mut ctx)
            .expect("clear weight");
        assert_eq!(log.visits()[0].weight, None);
    }

    #[test]
    fn visit_date_cannot_be_cleared() {
        let mut ctx = ctx();
        let log = VisitLog::default()
            .reduce(VisitLogAction::Add(VisitTemplate::Gyne), &mut ctx)
            .expect("add");
        let id = log.visits()[0].id.clone();

        let err = log
            .reduce(
                VisitLogAction::Edit(id, Edit::Set(VisitRecordField::Date, FieldValue::Date(None))),
                &mut ctx,
            )
            .expect_err("date is required");
        assert!(matches!(err, CoreError::InvalidInput(_)));
        assert_eq!(log.visits()[0].date, ctx.today());
    }

    #[test]
    fn editing_unknown_visit_is_reported() {
        let mut ctx = ctx();
        let stranger = EntryId::parse("v-9").expect("valid id");
        let err = VisitLog::default()
            .reduce(VisitLogAction::Edit(stranger, Edit::input("remarks", "x")), &mut ctx)
            .expect_err("unknown visit");
        assert!(matches!(err, CoreError::EntryNotFound { list: "visit", .. }));
    }
}
