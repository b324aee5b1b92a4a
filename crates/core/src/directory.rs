//! Patient directory: search, status facet and the not-found notice.

use crate::component::{Component, Context};
use crate::derive::gestational_age;
use crate::{CoreError, CoreResult};
use chrono::NaiveDate;
use obgyn_records::{PatientStatus, PatientSummary, RiskLevel};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Status facet of the directory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// No filtering on status.
    #[default]
    All,
    Only(PatientStatus),
}

impl StatusFilter {
    /// Facets in display order: `All` first, then every status.
    pub fn options() -> Vec<StatusFilter> {
        std::iter::once(StatusFilter::All)
            .chain(PatientStatus::ALL.into_iter().map(StatusFilter::Only))
            .collect()
    }

    pub fn admits(self, status: PatientStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("All"),
            StatusFilter::Only(status) => f.write_str(status.as_str()),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        PatientStatus::from_name(s)
            .map(StatusFilter::Only)
            .ok_or_else(|| CoreError::InvalidInput(format!("unknown status filter '{s}'")))
    }
}

/// Whether a summary matches a free-text query.
///
/// The query is matched case-insensitively as a substring of the name, the
/// UHID or the mobile number. An empty query matches everything.
pub fn matches_query(summary: &PatientSummary, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    [
        summary.name.as_str(),
        summary.uhid.as_str(),
        summary.mobile.as_str(),
    ]
    .into_iter()
    .any(|haystack| haystack.to_lowercase().contains(&needle))
}

/// The summaries matching both the query and the status facet, in their
/// original order.
pub fn filter_summaries<'a>(
    summaries: &'a [PatientSummary],
    query: &str,
    status: StatusFilter,
) -> Vec<&'a PatientSummary> {
    summaries
        .iter()
        .filter(|summary| matches_query(summary, query) && status.admits(summary.status))
        .collect()
}

/// A transient, non-blocking message shown above the directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// The selected patient has no full record in the store.
    PatientUnavailable(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::PatientUnavailable(id) => write!(
                f,
                "Patient {id} data not available. Only patients with a full record can be opened."
            ),
        }
    }
}

/// Directory state.
#[derive(Clone, Debug)]
pub struct Directory {
    summaries: Arc<[PatientSummary]>,
    today: NaiveDate,
    query: String,
    status: StatusFilter,
    notice: Option<Notice>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectoryAction {
    Search(String),
    SetStatus(StatusFilter),
    DismissNotice,
}

/// One rendered directory card.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectoryRow {
    pub uhid: String,
    pub name: String,
    pub initial: char,
    pub age: u32,
    pub mobile: String,
    pub blood_group: String,
    pub weeks_pregnant: Option<u32>,
    pub edd: Option<NaiveDate>,
    pub risk_level: RiskLevel,
    pub high_risk: bool,
    pub next_visit: Option<NaiveDate>,
    pub status: PatientStatus,
}

impl DirectoryRow {
    fn from_summary(summary: &PatientSummary, today: NaiveDate) -> Self {
        let weeks_pregnant = summary.weeks_pregnant.or_else(|| {
            summary
                .lmp
                .and_then(|lmp| gestational_age(lmp, today))
                .map(|age| age.weeks)
        });
        Self {
            uhid: summary.uhid.to_string(),
            name: summary.name.to_string(),
            initial: summary.name.as_str().chars().next().unwrap_or('?'),
            age: summary.age,
            mobile: summary.mobile.clone(),
            blood_group: format!("{}{}", summary.blood_group, summary.rh_status.sign()),
            weeks_pregnant,
            edd: summary.edd,
            risk_level: summary.risk_level,
            high_risk: summary.risk_level == RiskLevel::High,
            next_visit: summary.next_visit,
            status: summary.status,
        }
    }
}

/// What the directory renders.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectoryView {
    pub query: String,
    pub status: StatusFilter,
    /// Every facet with the number of patients it admits (ignoring the query).
    pub facets: Vec<(StatusFilter, usize)>,
    pub total: usize,
    pub rows: Vec<DirectoryRow>,
    pub notice: Option<Notice>,
}

impl DirectoryView {
    /// An empty result is a normal state with its own message.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Directory {
    pub fn new(summaries: impl Into<Arc<[PatientSummary]>>, today: NaiveDate) -> Self {
        Self {
            summaries: summaries.into(),
            today,
            query: String::new(),
            status: StatusFilter::All,
            notice: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn status(&self) -> StatusFilter {
        self.status
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// The same directory with a notice shown.
    pub fn with_notice(&self, notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            ..self.clone()
        }
    }

    /// The summaries the current query and facet admit.
    pub fn visible(&self) -> Vec<&PatientSummary> {
        filter_summaries(&self.summaries, &self.query, self.status)
    }
}

impl Component for Directory {
    type Action = DirectoryAction;
    type View = DirectoryView;

    fn reduce(&self, action: DirectoryAction, ctx: &mut Context) -> CoreResult<Self> {
        let mut next = self.clone();
        next.today = ctx.today();
        match action {
            DirectoryAction::Search(query) => {
                debug!(query = %query, "directory search");
                next.query = query;
            }
            DirectoryAction::SetStatus(status) => {
                debug!(status = %status, "directory status facet");
                next.status = status;
            }
            DirectoryAction::DismissNotice => next.notice = None,
        }
        Ok(next)
    }

    fn view(&self) -> DirectoryView {
        let facets = StatusFilter::options()
            .into_iter()
            .map(|facet| {
                let count = self
                    .summaries
                    .iter()
                    .filter(|summary| facet.admits(summary.status))
                    .count();
                (facet, count)
            })
            .collect();

        DirectoryView {
            query: self.query.clone(),
            status: self.status,
            facets,
            total: self.summaries.len(),
            rows: self
                .visible()
                .into_iter()
                .map(|summary| DirectoryRow::from_summary(summary, self.today))
                .collect(),
            notice: self.notice.clone(),
        }
    }
}
