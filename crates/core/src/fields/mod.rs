//! Field selectors for every editable record.
//!
//! Flat sections get a selector enum generated by `leaf_fields!`; records made
//! of several sections wrap those in a record-level enum whose variants name
//! the section, so `AncField::BookingVisit(BookingVisitField::Height)` is the
//! typed form of the path `bookingVisit.height`.

pub mod anc;
pub mod entries;
pub mod gyne;
pub mod history;
pub mod profile;

use crate::field::{path_error, FieldSelector};
use crate::{CoreError, CoreResult};

/// Parse the leaf part of a `section.leaf` path.
pub(crate) fn section_leaf<S: FieldSelector>(
    path: &str,
    section: &str,
    rest: Option<&str>,
) -> CoreResult<S> {
    let rest = rest.ok_or_else(|| {
        path_error(path, format!("'{section}' is a section, not a field"))
    })?;
    S::parse_path(rest).map_err(|err| match err {
        CoreError::PathResolution { reason, .. } => {
            path_error(path, format!("{reason} in section '{section}'"))
        }
        other => other,
    })
}

pub(crate) fn unknown_section(path: &str, section: &str) -> CoreError {
    path_error(path, format!("unknown section '{section}'"))
}
