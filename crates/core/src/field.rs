//! Typed field selection and the single-field update.
//!
//! Every editable record exposes a closed set of leaf fields through a
//! selector type (usually an enum, nested per section). A selector knows the
//! [`FieldKind`] of its leaf, so an update with a value of the wrong kind is
//! rejected before anything is written.
//!
//! Selectors can also be parsed from dotted camelCase paths such as
//! `bookingVisit.height` or `postnatalCare.checklist.diabetes`, which is how the
//! command line and the interactive session address fields. Path parsing is the
//! only place a path can fail to resolve; once a selector exists, it always
//! names a real leaf.
//!
//! [`update`] is the one write path: it clones the record (sharing untouched
//! `Arc` sections), writes the leaf, then runs the record's derivation hook for
//! that field. The input record is never modified.

use crate::{CoreError, CoreResult};
use chrono::NaiveDate;
use std::fmt;
use tracing::debug;

/// Value domain of a leaf field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Count,
    Flag,
    Date,
    /// Text restricted to a closed set of names.
    Choice(&'static [&'static str]),
}

impl FieldKind {
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Count => "count",
            FieldKind::Flag => "flag",
            FieldKind::Date => "date",
            FieldKind::Choice(_) => "choice",
        }
    }

    /// The value an unparseable input falls back to for this kind.
    pub fn zero(self) -> FieldValue {
        match self {
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::Number => FieldValue::Number(0.0),
            FieldKind::Count => FieldValue::Count(0),
            FieldKind::Flag => FieldValue::Flag(false),
            FieldKind::Date => FieldValue::Date(None),
            FieldKind::Choice(options) => {
                FieldValue::Text(options.first().copied().unwrap_or_default().to_string())
            }
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value read from or written to a leaf field.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Count(u32),
    Flag(bool),
    Date(Option<NaiveDate>),
}

impl FieldValue {
    /// Name of the value's kind, as used in mismatch errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Number(_) => "number",
            FieldValue::Count(_) => "count",
            FieldValue::Flag(_) => "flag",
            FieldValue::Date(_) => "date",
        }
    }

    /// Coerce raw form input into a value of `kind`.
    ///
    /// This never fails: numeric input that does not parse becomes `fallback`,
    /// a date that does not parse as `YYYY-MM-DD` becomes absent, and a flag
    /// accepts `true/false`, `yes/no`, `y/n` and `1/0` (anything else is `false`).
    /// Text is taken as-is; choices are checked later by [`update`].
    pub fn coerce(kind: FieldKind, raw: &str, fallback: FieldValue) -> FieldValue {
        let trimmed = raw.trim();
        match kind {
            FieldKind::Text | FieldKind::Choice(_) => FieldValue::Text(raw.to_string()),
            FieldKind::Number => trimmed
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(FieldValue::Number)
                .unwrap_or(fallback),
            FieldKind::Count => trimmed
                .parse::<u32>()
                .ok()
                .map(FieldValue::Count)
                .unwrap_or(fallback),
            FieldKind::Flag => FieldValue::Flag(matches!(
                trimmed.to_ascii_lowercase().as_str(),
                "true" | "yes" | "y" | "1"
            )),
            FieldKind::Date => {
                FieldValue::Date(NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok())
            }
        }
    }

    fn mismatch(&self, path: &str, expected: FieldKind) -> CoreError {
        CoreError::FieldKindMismatch {
            path: path.to_string(),
            expected: expected.name(),
            found: self.kind_name(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Count(n) => write!(f, "{n}"),
            FieldValue::Flag(b) => write!(f, "{}", if *b { "yes" } else { "no" }),
            FieldValue::Date(Some(date)) => write!(f, "{}", date.format("%Y-%m-%d")),
            FieldValue::Date(None) => Ok(()),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Count(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<Option<NaiveDate>> for FieldValue {
    fn from(value: Option<NaiveDate>) -> Self {
        FieldValue::Date(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(Some(value))
    }
}

impl From<Option<f64>> for FieldValue {
    fn from(value: Option<f64>) -> Self {
        FieldValue::Number(value.unwrap_or(0.0))
    }
}

impl From<Option<u32>> for FieldValue {
    fn from(value: Option<u32>) -> Self {
        FieldValue::Count(value.unwrap_or(0))
    }
}

/// Rust types that can sit at a leaf.
///
/// Each implementation fixes the [`FieldKind`] of the leaf and extracts itself
/// from a [`FieldValue`] of that kind.
pub trait LeafValue: Sized {
    const KIND: FieldKind;

    /// # Errors
    ///
    /// Returns [`CoreError::FieldKindMismatch`] if `value` is of another kind.
    fn from_field_value(value: FieldValue, path: &str) -> CoreResult<Self>;
}

impl LeafValue for String {
    const KIND: FieldKind = FieldKind::Text;

    fn from_field_value(value: FieldValue, path: &str) -> CoreResult<Self> {
        match value {
            FieldValue::Text(text) => Ok(text),
            other => Err(other.mismatch(path, Self::KIND)),
        }
    }
}

impl LeafValue for f64 {
    const KIND: FieldKind = FieldKind::Number;

    fn from_field_value(value: FieldValue, path: &str) -> CoreResult<Self> {
        match value {
            FieldValue::Number(n) => Ok(n),
            other => Err(other.mismatch(path, Self::KIND)),
        }
    }
}

impl LeafValue for u32 {
    const KIND: FieldKind = FieldKind::Count;

    fn from_field_value(value: FieldValue, path: &str) -> CoreResult<Self> {
        match value {
            FieldValue::Count(n) => Ok(n),
            other => Err(other.mismatch(path, Self::KIND)),
        }
    }
}

impl LeafValue for bool {
    const KIND: FieldKind = FieldKind::Flag;

    fn from_field_value(value: FieldValue, path: &str) -> CoreResult<Self> {
        match value {
            FieldValue::Flag(b) => Ok(b),
            other => Err(other.mismatch(path, Self::KIND)),
        }
    }
}

impl LeafValue for Option<NaiveDate> {
    const KIND: FieldKind = FieldKind::Date;

    fn from_field_value(value: FieldValue, path: &str) -> CoreResult<Self> {
        match value {
            FieldValue::Date(date) => Ok(date),
            other => Err(other.mismatch(path, Self::KIND)),
        }
    }
}

/// An optional measurement. Zero means "not recorded".
impl LeafValue for Option<f64> {
    const KIND: FieldKind = FieldKind::Number;

    fn from_field_value(value: FieldValue, path: &str) -> CoreResult<Self> {
        match value {
            FieldValue::Number(n) => Ok((n > 0.0).then_some(n)),
            other => Err(other.mismatch(path, Self::KIND)),
        }
    }
}

/// An optional count. Zero means "not recorded".
impl LeafValue for Option<u32> {
    const KIND: FieldKind = FieldKind::Count;

    fn from_field_value(value: FieldValue, path: &str) -> CoreResult<Self> {
        match value {
            FieldValue::Count(n) => Ok((n > 0).then_some(n)),
            other => Err(other.mismatch(path, Self::KIND)),
        }
    }
}

/// A required date: present on write, never cleared.
impl LeafValue for NaiveDate {
    const KIND: FieldKind = FieldKind::Date;

    fn from_field_value(value: FieldValue, path: &str) -> CoreResult<Self> {
        match value {
            FieldValue::Date(Some(date)) => Ok(date),
            FieldValue::Date(None) => Err(CoreError::InvalidInput(format!(
                "'{path}' requires a date"
            ))),
            other => Err(other.mismatch(path, Self::KIND)),
        }
    }
}

/// Kind of the leaf a projection points at.
///
/// Used by the selector macro to read the kind off the field's Rust type.
pub(crate) fn kind_of<R, T, F>(_projection: F) -> FieldKind
where
    T: LeafValue,
    F: Fn(&R) -> &T,
{
    T::KIND
}

/// A closed set of leaf fields of one record type.
pub trait FieldSelector: Copy + fmt::Debug + fmt::Display + Sized + 'static {
    /// Every selectable leaf, in form order.
    fn all() -> Vec<Self>;

    fn kind(self) -> FieldKind;

    /// Resolve a dotted camelCase path.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::PathResolution`] if the path is empty, names an
    /// unknown segment, or stops at a section instead of a leaf.
    fn parse_path(path: &str) -> CoreResult<Self>;

    /// Value used when raw input for this field cannot be parsed.
    fn fallback(self) -> FieldValue {
        self.kind().zero()
    }
}

/// A record that can be edited one leaf at a time.
pub trait Editable: Clone {
    type Field: FieldSelector;

    /// Current value of a leaf.
    fn get(&self, field: Self::Field) -> FieldValue;

    /// Write a leaf in place.
    ///
    /// Implementations copy-on-write the `Arc` section that holds the leaf.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::FieldKindMismatch`] or [`CoreError::InvalidChoice`]
    /// if `value` does not fit the leaf.
    fn put(&mut self, field: Self::Field, value: FieldValue) -> CoreResult<()>;

    /// Recompute derived values after `field` was written.
    fn derive(&mut self, _field: Self::Field) {}
}

/// Return a copy of `record` with one leaf replaced and its derivations applied.
///
/// The input record is not modified. Sections the field does not live in are
/// shared with the input.
///
/// # Errors
///
/// Returns [`CoreError::FieldKindMismatch`] (or [`CoreError::InvalidChoice`]
/// for closed-set text fields) and writes nothing if `value` does not fit.
pub fn update<R: Editable>(record: &R, field: R::Field, value: FieldValue) -> CoreResult<R> {
    let mut next = record.clone();
    next.put(field, value)?;
    next.derive(field);
    debug!(field = %field, "field updated");
    Ok(next)
}

/// Resolve `path` and apply a typed value.
///
/// # Errors
///
/// Returns [`CoreError::PathResolution`] for a bad path, otherwise the errors
/// of [`update`].
pub fn update_path<R: Editable>(record: &R, path: &str, value: FieldValue) -> CoreResult<R> {
    let field = R::Field::parse_path(path)?;
    update(record, field, value)
}

/// Resolve `path`, coerce raw form input to the field's kind, and apply it.
///
/// # Errors
///
/// Returns [`CoreError::PathResolution`] for a bad path, or
/// [`CoreError::InvalidChoice`] if a closed-set field gets an unknown name.
pub fn update_input<R: Editable>(record: &R, path: &str, raw: &str) -> CoreResult<R> {
    let field = R::Field::parse_path(path)?;
    let value = FieldValue::coerce(field.kind(), raw, field.fallback());
    update(record, field, value)
}

/// Resolve a `section.leaf` path using the section's own leaf parser.
///
/// Shared by the record-level selectors so they report path errors the same way.
pub(crate) fn split_section(path: &str) -> CoreResult<(&str, Option<&str>)> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(path_error(path, "path is empty"));
    }
    match trimmed.split_once('.') {
        Some((section, rest)) => Ok((section, Some(rest))),
        None => Ok((trimmed, None)),
    }
}

pub(crate) fn path_error(path: &str, reason: impl Into<String>) -> CoreError {
    CoreError::PathResolution {
        path: path.to_string(),
        reason: reason.into(),
    }
}

/// Declares a flat selector enum over the fields of one struct.
///
/// Each entry maps a variant to its camelCase wire name and the struct field it
/// selects. The kind of each leaf comes from the field's Rust type through
/// [`LeafValue`].
macro_rules! leaf_fields {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident for $record:ty {
            $($variant:ident => $wire:literal : $field:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// camelCase name of the leaf.
            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($wire => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub(crate) fn get(self, record: &$record) -> $crate::field::FieldValue {
                match self {
                    $($name::$variant => $crate::field::FieldValue::from(record.$field.clone())),+
                }
            }

            pub(crate) fn put(
                self,
                record: &mut $record,
                value: $crate::field::FieldValue,
                path: &str,
            ) -> $crate::CoreResult<()> {
                match self {
                    $($name::$variant => {
                        record.$field = $crate::field::LeafValue::from_field_value(value, path)?
                    })+
                }
                Ok(())
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl $crate::field::FieldSelector for $name {
            fn all() -> Vec<Self> {
                Self::ALL.to_vec()
            }

            fn kind(self) -> $crate::field::FieldKind {
                match self {
                    $($name::$variant => $crate::field::kind_of(|r: &$record| &r.$field)),+
                }
            }

            fn parse_path(path: &str) -> $crate::CoreResult<Self> {
                let trimmed = path.trim();
                if trimmed.is_empty() {
                    return Err($crate::field::path_error(path, "path is empty"));
                }
                Self::from_name(trimmed).ok_or_else(|| {
                    $crate::field::path_error(path, format!("unknown field '{trimmed}'"))
                })
            }
        }
    };
}

pub(crate) use leaf_fields;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Vitals {
        height: f64,
        weight: f64,
        bmi: f64,
        notes: String,
        fasting: bool,
        taken_on: Option<NaiveDate>,
        visits: u32,
    }

    leaf_fields! {
        enum VitalsField for Vitals {
            Height => "height": height,
            Weight => "weight": weight,
            Notes => "notes": notes,
            Fasting => "fasting": fasting,
            TakenOn => "takenOn": taken_on,
            Visits => "visits": visits,
        }
    }

    impl Editable for Vitals {
        type Field = VitalsField;

        fn get(&self, field: VitalsField) -> FieldValue {
            field.get(self)
        }

        fn put(&mut self, field: VitalsField, value: FieldValue) -> CoreResult<()> {
            field.put(self, value, field.name())
        }

        fn derive(&mut self, field: VitalsField) {
            if matches!(field, VitalsField::Height | VitalsField::Weight) {
                self.bmi = self.height + self.weight;
            }
        }
    }

    #[test]
    fn kinds_follow_field_types() {
        assert_eq!(VitalsField::Height.kind(), FieldKind::Number);
        assert_eq!(VitalsField::Notes.kind(), FieldKind::Text);
        assert_eq!(VitalsField::Fasting.kind(), FieldKind::Flag);
        assert_eq!(VitalsField::TakenOn.kind(), FieldKind::Date);
        assert_eq!(VitalsField::Visits.kind(), FieldKind::Count);
    }

    #[test]
    fn update_writes_leaf_and_runs_derivation() {
        let before = Vitals::default();
        let after = update(&before, VitalsField::Height, FieldValue::Number(160.0))
            .expect("update should succeed");

        assert_eq!(after.height, 160.0);
        assert_eq!(after.bmi, 160.0);
        assert_eq!(before, Vitals::default());
    }

    #[test]
    fn update_rejects_wrong_kind_and_writes_nothing() {
        let before = Vitals::default();
        let err = update(&before, VitalsField::Height, FieldValue::Text("tall".into()))
            .expect_err("text into a number field should fail");

        match err {
            CoreError::FieldKindMismatch {
                path,
                expected,
                found,
            } => {
                assert_eq!(path, "height");
                assert_eq!(expected, "number");
                assert_eq!(found, "text");
            }
            other => panic!("expected FieldKindMismatch, got {other:?}"),
        }
    }

    #[test]
    fn path_errors_name_the_problem() {
        let err = VitalsField::parse_path("").expect_err("empty path");
        assert!(matches!(err, CoreError::PathResolution { reason, .. } if reason.contains("empty")));

        let err = VitalsField::parse_path("pulse").expect_err("unknown field");
        assert!(matches!(err, CoreError::PathResolution { reason, .. } if reason.contains("pulse")));
    }

    #[test]
    fn coerce_falls_back_on_bad_numbers() {
        assert_eq!(
            FieldValue::coerce(FieldKind::Number, "abc", FieldValue::Number(0.0)),
            FieldValue::Number(0.0)
        );
        assert_eq!(
            FieldValue::coerce(FieldKind::Number, " 56.5 ", FieldValue::Number(0.0)),
            FieldValue::Number(56.5)
        );
        assert_eq!(
            FieldValue::coerce(FieldKind::Count, "x", FieldValue::Count(1)),
            FieldValue::Count(1)
        );
        assert_eq!(
            FieldValue::coerce(FieldKind::Count, "-3", FieldValue::Count(0)),
            FieldValue::Count(0)
        );
    }

    #[test]
    fn coerce_dates_and_flags() {
        assert_eq!(
            FieldValue::coerce(FieldKind::Date, "2025-04-01", FieldValue::Date(None)),
            FieldValue::Date(NaiveDate::from_ymd_opt(2025, 4, 1))
        );
        assert_eq!(
            FieldValue::coerce(FieldKind::Date, "01/04/2025", FieldValue::Date(None)),
            FieldValue::Date(None)
        );
        assert_eq!(
            FieldValue::coerce(FieldKind::Flag, "Yes", FieldValue::Flag(false)),
            FieldValue::Flag(true)
        );
        assert_eq!(
            FieldValue::coerce(FieldKind::Flag, "0", FieldValue::Flag(true)),
            FieldValue::Flag(false)
        );
    }

    #[test]
    fn update_input_resolves_and_coerces() {
        let before = Vitals::default();
        let after = update_input(&before, "weight", "56.32").expect("should apply");
        assert_eq!(after.weight, 56.32);

        let after = update_input(&after, "fasting", "y").expect("should apply");
        assert!(after.fasting);

        let err = update_input(&after, "weight.kg", "1").expect_err("not a leaf");
        assert!(matches!(err, CoreError::PathResolution { .. }));
    }
}
