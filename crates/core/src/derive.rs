//! Clinical derivations: body-mass index, estimated delivery date, gestational age.
//!
//! These are pure functions; the record field selectors call them from their
//! derivation hooks whenever an input field changes.

use crate::constants::{DAYS_PER_WEEK, GESTATION_DAYS};
use chrono::{Days, NaiveDate};
use std::fmt;

/// Round half away from zero to one decimal place.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Body-mass index from height in centimetres and weight in kilograms.
///
/// Returns `None` unless both inputs are strictly positive, in which case the
/// stored BMI should be left as it is.
///
/// # Example
///
/// `bmi(160.0, 56.32)` is `Some(22.0)`.
pub fn bmi(height_cm: f64, weight_kg: f64) -> Option<f64> {
    if height_cm > 0.0 && weight_kg > 0.0 {
        let height_m = height_cm / 100.0;
        Some(round_one_decimal(weight_kg / height_m.powi(2)))
    } else {
        None
    }
}

/// Estimated delivery date: LMP plus 280 days, in calendar days.
///
/// Returns `None` only if the result would fall outside chrono's date range.
pub fn estimated_delivery_date(lmp: NaiveDate) -> Option<NaiveDate> {
    lmp.checked_add_days(Days::new(GESTATION_DAYS))
}

/// Completed weeks and days of pregnancy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GestationalAge {
    pub weeks: u32,
    pub days: u32,
}

impl GestationalAge {
    pub fn total_days(self) -> u32 {
        self.weeks * DAYS_PER_WEEK as u32 + self.days
    }
}

impl fmt::Display for GestationalAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}w {}d", self.weeks, self.days)
    }
}

/// Gestational age on `on` for a pregnancy with the given LMP.
///
/// Returns `None` if `on` is before the LMP.
pub fn gestational_age(lmp: NaiveDate, on: NaiveDate) -> Option<GestationalAge> {
    let elapsed = on.signed_duration_since(lmp).num_days();
    if elapsed < 0 {
        return None;
    }
    let weeks = u32::try_from(elapsed / DAYS_PER_WEEK).ok()?;
    let days = u32::try_from(elapsed % DAYS_PER_WEEK).ok()?;
    Some(GestationalAge { weeks, days })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn bmi_for_reference_values() {
        assert_eq!(bmi(160.0, 56.32), Some(22.0));
        assert_eq!(bmi(155.0, 55.0), Some(22.9));
        assert_eq!(bmi(170.0, 80.0), Some(27.7));
    }

    #[test]
    fn bmi_needs_both_inputs() {
        assert_eq!(bmi(0.0, 56.0), None);
        assert_eq!(bmi(160.0, 0.0), None);
        assert_eq!(bmi(-160.0, 56.0), None);
        assert_eq!(bmi(f64::NAN, 56.0), None);
    }

    #[test]
    fn edd_adds_280_days() {
        assert_eq!(estimated_delivery_date(date(2025, 4, 1)), Some(date(2026, 1, 6)));
        assert_eq!(estimated_delivery_date(date(2025, 1, 1)), Some(date(2025, 10, 8)));
        // crosses a leap day
        assert_eq!(estimated_delivery_date(date(2023, 6, 1)), Some(date(2024, 3, 7)));
    }

    #[test]
    fn edd_at_end_of_calendar_is_none() {
        assert_eq!(estimated_delivery_date(NaiveDate::MAX), None);
    }

    #[test]
    fn gestational_age_counts_whole_weeks() {
        let lmp = date(2025, 4, 1);
        assert_eq!(
            gestational_age(lmp, date(2025, 7, 15)),
            Some(GestationalAge { weeks: 15, days: 0 })
        );
        assert_eq!(
            gestational_age(lmp, date(2025, 7, 18)),
            Some(GestationalAge { weeks: 15, days: 3 })
        );
        assert_eq!(gestational_age(lmp, lmp), Some(GestationalAge { weeks: 0, days: 0 }));
        assert_eq!(gestational_age(lmp, date(2025, 3, 31)), None);
        assert_eq!(GestationalAge { weeks: 15, days: 3 }.to_string(), "15w 3d");
    }

    proptest! {
        #[test]
        fn bmi_matches_formula(height in 50.0f64..250.0, weight in 1.0f64..300.0) {
            let expected = (weight / (height / 100.0).powi(2) * 10.0).round() / 10.0;
            prop_assert_eq!(bmi(height, weight), Some(expected));
        }

        #[test]
        fn edd_is_always_280_days_after_lmp(offset in 0i64..200_000) {
            let lmp = date(1900, 1, 1) + chrono::Duration::days(offset);
            let edd = estimated_delivery_date(lmp).expect("in range");
            prop_assert_eq!(edd.signed_duration_since(lmp).num_days(), 280);
        }

        #[test]
        fn gestational_age_reassembles_elapsed_days(offset in 0u32..400) {
            let lmp = date(2025, 1, 1);
            let on = lmp + chrono::Duration::days(i64::from(offset));
            let age = gestational_age(lmp, on).expect("not before lmp");
            prop_assert_eq!(age.total_days(), offset);
            prop_assert!(age.days < 7);
        }
    }
}
