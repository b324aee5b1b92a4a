//! Constants used throughout the obgyn core crate.

/// Days from the first day of the last menstrual period to the estimated delivery date
/// (Naegele's rule).
pub const GESTATION_DAYS: u64 = 280;

/// Days per gestational week.
pub const DAYS_PER_WEEK: i64 = 7;

/// Environment variable naming a YAML store file to load instead of the bundled demo store.
pub const STORE_PATH_ENV: &str = "OBGYN_STORE_PATH";

/// Environment variable selecting how entry ids are generated (`random` or `sequential`).
pub const ID_STRATEGY_ENV: &str = "OBGYN_ID_STRATEGY";

/// Placeholder shown where a text value is empty.
pub const EMPTY_PLACEHOLDER: &str = "-";
