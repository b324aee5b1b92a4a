//! # Obgyn Core
//!
//! Editing logic for the obstetrics and gynecology patient records.
//!
//! This crate contains the operations that change or select records:
//! - typed field selectors and the generic updater, with BMI and EDD derivation
//! - the lifecycle of ordered child lists (positional renumbering of past pregnancies)
//! - the read-only patient store and identifier lookup
//! - directory search and status filtering
//! - the screen and editor state machines driven by the binaries
//!
//! **No rendering or persistence**: components return plain view values and
//! the store is never written back. Printing belongs to the `cli` crate and
//! the root runner.
//!
//! Every state machine implements [`component::Component`]: an action yields a
//! new state or an error that leaves the previous state intact.

pub mod app;
pub mod component;
pub mod config;
pub mod constants;
pub mod derive;
pub mod directory;
pub mod editors;
pub mod error;
pub mod field;
pub mod fields;
pub mod lists;
pub mod shell;
pub mod store;

pub use app::{App, AppAction, AppView};
pub use component::{step, Component, Context};
pub use config::{CoreConfig, IdStrategy, StoreSource};
pub use error::{CoreError, CoreResult};
pub use field::{update, update_input, update_path, Editable, FieldKind, FieldSelector, FieldValue};
pub use store::{InMemoryStore, Lookup, PatientStore};
