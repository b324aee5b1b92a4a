//! Entry identifiers for clinical list items.
//!
//! Every list entity owned by a case (follow-up visits, follow-up tests, past
//! pregnancies, gynecology visits, visit records) carries an [`EntryId`] that is
//! unique within its owning list. Uniqueness is the only requirement; ids are
//! never parsed for meaning beyond their prefix.
//!
//! ## Format
//! `<prefix>-<suffix>`
//!
//! - `prefix` names the kind of entry (see [`IdPrefix`]), e.g. `fv` for an ANC
//!   follow-up visit.
//! - `suffix` is either a canonical UUID (32 lowercase hex characters, from
//!   [`RandomIdGenerator`]) or a decimal counter (from [`SequentialIdGenerator`]).
//!
//! Examples:
//! - `fv-550e8400e29b41d4a716446655440000`
//! - `ob-3`

mod service;

// Re-export public types
pub use service::{EntryId, IdGenerator, IdPrefix, RandomIdGenerator, SequentialIdGenerator};

/// Error type for id operations.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for id operations.
pub type IdResult<T> = Result<T, IdError>;
