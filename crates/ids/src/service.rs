//! Internal implementation of entry id generation.

use crate::{IdError, IdResult};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Kind of entry an id belongs to.
///
/// The prefix keeps ids from different lists visually distinct when they are
/// logged side by side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IdPrefix {
    /// A whole ANC case.
    AncCase,
    /// An ANC follow-up visit.
    FollowUpVisit,
    /// An ANC follow-up test panel.
    FollowUpTest,
    /// A past-pregnancy row.
    PastPregnancy,
    /// A gynecology visit.
    GyneVisit,
    /// A visit record in the patient's visit log.
    Visit,
}

impl IdPrefix {
    const ALL: [IdPrefix; 6] = [
        IdPrefix::AncCase,
        IdPrefix::FollowUpVisit,
        IdPrefix::FollowUpTest,
        IdPrefix::PastPregnancy,
        IdPrefix::GyneVisit,
        IdPrefix::Visit,
    ];

    /// The literal prefix written before the `-` separator.
    pub fn as_str(self) -> &'static str {
        match self {
            IdPrefix::AncCase => "anc",
            IdPrefix::FollowUpVisit => "fv",
            IdPrefix::FollowUpTest => "ft",
            IdPrefix::PastPregnancy => "ob",
            IdPrefix::GyneVisit => "gyne",
            IdPrefix::Visit => "v",
        }
    }

    fn from_wire(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

/// Identifier of one entry within its owning list.
///
/// Once constructed the id is guaranteed to have a known prefix and a
/// non-empty alphanumeric suffix.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct EntryId {
    prefix: IdPrefix,
    suffix: String,
}

impl EntryId {
    /// Validates and parses an id of the form `<prefix>-<suffix>`.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidInput`] if the separator is missing, the prefix
    /// is unknown, or the suffix is empty or not ASCII alphanumeric.
    pub fn parse(input: &str) -> IdResult<Self> {
        let (prefix, suffix) = input.split_once('-').ok_or_else(|| {
            IdError::InvalidInput(format!("entry id must look like '<prefix>-<suffix>', got '{input}'"))
        })?;

        let prefix = IdPrefix::from_wire(prefix).ok_or_else(|| {
            IdError::InvalidInput(format!("unknown entry id prefix '{prefix}' in '{input}'"))
        })?;

        if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(IdError::InvalidInput(format!(
                "entry id suffix must be non-empty ASCII alphanumeric, got '{input}'"
            )));
        }

        Ok(Self {
            prefix,
            suffix: suffix.to_owned(),
        })
    }

    /// Returns the kind of entry this id names.
    pub fn prefix(&self) -> IdPrefix {
        self.prefix
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix.as_str(), self.suffix)
    }
}

impl FromStr for EntryId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntryId::parse(s)
    }
}

impl TryFrom<String> for EntryId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        EntryId::parse(&value)
    }
}

impl From<EntryId> for String {
    fn from(id: EntryId) -> Self {
        id.to_string()
    }
}

/// Source of fresh entry ids.
///
/// Implementations only promise uniqueness among the ids they hand out.
pub trait IdGenerator {
    /// Returns a new id that this generator has never returned before.
    fn next_id(&mut self, prefix: IdPrefix) -> EntryId;

    /// Marks `id` as taken by data loaded from elsewhere, so `next_id` never
    /// returns it.
    fn reserve(&mut self, _id: &EntryId) {}
}

/// Generates ids with a random UUID v4 suffix.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&mut self, prefix: IdPrefix) -> EntryId {
        EntryId {
            prefix,
            suffix: Uuid::new_v4().simple().to_string(),
        }
    }
}

/// Generates ids with a monotonically increasing decimal suffix.
///
/// The counter is shared across prefixes, so `fv-1` and `ob-2` never collide
/// even if the prefix is ignored.
#[derive(Clone, Debug)]
pub struct SequentialIdGenerator {
    next: u64,
}

impl SequentialIdGenerator {
    /// Starts counting at 1.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Starts counting at `first`.
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self, prefix: IdPrefix) -> EntryId {
        let value = self.next;
        self.next = self.next.saturating_add(1);
        EntryId {
            prefix,
            suffix: value.to_string(),
        }
    }

    fn reserve(&mut self, id: &EntryId) {
        if let Ok(taken) = id.suffix.parse::<u64>() {
            self.next = self.next.max(taken.saturating_add(1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sequential_ids_count_up_across_prefixes() {
        let mut ids = SequentialIdGenerator::new();
        assert_eq!(ids.next_id(IdPrefix::FollowUpVisit).to_string(), "fv-1");
        assert_eq!(ids.next_id(IdPrefix::PastPregnancy).to_string(), "ob-2");
        assert_eq!(ids.next_id(IdPrefix::FollowUpVisit).to_string(), "fv-3");
    }

    #[test]
    fn sequential_ids_skip_reserved_ids() {
        let mut ids = SequentialIdGenerator::new();
        for taken in ["ob-4", "v-3", "ob-2", "gyne-a1b2"] {
            ids.reserve(&EntryId::parse(taken).expect("valid id"));
        }
        assert_eq!(ids.next_id(IdPrefix::PastPregnancy).to_string(), "ob-5");
        assert_eq!(ids.next_id(IdPrefix::Visit).to_string(), "v-6");
    }

    #[test]
    fn random_ids_ignore_reservations() {
        let mut ids = RandomIdGenerator;
        ids.reserve(&EntryId::parse("ob-1").expect("valid id"));
        assert!(ids.next_id(IdPrefix::PastPregnancy).to_string().starts_with("ob-"));
    }

    #[test]
    fn sequential_ids_can_start_later() {
        let mut ids = SequentialIdGenerator::starting_at(40);
        assert_eq!(ids.next_id(IdPrefix::Visit).to_string(), "v-40");
    }

    #[test]
    fn random_ids_are_unique_and_canonical() {
        let mut ids = RandomIdGenerator;
        let generated: HashSet<String> = (0..200)
            .map(|_| ids.next_id(IdPrefix::GyneVisit).to_string())
            .collect();
        assert_eq!(generated.len(), 200);

        for id in &generated {
            let suffix = id.strip_prefix("gyne-").expect("prefix");
            assert_eq!(suffix.len(), 32);
            assert!(suffix.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
        }
    }

    #[test]
    fn parse_round_trips_display() {
        let id = EntryId::parse("fv-550e8400e29b41d4a716446655440000").expect("valid id");
        assert_eq!(id.prefix(), IdPrefix::FollowUpVisit);
        assert_eq!(id.to_string(), "fv-550e8400e29b41d4a716446655440000");
    }

    #[test]
    fn parse_rejects_malformed_ids() {
        for bad in ["", "fv", "fv-", "xx-1", "fv-1 2", "-1"] {
            let err = EntryId::parse(bad).expect_err("should reject");
            assert!(matches!(err, IdError::InvalidInput(_)), "input {bad:?}");
        }
    }

    #[test]
    fn serde_uses_string_form() {
        let id = EntryId::parse("ob-7").expect("valid");
        let json = serde_json::to_string(&id).expect("serialise");
        assert_eq!(json, "\"ob-7\"");

        let back: EntryId = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(back, id);
        assert!(serde_json::from_str::<EntryId>("\"zz-7\"").is_err());
    }
}
