//! Shared traits and enums for finance entities.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exposes a stable identifier for entities held by the store.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Direction of money flow shared by categories and transactions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name an [`EntryKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEntryKindError(pub String);

impl fmt::Display for ParseEntryKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown entry type `{}` (use income or expense)", self.0)
    }
}

impl std::error::Error for ParseEntryKindError {}

impl FromStr for EntryKind {
    type Err = ParseEntryKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Ok(EntryKind::Income),
            "expense" | "out" => Ok(EntryKind::Expense),
            other => Err(ParseEntryKindError(other.to_string())),
        }
    }
}
