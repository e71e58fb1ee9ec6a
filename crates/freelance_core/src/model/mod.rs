//! Domain model for the freelance ledger collections.
//!
//! # Responsibility
//! - Define canonical record shapes for every collection.
//! - Provide record-level validation shared by repositories and services.
//!
//! # Invariants
//! - Every record is identified by a stable `RecordId` generated at creation.
//! - Cross-record references are cached copies taken at creation time and
//!   are never re-synced when the referenced record changes.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod client;
pub mod contract;
pub mod deliverable;
pub mod finance;
pub mod project;
pub mod proposal;

/// Stable identifier shared by every collection.
pub type RecordId = Uuid;

/// Generates a fresh record identifier.
pub fn new_record_id() -> RecordId {
    Uuid::new_v4()
}

/// Parses user-supplied identifier text.
///
/// Returns `None` for malformed input; callers decide how to report it.
pub fn parse_record_id(value: &str) -> Option<RecordId> {
    Uuid::parse_str(value.trim()).ok()
}

/// Collection a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Client,
    Contract,
    Project,
    Deliverable,
    Proposal,
    FinancialMovement,
}

impl Entity {
    /// Human-readable singular name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Contract => "contract",
            Self::Project => "project",
            Self::Deliverable => "deliverable",
            Self::Proposal => "proposal",
            Self::FinancialMovement => "financial movement",
        }
    }
}

impl Display for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
