//! Contract domain model.
//!
//! # Responsibility
//! - Define the contract record, its enumerated type/status and the
//!   single-field changes accepted by updates.
//!
//! # Invariants
//! - `client_name` is a cached copy of the client's name at creation time.
//! - `amount` is finite and non-negative.
//! - The contract's display title is its `project_name`.

use crate::model::{new_record_id, RecordId};
use crate::validation::{require, validate_amount, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Billing arrangement of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractKind {
    PerProject,
    Hourly,
    Retainer,
}

impl ContractKind {
    pub const ALL: [ContractKind; 3] = [Self::PerProject, Self::Hourly, Self::Retainer];

    /// Storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PerProject => "per_project",
            Self::Hourly => "hourly",
            Self::Retainer => "retainer",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "per_project" => Some(Self::PerProject),
            "hourly" => Some(Self::Hourly),
            "retainer" => Some(Self::Retainer),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PerProject => "Per project",
            Self::Hourly => "Hourly",
            Self::Retainer => "Retainer",
        }
    }
}

impl Display for ContractKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Contract lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    Active,
    Finished,
    Cancelled,
}

impl ContractStatus {
    pub const ALL: [ContractStatus; 3] = [Self::Active, Self::Finished, Self::Cancelled];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Finished => "finished",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "finished" => Some(Self::Finished),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Finished => "Finished",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl Display for ContractStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Contract record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: RecordId,
    /// Client name cached at creation; not re-synced on client rename.
    pub client_name: String,
    pub freelancer_name: String,
    pub project_name: String,
    #[serde(rename = "type")]
    pub kind: ContractKind,
    pub status: ContractStatus,
    pub start_date: NaiveDate,
    /// Contract value in USD.
    pub amount: f64,
}

/// Form input for a new contract; the client is resolved separately.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractDraft {
    pub freelancer_name: String,
    pub project_name: String,
    pub kind: ContractKind,
    pub status: ContractStatus,
    pub start_date: NaiveDate,
    pub amount: f64,
}

impl Contract {
    /// Builds a contract for `client_name` from form input.
    pub fn from_draft(client_name: impl Into<String>, draft: ContractDraft) -> Self {
        Self {
            id: new_record_id(),
            client_name: client_name.into(),
            freelancer_name: draft.freelancer_name,
            project_name: draft.project_name,
            kind: draft.kind,
            status: draft.status,
            start_date: draft.start_date,
            amount: draft.amount,
        }
    }

    /// Title cached by projects that reference this contract.
    pub fn title(&self) -> &str {
        &self.project_name
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("client name", &self.client_name)?;
        require("freelancer name", &self.freelancer_name)?;
        require("project name", &self.project_name)?;
        validate_amount(self.amount)?;
        Ok(())
    }

    /// Applies one field change in place.
    pub fn apply(&mut self, change: ContractChange) {
        match change {
            ContractChange::FreelancerName(value) => self.freelancer_name = value,
            ContractChange::ProjectName(value) => self.project_name = value,
            ContractChange::Kind(value) => self.kind = value,
            ContractChange::Status(value) => self.status = value,
            ContractChange::StartDate(value) => self.start_date = value,
            ContractChange::Amount(value) => self.amount = value,
        }
    }
}

/// Editable contract fields, used to drive the update prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractField {
    FreelancerName,
    ProjectName,
    Kind,
    Status,
    StartDate,
    Amount,
}

impl ContractField {
    pub const ALL: [ContractField; 6] = [
        Self::FreelancerName,
        Self::ProjectName,
        Self::Kind,
        Self::Status,
        Self::StartDate,
        Self::Amount,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::FreelancerName => "freelancer name",
            Self::ProjectName => "project name",
            Self::Kind => "type",
            Self::Status => "status",
            Self::StartDate => "start date",
            Self::Amount => "amount",
        }
    }
}

impl Display for ContractField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Single-field replacement for an existing contract.
///
/// The cached client name is not editable.
#[derive(Debug, Clone, PartialEq)]
pub enum ContractChange {
    FreelancerName(String),
    ProjectName(String),
    Kind(ContractKind),
    Status(ContractStatus),
    StartDate(NaiveDate),
    Amount(f64),
}

/// Contract search criterion with its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractCriterion {
    /// Case-insensitive substring of the cached client name.
    ClientName(String),
    /// Case-insensitive substring of the freelancer name.
    FreelancerName(String),
    Status(ContractStatus),
    Kind(ContractKind),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ContractDraft {
        ContractDraft {
            freelancer_name: "Luis".to_string(),
            project_name: "Landing page".to_string(),
            kind: ContractKind::PerProject,
            status: ContractStatus::Active,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            amount: 1200.0,
        }
    }

    #[test]
    fn enum_storage_values_round_trip() {
        for kind in ContractKind::ALL {
            assert_eq!(ContractKind::parse(kind.as_str()), Some(kind));
        }
        for status in ContractStatus::ALL {
            assert_eq!(ContractStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ContractKind::parse("weekly"), None);
    }

    #[test]
    fn apply_replaces_only_the_changed_field() {
        let mut contract = Contract::from_draft("Ana", draft());
        contract.apply(ContractChange::Status(ContractStatus::Finished));
        assert_eq!(contract.status, ContractStatus::Finished);
        assert_eq!(contract.title(), "Landing page");
        assert_eq!(contract.client_name, "Ana");
    }

    #[test]
    fn validate_rejects_negative_amount() {
        let mut contract = Contract::from_draft("Ana", draft());
        contract.amount = -5.0;
        assert!(matches!(
            contract.validate(),
            Err(ValidationError::InvalidAmount(_))
        ));
    }
}
