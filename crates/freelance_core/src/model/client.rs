//! Client domain model.
//!
//! # Responsibility
//! - Define the client record and its editable fields.
//! - Name the collections whose records cache a client's name.
//!
//! # Invariants
//! - `name` is non-empty and unique across the collection (enforced by the
//!   service layer and a storage constraint).
//! - `email` and `phone` satisfy the validation rules at write time.

use crate::model::{new_record_id, RecordId};
use crate::validation::{require, validate_email, validate_phone, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Client record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: RecordId,
    /// Display name, cached by dependent records at their creation time.
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Client {
    /// Creates a client with a generated id.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: new_record_id(),
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Validates field formats. Uniqueness needs the store and is checked
    /// by the service.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        validate_email(&self.email)?;
        validate_phone(&self.phone)?;
        Ok(())
    }

    /// Returns the current value of one editable field.
    pub fn field(&self, field: ClientField) -> &str {
        match field {
            ClientField::Name => &self.name,
            ClientField::Email => &self.email,
            ClientField::Phone => &self.phone,
        }
    }

    /// Replaces one editable field, leaving the others untouched.
    pub fn set_field(&mut self, field: ClientField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ClientField::Name => self.name = value,
            ClientField::Email => self.email = value,
            ClientField::Phone => self.phone = value,
        }
    }
}

/// Editable client fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientField {
    Name,
    Email,
    Phone,
}

impl ClientField {
    pub const ALL: [ClientField; 3] = [Self::Name, Self::Email, Self::Phone];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

impl Display for ClientField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How a client lookup interprets its search value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCriterion {
    /// Case-insensitive substring of the name.
    Name,
    /// Case-insensitive substring of the email.
    Email,
    /// Exact record id.
    Id,
}

impl ClientCriterion {
    pub const ALL: [ClientCriterion; 3] = [Self::Name, Self::Email, Self::Id];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Id => "id",
        }
    }
}

impl Display for ClientCriterion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Collections whose records cache a client name and therefore block the
/// client's deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependentCollection {
    Proposals,
    Contracts,
    Deliverables,
    FinancialMovements,
}

impl DependentCollection {
    /// Scan order used by the delete guard.
    pub const ALL: [DependentCollection; 4] = [
        Self::Proposals,
        Self::Contracts,
        Self::Deliverables,
        Self::FinancialMovements,
    ];

    /// Backing table name.
    pub fn table_name(self) -> &'static str {
        match self {
            Self::Proposals => "proposals",
            Self::Contracts => "contracts",
            Self::Deliverables => "deliverables",
            Self::FinancialMovements => "financial_movements",
        }
    }
}

impl Display for DependentCollection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table_name())
    }
}
