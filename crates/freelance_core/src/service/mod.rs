//! Entity use-case services.
//!
//! # Responsibility
//! - Compose validation rules and repository calls into one operation per
//!   user action.
//! - Resolve cross-collection references and cache their display names.
//! - Stay terminal-free: selection and confirmation steps arrive as caller
//!   supplied callbacks.
//!
//! # Invariants
//! - Each create/update/delete issues at most one write to the store.
//! - A declined confirmation or selection leaves the store untouched.

use crate::model::client::DependentCollection;
use crate::model::{parse_record_id, Entity, RecordId};
use crate::repo::RepoError;
use crate::validation::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod client_service;
pub mod contract_service;
pub mod deliverable_service;
pub mod finance_service;
pub mod project_service;
pub mod proposal_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Operation-level error reported back to the menu shell.
#[derive(Debug)]
pub enum ServiceError {
    /// Malformed or duplicate input.
    Validation(ValidationError),
    /// Identifier text is not a well-formed record id.
    InvalidId(String),
    /// Well-formed id with no matching record.
    NotFound { entity: Entity, id: RecordId },
    /// A text search used to pick an update target matched nothing.
    NoMatches { entity: Entity, query: String },
    /// Client delete blocked by a cached-name reference.
    HasDependents { collection: DependentCollection },
    NoClientsAvailable,
    NoContractsAvailable,
    NoProjectsAvailable,
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidId(value) => write!(f, "invalid id `{value}`"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::NoMatches { entity, query } => write!(f, "no {entity} matches `{query}`"),
            Self::HasDependents { collection } => write!(
                f,
                "client cannot be deleted: it still has records in `{collection}`"
            ),
            Self::NoClientsAvailable => write!(f, "no clients registered; create a client first"),
            Self::NoContractsAvailable => {
                write!(f, "no contracts registered; create a contract first")
            }
            Self::NoProjectsAvailable => write!(f, "no projects registered; create a project first"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Result of an operation gated by a selection or confirmation step.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The write happened; carries the affected record.
    Applied(T),
    /// The caller declined; nothing was written.
    Cancelled,
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Parses caller-supplied id text, mapping malformed input to `InvalidId`.
pub fn parse_id(value: &str) -> ServiceResult<RecordId> {
    parse_record_id(value).ok_or_else(|| ServiceError::InvalidId(value.trim().to_string()))
}

/// Unwraps a lookup, mapping `None` to `NotFound`.
pub(crate) fn require_found<T>(record: Option<T>, entity: Entity, id: RecordId) -> ServiceResult<T> {
    record.ok_or(ServiceError::NotFound { entity, id })
}
