//! Project domain model.
//!
//! # Invariants
//! - `contract_title` is the referenced contract's title at creation time.
//! - Patches skip omitted or blank fields.

use crate::model::{new_record_id, RecordId};
use crate::validation::{require, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Project lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Active,
    InProgress,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        Self::Active,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Project record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: RecordId,
    pub contract_id: RecordId,
    /// Contract title cached at creation.
    pub contract_title: String,
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
}

/// Form input for a new project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
}

impl Project {
    pub fn from_draft(
        contract_id: RecordId,
        contract_title: impl Into<String>,
        draft: ProjectDraft,
    ) -> Self {
        Self {
            id: new_record_id(),
            contract_id,
            contract_title: contract_title.into(),
            title: draft.title,
            description: draft.description,
            status: draft.status,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)
    }
}

/// Partial update; `None` and blank strings keep the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
}

impl ProjectPatch {
    /// Applies non-empty fields onto `project`.
    pub fn apply_to(self, project: &mut Project) {
        if let Some(title) = non_blank(self.title) {
            project.title = title;
        }
        if let Some(description) = non_blank(self.description) {
            project.description = description;
        }
        if let Some(status) = self.status {
            project.status = status;
        }
    }

    pub fn is_empty(&self) -> bool {
        non_blank(self.title.clone()).is_none()
            && non_blank(self.description.clone()).is_none()
            && self.status.is_none()
    }
}

/// AND-combined project filters; `None` disables a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectSearch {
    /// Substring of the client name cached on the referenced contract.
    pub client_name: Option<String>,
    pub status: Option<ProjectStatus>,
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
