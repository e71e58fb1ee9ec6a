//! Deliverable domain model.
//!
//! # Invariants
//! - `project_title` and `client_name` are cached at creation time.
//! - Updates replace title, description and due date together.

use crate::model::{new_record_id, RecordId};
use crate::validation::{require, ValidationError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Deliverable record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deliverable {
    pub id: RecordId,
    pub project_id: RecordId,
    pub project_title: String,
    /// Client reached through project and contract when the deliverable
    /// was created. `None` when that chain was already broken.
    pub client_name: Option<String>,
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Form input for creating or replacing a deliverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliverableDraft {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
}

impl Deliverable {
    pub fn from_draft(
        project_id: RecordId,
        project_title: impl Into<String>,
        client_name: Option<String>,
        draft: DeliverableDraft,
    ) -> Self {
        Self {
            id: new_record_id(),
            project_id,
            project_title: project_title.into(),
            client_name,
            title: draft.title,
            description: draft.description,
            due_date: draft.due_date,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)
    }

    /// Overwrites every editable field, including clearing the due date.
    pub fn replace(&mut self, draft: DeliverableDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.due_date = draft.due_date;
    }
}
