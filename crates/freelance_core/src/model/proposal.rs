//! Proposal domain model.

use crate::model::{new_record_id, RecordId};
use crate::validation::{require, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Proposal sent to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: RecordId,
    pub client_id: RecordId,
    /// Client name cached at creation.
    pub client_name: String,
    pub title: String,
    /// Free-form, possibly multi-line body.
    pub content: String,
    pub date: Option<NaiveDate>,
}

/// Form input for creating or replacing a proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalDraft {
    pub title: String,
    pub content: String,
    pub date: Option<NaiveDate>,
}

impl Proposal {
    pub fn from_draft(
        client_id: RecordId,
        client_name: impl Into<String>,
        draft: ProposalDraft,
    ) -> Self {
        Self {
            id: new_record_id(),
            client_id,
            client_name: client_name.into(),
            title: draft.title,
            content: draft.content,
            date: draft.date,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)
    }

    pub fn replace(&mut self, draft: ProposalDraft) {
        self.title = draft.title;
        self.content = draft.content;
        self.date = draft.date;
    }
}
