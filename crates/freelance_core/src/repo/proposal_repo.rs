//! Proposal repository contract and SQLite implementation.

use crate::model::proposal::Proposal;
use crate::model::{Entity, RecordId};
use crate::repo::{
    date_to_db, ensure_changed, parse_id_column, parse_optional_date_column, RepoResult,
};
use rusqlite::{params, Connection, Row};

const PROPOSAL_SELECT_SQL: &str =
    "SELECT id, client_id, client_name, title, content, date FROM proposals";

/// Repository interface for proposal records.
pub trait ProposalRepository {
    fn create_proposal(&self, proposal: &Proposal) -> RepoResult<RecordId>;
    fn update_proposal(&self, proposal: &Proposal) -> RepoResult<()>;
    fn get_proposal(&self, id: RecordId) -> RepoResult<Option<Proposal>>;
    fn list_proposals(&self) -> RepoResult<Vec<Proposal>>;
    fn delete_proposal(&self, id: RecordId) -> RepoResult<()>;
}

/// SQLite-backed proposal repository.
#[derive(Clone, Copy)]
pub struct SqliteProposalRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProposalRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProposalRepository for SqliteProposalRepository<'_> {
    fn create_proposal(&self, proposal: &Proposal) -> RepoResult<RecordId> {
        proposal.validate()?;

        self.conn.execute(
            "INSERT INTO proposals (id, client_id, client_name, title, content, date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                proposal.id.to_string(),
                proposal.client_id.to_string(),
                proposal.client_name.as_str(),
                proposal.title.as_str(),
                proposal.content.as_str(),
                proposal.date.map(date_to_db),
            ],
        )?;

        Ok(proposal.id)
    }

    fn update_proposal(&self, proposal: &Proposal) -> RepoResult<()> {
        proposal.validate()?;

        let changed = self.conn.execute(
            "UPDATE proposals SET title = ?1, content = ?2, date = ?3 WHERE id = ?4;",
            params![
                proposal.title.as_str(),
                proposal.content.as_str(),
                proposal.date.map(date_to_db),
                proposal.id.to_string(),
            ],
        )?;

        ensure_changed(changed, Entity::Proposal, proposal.id)
    }

    fn get_proposal(&self, id: RecordId) -> RepoResult<Option<Proposal>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROPOSAL_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_proposal_row(row)?));
        }
        Ok(None)
    }

    fn list_proposals(&self) -> RepoResult<Vec<Proposal>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROPOSAL_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut proposals = Vec::new();
        while let Some(row) = rows.next()? {
            proposals.push(parse_proposal_row(row)?);
        }
        Ok(proposals)
    }

    fn delete_proposal(&self, id: RecordId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM proposals WHERE id = ?1;", [id.to_string()])?;
        ensure_changed(changed, Entity::Proposal, id)
    }
}

fn parse_proposal_row(row: &Row<'_>) -> RepoResult<Proposal> {
    let id_text: String = row.get("id")?;
    let client_id_text: String = row.get("client_id")?;

    Ok(Proposal {
        id: parse_id_column(&id_text, "proposals.id")?,
        client_id: parse_id_column(&client_id_text, "proposals.client_id")?,
        client_name: row.get("client_name")?,
        title: row.get("title")?,
        content: row.get("content")?,
        date: parse_optional_date_column(row.get("date")?, "proposals.date")?,
    })
}
