//! Deliverable repository contract and SQLite implementation.

use crate::model::deliverable::Deliverable;
use crate::model::{Entity, RecordId};
use crate::repo::{
    date_to_db, ensure_changed, parse_id_column, parse_optional_date_column,
    parse_timestamp_column, timestamp_to_db, RepoResult,
};
use rusqlite::{params, Connection, Row};

const DELIVERABLE_SELECT_SQL: &str = "SELECT
    id,
    project_id,
    project_title,
    client_name,
    title,
    description,
    due_date,
    created_at
FROM deliverables";

/// Repository interface for deliverable records.
pub trait DeliverableRepository {
    fn create_deliverable(&self, deliverable: &Deliverable) -> RepoResult<RecordId>;
    fn update_deliverable(&self, deliverable: &Deliverable) -> RepoResult<()>;
    fn get_deliverable(&self, id: RecordId) -> RepoResult<Option<Deliverable>>;
    fn list_deliverables(&self) -> RepoResult<Vec<Deliverable>>;
    fn delete_deliverable(&self, id: RecordId) -> RepoResult<()>;
}

/// SQLite-backed deliverable repository.
#[derive(Clone, Copy)]
pub struct SqliteDeliverableRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDeliverableRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DeliverableRepository for SqliteDeliverableRepository<'_> {
    fn create_deliverable(&self, deliverable: &Deliverable) -> RepoResult<RecordId> {
        deliverable.validate()?;

        self.conn.execute(
            "INSERT INTO deliverables (
                id,
                project_id,
                project_title,
                client_name,
                title,
                description,
                due_date,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                deliverable.id.to_string(),
                deliverable.project_id.to_string(),
                deliverable.project_title.as_str(),
                deliverable.client_name.as_deref(),
                deliverable.title.as_str(),
                deliverable.description.as_str(),
                deliverable.due_date.map(date_to_db),
                timestamp_to_db(deliverable.created_at),
            ],
        )?;

        Ok(deliverable.id)
    }

    fn update_deliverable(&self, deliverable: &Deliverable) -> RepoResult<()> {
        deliverable.validate()?;

        let changed = self.conn.execute(
            "UPDATE deliverables
             SET title = ?1, description = ?2, due_date = ?3
             WHERE id = ?4;",
            params![
                deliverable.title.as_str(),
                deliverable.description.as_str(),
                deliverable.due_date.map(date_to_db),
                deliverable.id.to_string(),
            ],
        )?;

        ensure_changed(changed, Entity::Deliverable, deliverable.id)
    }

    fn get_deliverable(&self, id: RecordId) -> RepoResult<Option<Deliverable>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DELIVERABLE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_deliverable_row(row)?));
        }
        Ok(None)
    }

    fn list_deliverables(&self) -> RepoResult<Vec<Deliverable>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DELIVERABLE_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut deliverables = Vec::new();
        while let Some(row) = rows.next()? {
            deliverables.push(parse_deliverable_row(row)?);
        }
        Ok(deliverables)
    }

    fn delete_deliverable(&self, id: RecordId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM deliverables WHERE id = ?1;", [id.to_string()])?;
        ensure_changed(changed, Entity::Deliverable, id)
    }
}

fn parse_deliverable_row(row: &Row<'_>) -> RepoResult<Deliverable> {
    let id_text: String = row.get("id")?;
    let project_id_text: String = row.get("project_id")?;

    Ok(Deliverable {
        id: parse_id_column(&id_text, "deliverables.id")?,
        project_id: parse_id_column(&project_id_text, "deliverables.project_id")?,
        project_title: row.get("project_title")?,
        client_name: row.get("client_name")?,
        title: row.get("title")?,
        description: row.get("description")?,
        due_date: parse_optional_date_column(row.get("due_date")?, "deliverables.due_date")?,
        created_at: parse_timestamp_column(row.get("created_at")?, "deliverables.created_at")?,
    })
}
