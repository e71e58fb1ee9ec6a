//! Project repository contract and SQLite implementation.
//!
//! # Invariants
//! - The client-name filter matches through the referenced contract's
//!   cached client name; projects whose contract is gone never match it.

use crate::model::project::{Project, ProjectStatus};
use crate::model::{Entity, RecordId};
use crate::repo::{
    count_rows, ensure_changed, parse_id_column, parse_timestamp_column, push_contains_filter,
    timestamp_to_db, RepoError, RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    contract_id,
    contract_title,
    title,
    description,
    status,
    created_at
FROM projects";

/// AND-combined project filters; `None` disables a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectListQuery {
    pub title_contains: Option<String>,
    pub status: Option<ProjectStatus>,
    pub client_name_contains: Option<String>,
}

/// Repository interface for project records.
pub trait ProjectRepository {
    fn create_project(&self, project: &Project) -> RepoResult<RecordId>;
    fn update_project(&self, project: &Project) -> RepoResult<()>;
    fn get_project(&self, id: RecordId) -> RepoResult<Option<Project>>;
    fn list_projects(&self, query: &ProjectListQuery) -> RepoResult<Vec<Project>>;
    fn count_projects(&self) -> RepoResult<u64>;
    fn delete_project(&self, id: RecordId) -> RepoResult<()>;
}

/// SQLite-backed project repository.
#[derive(Clone, Copy)]
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn create_project(&self, project: &Project) -> RepoResult<RecordId> {
        project.validate()?;

        self.conn.execute(
            "INSERT INTO projects (
                id,
                contract_id,
                contract_title,
                title,
                description,
                status,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                project.id.to_string(),
                project.contract_id.to_string(),
                project.contract_title.as_str(),
                project.title.as_str(),
                project.description.as_str(),
                project.status.as_str(),
                timestamp_to_db(project.created_at),
            ],
        )?;

        Ok(project.id)
    }

    fn update_project(&self, project: &Project) -> RepoResult<()> {
        project.validate()?;

        let changed = self.conn.execute(
            "UPDATE projects
             SET title = ?1, description = ?2, status = ?3
             WHERE id = ?4;",
            params![
                project.title.as_str(),
                project.description.as_str(),
                project.status.as_str(),
                project.id.to_string(),
            ],
        )?;

        ensure_changed(changed, Entity::Project, project.id)
    }

    fn get_project(&self, id: RecordId) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }
        Ok(None)
    }

    fn list_projects(&self, query: &ProjectListQuery) -> RepoResult<Vec<Project>> {
        let mut sql = format!("{PROJECT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(needle) = query.title_contains.as_ref() {
            push_contains_filter(&mut sql, "title");
            bind_values.push(Value::Text(needle.clone()));
        }
        if let Some(status) = query.status {
            sql.push_str(" AND status = ?");
            bind_values.push(Value::Text(status.as_str().to_string()));
        }
        if let Some(needle) = query.client_name_contains.as_ref() {
            sql.push_str(
                " AND contract_id IN (
                    SELECT c.id
                    FROM contracts c
                    WHERE instr(fold(c.client_name), fold(?)) > 0
                )",
            );
            bind_values.push(Value::Text(needle.clone()));
        }
        sql.push_str(" ORDER BY rowid ASC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }
        Ok(projects)
    }

    fn count_projects(&self) -> RepoResult<u64> {
        count_rows(self.conn, "projects")
    }

    fn delete_project(&self, id: RecordId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM projects WHERE id = ?1;", [id.to_string()])?;
        ensure_changed(changed, Entity::Project, id)
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let id_text: String = row.get("id")?;
    let contract_id_text: String = row.get("contract_id")?;
    let status_text: String = row.get("status")?;
    let status = ProjectStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid project status `{status_text}` in projects.status"
        ))
    })?;

    Ok(Project {
        id: parse_id_column(&id_text, "projects.id")?,
        contract_id: parse_id_column(&contract_id_text, "projects.contract_id")?,
        contract_title: row.get("contract_title")?,
        title: row.get("title")?,
        description: row.get("description")?,
        status,
        created_at: parse_timestamp_column(row.get("created_at")?, "projects.created_at")?,
    })
}
