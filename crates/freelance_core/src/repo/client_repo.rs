//! Client repository contract and SQLite implementation.
//!
//! # Responsibility
//! - CRUD over the `clients` table.
//! - Scan dependent collections for cached client names.
//!
//! # Invariants
//! - Name lookups are exact and case-sensitive; searches are substring and
//!   case-insensitive.
//! - Lists are ordered by name.

use crate::model::client::{Client, DependentCollection};
use crate::model::{Entity, RecordId};
use crate::repo::{
    count_rows, ensure_changed, parse_id_column, push_contains_filter, RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const CLIENT_SELECT_SQL: &str = "SELECT id, name, email, phone FROM clients";

/// Substring filters for listing clients; `None` disables a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientListQuery {
    pub name_contains: Option<String>,
    pub email_contains: Option<String>,
}

/// Repository interface for client records.
pub trait ClientRepository {
    fn create_client(&self, client: &Client) -> RepoResult<RecordId>;
    /// Overwrites every stored field of `client`.
    fn update_client(&self, client: &Client) -> RepoResult<()>;
    fn get_client(&self, id: RecordId) -> RepoResult<Option<Client>>;
    /// Exact, case-sensitive name match.
    fn find_client_by_name(&self, name: &str) -> RepoResult<Option<Client>>;
    fn list_clients(&self, query: &ClientListQuery) -> RepoResult<Vec<Client>>;
    fn count_clients(&self) -> RepoResult<u64>;
    fn delete_client(&self, id: RecordId) -> RepoResult<()>;
    /// Returns the first collection (in [`DependentCollection::ALL`] order)
    /// holding a record whose cached client name equals `client_name`.
    fn find_dependent_collection(
        &self,
        client_name: &str,
    ) -> RepoResult<Option<DependentCollection>>;
}

/// SQLite-backed client repository.
#[derive(Clone, Copy)]
pub struct SqliteClientRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteClientRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ClientRepository for SqliteClientRepository<'_> {
    fn create_client(&self, client: &Client) -> RepoResult<RecordId> {
        client.validate()?;

        self.conn.execute(
            "INSERT INTO clients (id, name, email, phone) VALUES (?1, ?2, ?3, ?4);",
            params![
                client.id.to_string(),
                client.name.as_str(),
                client.email.as_str(),
                client.phone.as_str(),
            ],
        )?;

        Ok(client.id)
    }

    fn update_client(&self, client: &Client) -> RepoResult<()> {
        client.validate()?;

        let changed = self.conn.execute(
            "UPDATE clients SET name = ?1, email = ?2, phone = ?3 WHERE id = ?4;",
            params![
                client.name.as_str(),
                client.email.as_str(),
                client.phone.as_str(),
                client.id.to_string(),
            ],
        )?;

        ensure_changed(changed, Entity::Client, client.id)
    }

    fn get_client(&self, id: RecordId) -> RepoResult<Option<Client>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CLIENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_client_row(row)?));
        }
        Ok(None)
    }

    fn find_client_by_name(&self, name: &str) -> RepoResult<Option<Client>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CLIENT_SELECT_SQL} WHERE name = ?1;"))?;
        let mut rows = stmt.query([name])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_client_row(row)?));
        }
        Ok(None)
    }

    fn list_clients(&self, query: &ClientListQuery) -> RepoResult<Vec<Client>> {
        let mut sql = format!("{CLIENT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(needle) = query.name_contains.as_ref() {
            push_contains_filter(&mut sql, "name");
            bind_values.push(Value::Text(needle.clone()));
        }
        if let Some(needle) = query.email_contains.as_ref() {
            push_contains_filter(&mut sql, "email");
            bind_values.push(Value::Text(needle.clone()));
        }
        sql.push_str(" ORDER BY name ASC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut clients = Vec::new();
        while let Some(row) = rows.next()? {
            clients.push(parse_client_row(row)?);
        }
        Ok(clients)
    }

    fn count_clients(&self) -> RepoResult<u64> {
        count_rows(self.conn, "clients")
    }

    fn delete_client(&self, id: RecordId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM clients WHERE id = ?1;", [id.to_string()])?;
        ensure_changed(changed, Entity::Client, id)
    }

    fn find_dependent_collection(
        &self,
        client_name: &str,
    ) -> RepoResult<Option<DependentCollection>> {
        for collection in DependentCollection::ALL {
            let referenced: i64 = self.conn.query_row(
                &format!(
                    "SELECT EXISTS(SELECT 1 FROM {} WHERE client_name = ?1);",
                    collection.table_name()
                ),
                [client_name],
                |row| row.get(0),
            )?;
            if referenced == 1 {
                return Ok(Some(collection));
            }
        }
        Ok(None)
    }
}

fn parse_client_row(row: &Row<'_>) -> RepoResult<Client> {
    let id_text: String = row.get("id")?;
    let client = Client {
        id: parse_id_column(&id_text, "clients.id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
    };
    Ok(client)
}
