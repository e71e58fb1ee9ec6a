//! Financial movement repository contract and SQLite implementation.
//!
//! # Invariants
//! - Dates are stored as `YYYY-MM-DD` text, so range filters compare
//!   lexicographically in calendar order.
//! - Lists are ordered by date, then insertion order.

use crate::model::finance::{DateRange, FinancialMovement, MovementKind};
use crate::model::{Entity, RecordId};
use crate::repo::{
    date_to_db, ensure_changed, parse_date_column, parse_id_column, RepoError, RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const MOVEMENT_SELECT_SQL: &str =
    "SELECT id, kind, description, amount, date, client_name FROM financial_movements";

/// Filters for listing movements; `None` disables a filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementListQuery {
    pub kind: Option<MovementKind>,
    /// Half-open `[start, end)` range on `date`.
    pub range: Option<DateRange>,
}

/// Repository interface for financial movements.
pub trait FinanceRepository {
    fn create_movement(&self, movement: &FinancialMovement) -> RepoResult<RecordId>;
    fn update_movement(&self, movement: &FinancialMovement) -> RepoResult<()>;
    fn get_movement(&self, id: RecordId) -> RepoResult<Option<FinancialMovement>>;
    fn list_movements(&self, query: &MovementListQuery) -> RepoResult<Vec<FinancialMovement>>;
    fn delete_movement(&self, id: RecordId) -> RepoResult<()>;
}

/// SQLite-backed financial movement repository.
#[derive(Clone, Copy)]
pub struct SqliteFinanceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFinanceRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl FinanceRepository for SqliteFinanceRepository<'_> {
    fn create_movement(&self, movement: &FinancialMovement) -> RepoResult<RecordId> {
        movement.validate()?;

        self.conn.execute(
            "INSERT INTO financial_movements (id, kind, description, amount, date, client_name)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                movement.id.to_string(),
                movement.kind.as_str(),
                movement.description.as_str(),
                movement.amount,
                date_to_db(movement.date),
                movement.client_name.as_deref(),
            ],
        )?;

        Ok(movement.id)
    }

    fn update_movement(&self, movement: &FinancialMovement) -> RepoResult<()> {
        movement.validate()?;

        let changed = self.conn.execute(
            "UPDATE financial_movements
             SET kind = ?1, description = ?2, amount = ?3, date = ?4, client_name = ?5
             WHERE id = ?6;",
            params![
                movement.kind.as_str(),
                movement.description.as_str(),
                movement.amount,
                date_to_db(movement.date),
                movement.client_name.as_deref(),
                movement.id.to_string(),
            ],
        )?;

        ensure_changed(changed, Entity::FinancialMovement, movement.id)
    }

    fn get_movement(&self, id: RecordId) -> RepoResult<Option<FinancialMovement>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MOVEMENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_movement_row(row)?));
        }
        Ok(None)
    }

    fn list_movements(&self, query: &MovementListQuery) -> RepoResult<Vec<FinancialMovement>> {
        let mut sql = format!("{MOVEMENT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(kind) = query.kind {
            sql.push_str(" AND kind = ?");
            bind_values.push(Value::Text(kind.as_str().to_string()));
        }
        if let Some(range) = query.range {
            sql.push_str(" AND date >= ? AND date < ?");
            bind_values.push(Value::Text(date_to_db(range.start)));
            bind_values.push(Value::Text(date_to_db(range.end)));
        }
        sql.push_str(" ORDER BY date ASC, rowid ASC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut movements = Vec::new();
        while let Some(row) = rows.next()? {
            movements.push(parse_movement_row(row)?);
        }
        Ok(movements)
    }

    fn delete_movement(&self, id: RecordId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM financial_movements WHERE id = ?1;",
            [id.to_string()],
        )?;
        ensure_changed(changed, Entity::FinancialMovement, id)
    }
}

fn parse_movement_row(row: &Row<'_>) -> RepoResult<FinancialMovement> {
    let id_text: String = row.get("id")?;
    let kind_text: String = row.get("kind")?;
    let kind = MovementKind::parse(&kind_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid movement type `{kind_text}` in financial_movements.kind"
        ))
    })?;
    let date_text: String = row.get("date")?;

    Ok(FinancialMovement {
        id: parse_id_column(&id_text, "financial_movements.id")?,
        kind,
        description: row.get("description")?,
        amount: row.get("amount")?,
        date: parse_date_column(&date_text, "financial_movements.date")?,
        client_name: row.get("client_name")?,
    })
}
