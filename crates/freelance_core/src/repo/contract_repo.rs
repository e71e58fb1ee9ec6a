//! Contract repository contract and SQLite implementation.

use crate::model::contract::{Contract, ContractKind, ContractStatus};
use crate::model::{Entity, RecordId};
use crate::repo::{
    count_rows, date_to_db, ensure_changed, parse_date_column, parse_id_column,
    push_contains_filter, RepoError, RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const CONTRACT_SELECT_SQL: &str = "SELECT
    id,
    client_name,
    freelancer_name,
    project_name,
    kind,
    status,
    start_date,
    amount
FROM contracts";

/// AND-combined contract filters; `None` disables a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractListQuery {
    pub client_name_contains: Option<String>,
    pub freelancer_contains: Option<String>,
    pub status: Option<ContractStatus>,
    pub kind: Option<ContractKind>,
}

/// Repository interface for contract records.
pub trait ContractRepository {
    fn create_contract(&self, contract: &Contract) -> RepoResult<RecordId>;
    fn update_contract(&self, contract: &Contract) -> RepoResult<()>;
    fn get_contract(&self, id: RecordId) -> RepoResult<Option<Contract>>;
    fn list_contracts(&self, query: &ContractListQuery) -> RepoResult<Vec<Contract>>;
    fn count_contracts(&self) -> RepoResult<u64>;
    fn delete_contract(&self, id: RecordId) -> RepoResult<()>;
}

/// SQLite-backed contract repository.
#[derive(Clone, Copy)]
pub struct SqliteContractRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContractRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ContractRepository for SqliteContractRepository<'_> {
    fn create_contract(&self, contract: &Contract) -> RepoResult<RecordId> {
        contract.validate()?;

        self.conn.execute(
            "INSERT INTO contracts (
                id,
                client_name,
                freelancer_name,
                project_name,
                kind,
                status,
                start_date,
                amount
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                contract.id.to_string(),
                contract.client_name.as_str(),
                contract.freelancer_name.as_str(),
                contract.project_name.as_str(),
                contract.kind.as_str(),
                contract.status.as_str(),
                date_to_db(contract.start_date),
                contract.amount,
            ],
        )?;

        Ok(contract.id)
    }

    fn update_contract(&self, contract: &Contract) -> RepoResult<()> {
        contract.validate()?;

        let changed = self.conn.execute(
            "UPDATE contracts
             SET
                client_name = ?1,
                freelancer_name = ?2,
                project_name = ?3,
                kind = ?4,
                status = ?5,
                start_date = ?6,
                amount = ?7
             WHERE id = ?8;",
            params![
                contract.client_name.as_str(),
                contract.freelancer_name.as_str(),
                contract.project_name.as_str(),
                contract.kind.as_str(),
                contract.status.as_str(),
                date_to_db(contract.start_date),
                contract.amount,
                contract.id.to_string(),
            ],
        )?;

        ensure_changed(changed, Entity::Contract, contract.id)
    }

    fn get_contract(&self, id: RecordId) -> RepoResult<Option<Contract>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTRACT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_contract_row(row)?));
        }
        Ok(None)
    }

    fn list_contracts(&self, query: &ContractListQuery) -> RepoResult<Vec<Contract>> {
        let mut sql = format!("{CONTRACT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(needle) = query.client_name_contains.as_ref() {
            push_contains_filter(&mut sql, "client_name");
            bind_values.push(Value::Text(needle.clone()));
        }
        if let Some(needle) = query.freelancer_contains.as_ref() {
            push_contains_filter(&mut sql, "freelancer_name");
            bind_values.push(Value::Text(needle.clone()));
        }
        if let Some(status) = query.status {
            sql.push_str(" AND status = ?");
            bind_values.push(Value::Text(status.as_str().to_string()));
        }
        if let Some(kind) = query.kind {
            sql.push_str(" AND kind = ?");
            bind_values.push(Value::Text(kind.as_str().to_string()));
        }
        sql.push_str(" ORDER BY rowid ASC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut contracts = Vec::new();
        while let Some(row) = rows.next()? {
            contracts.push(parse_contract_row(row)?);
        }
        Ok(contracts)
    }

    fn count_contracts(&self) -> RepoResult<u64> {
        count_rows(self.conn, "contracts")
    }

    fn delete_contract(&self, id: RecordId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM contracts WHERE id = ?1;", [id.to_string()])?;
        ensure_changed(changed, Entity::Contract, id)
    }
}

fn parse_contract_row(row: &Row<'_>) -> RepoResult<Contract> {
    let id_text: String = row.get("id")?;
    let kind_text: String = row.get("kind")?;
    let kind = ContractKind::parse(&kind_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid contract type `{kind_text}` in contracts.kind"))
    })?;
    let status_text: String = row.get("status")?;
    let status = ContractStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid contract status `{status_text}` in contracts.status"
        ))
    })?;
    let start_date_text: String = row.get("start_date")?;

    Ok(Contract {
        id: parse_id_column(&id_text, "contracts.id")?,
        client_name: row.get("client_name")?,
        freelancer_name: row.get("freelancer_name")?,
        project_name: row.get("project_name")?,
        kind,
        status,
        start_date: parse_date_column(&start_date_text, "contracts.start_date")?,
        amount: row.get("amount")?,
    })
}
