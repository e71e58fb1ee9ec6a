//! Financial movement use-case service.
//!
//! # Responsibility
//! - Record, filter, replace and delete income/expense movements.
//! - Aggregate movements over a calendar period into a [`Balance`].
//!
//! # Invariants
//! - Amounts are non-negative; the movement type carries the sign.
//! - A named client must exist when the movement is created.

use crate::model::finance::{Balance, DateRange, FinancialMovement, MovementDraft, MovementKind};
use crate::model::{Entity, RecordId};
use crate::repo::client_repo::ClientRepository;
use crate::repo::finance_repo::{FinanceRepository, MovementListQuery};
use crate::service::{parse_id, require_found, ServiceResult};
use crate::validation::validate_amount;
use log::{debug, info};

/// Use-case service for financial movements.
pub struct FinanceService<R: FinanceRepository, C: ClientRepository> {
    repo: R,
    clients: C,
}

impl<R: FinanceRepository, C: ClientRepository> FinanceService<R, C> {
    pub fn new(repo: R, clients: C) -> Self {
        Self { repo, clients }
    }

    /// Records a movement, optionally tagged with an existing client.
    ///
    /// # Errors
    /// - `Validation` for a negative or non-finite amount.
    /// - `InvalidId`/`NotFound` when `client_id` is given but unusable.
    pub fn create_movement(
        &self,
        draft: MovementDraft,
        client_id: Option<&str>,
    ) -> ServiceResult<RecordId> {
        validate_amount(draft.amount)?;

        let client_name = match client_id {
            Some(raw) => {
                let client_id = parse_id(raw)?;
                let client =
                    require_found(self.clients.get_client(client_id)?, Entity::Client, client_id)?;
                Some(client.name)
            }
            None => None,
        };

        let movement = FinancialMovement::from_draft(draft, client_name);
        let id = self.repo.create_movement(&movement)?;

        info!(
            "event=movement_create module=service status=ok id={id} kind={}",
            movement.kind
        );
        Ok(id)
    }

    pub fn get_movement(&self, id: &str) -> ServiceResult<FinancialMovement> {
        let id = parse_id(id)?;
        require_found(self.repo.get_movement(id)?, Entity::FinancialMovement, id)
    }

    /// All movements ordered by date.
    pub fn list_movements(&self) -> ServiceResult<Vec<FinancialMovement>> {
        Ok(self.repo.list_movements(&MovementListQuery::default())?)
    }

    /// Movements of `kind` (any when `None`) inside the period named by
    /// `month`/`year`. See [`DateRange::for_period`] for how a partial
    /// period resolves.
    pub fn filter_movements(
        &self,
        kind: Option<MovementKind>,
        month: Option<u32>,
        year: Option<i32>,
    ) -> ServiceResult<Vec<FinancialMovement>> {
        let range = DateRange::for_period(year, month)?;
        let movements = self.repo.list_movements(&MovementListQuery { kind, range })?;

        debug!(
            "event=movement_filter module=service status=ok count={}",
            movements.len()
        );
        Ok(movements)
    }

    /// Income, expense and net balance for `year`, or one month of it.
    pub fn balance(&self, year: i32, month: Option<u32>) -> ServiceResult<Balance> {
        let range = DateRange::for_period(Some(year), month)?;
        let movements = self.repo.list_movements(&MovementListQuery { kind: None, range })?;
        Ok(Balance::from_movements(&movements))
    }

    /// Replaces type, description, amount and date.
    pub fn update_movement(
        &self,
        id: &str,
        replacement: MovementDraft,
    ) -> ServiceResult<FinancialMovement> {
        validate_amount(replacement.amount)?;

        let mut movement = self.get_movement(id)?;
        movement.replace(replacement);
        self.repo.update_movement(&movement)?;

        info!(
            "event=movement_update module=service status=ok id={}",
            movement.id
        );
        Ok(movement)
    }

    pub fn delete_movement(&self, id: &str) -> ServiceResult<FinancialMovement> {
        let movement = self.get_movement(id)?;
        self.repo.delete_movement(movement.id)?;

        info!(
            "event=movement_delete module=service status=ok id={}",
            movement.id
        );
        Ok(movement)
    }
}
