//! Contract use-case service.
//!
//! # Invariants
//! - A contract is only created for a client that exists at that moment.
//! - The client name is copied onto the contract and never re-synced.

use crate::model::client::Client;
use crate::model::contract::{Contract, ContractChange, ContractCriterion, ContractDraft};
use crate::model::Entity;
use crate::model::RecordId;
use crate::repo::client_repo::{ClientListQuery, ClientRepository};
use crate::repo::contract_repo::{ContractListQuery, ContractRepository};
use crate::service::{parse_id, require_found, Outcome, ServiceError, ServiceResult};
use log::info;

/// Use-case service for contracts.
pub struct ContractService<R: ContractRepository, C: ClientRepository> {
    repo: R,
    clients: C,
}

impl<R: ContractRepository, C: ClientRepository> ContractService<R, C> {
    pub fn new(repo: R, clients: C) -> Self {
        Self { repo, clients }
    }

    /// Clients a new contract can be attached to.
    ///
    /// # Errors
    /// - `NoClientsAvailable` when the client collection is empty.
    pub fn available_clients(&self) -> ServiceResult<Vec<Client>> {
        let clients = self.clients.list_clients(&ClientListQuery::default())?;
        if clients.is_empty() {
            return Err(ServiceError::NoClientsAvailable);
        }
        Ok(clients)
    }

    /// Creates a contract for the client identified by `client_id`.
    pub fn create_contract(&self, client_id: &str, draft: ContractDraft) -> ServiceResult<RecordId> {
        if self.clients.count_clients()? == 0 {
            return Err(ServiceError::NoClientsAvailable);
        }
        let client_id = parse_id(client_id)?;
        let client = require_found(self.clients.get_client(client_id)?, Entity::Client, client_id)?;

        let contract = Contract::from_draft(client.name, draft);
        let id = self.repo.create_contract(&contract)?;

        info!("event=contract_create module=service status=ok id={id} client_id={client_id}");
        Ok(id)
    }

    pub fn get_contract(&self, id: &str) -> ServiceResult<Contract> {
        let id = parse_id(id)?;
        require_found(self.repo.get_contract(id)?, Entity::Contract, id)
    }

    pub fn list_contracts(&self) -> ServiceResult<Vec<Contract>> {
        Ok(self.repo.list_contracts(&ContractListQuery::default())?)
    }

    /// Text criteria match case-insensitive substrings; status and type
    /// match exactly.
    pub fn search_contracts(&self, criterion: ContractCriterion) -> ServiceResult<Vec<Contract>> {
        let query = match criterion {
            ContractCriterion::ClientName(needle) => ContractListQuery {
                client_name_contains: Some(needle),
                ..ContractListQuery::default()
            },
            ContractCriterion::FreelancerName(needle) => ContractListQuery {
                freelancer_contains: Some(needle),
                ..ContractListQuery::default()
            },
            ContractCriterion::Status(status) => ContractListQuery {
                status: Some(status),
                ..ContractListQuery::default()
            },
            ContractCriterion::Kind(kind) => ContractListQuery {
                kind: Some(kind),
                ..ContractListQuery::default()
            },
        };
        Ok(self.repo.list_contracts(&query)?)
    }

    /// Replaces one field of an existing contract and returns the result.
    pub fn update_contract(&self, id: &str, change: ContractChange) -> ServiceResult<Contract> {
        let mut contract = self.get_contract(id)?;
        contract.apply(change);
        self.repo.update_contract(&contract)?;

        info!(
            "event=contract_update module=service status=ok id={}",
            contract.id
        );
        Ok(contract)
    }

    /// Deletes a contract once `confirm` accepts it.
    ///
    /// Projects keep their cached contract title after the contract is gone.
    pub fn delete_contract(
        &self,
        id: &str,
        confirm: impl FnOnce(&Contract) -> bool,
    ) -> ServiceResult<Outcome<Contract>> {
        let contract = self.get_contract(id)?;
        if !confirm(&contract) {
            return Ok(Outcome::Cancelled);
        }

        self.repo.delete_contract(contract.id)?;
        info!(
            "event=contract_delete module=service status=ok id={}",
            contract.id
        );
        Ok(Outcome::Applied(contract))
    }
}
