//! Project use-case service.
//!
//! # Invariants
//! - A project is only created under an existing contract, caching its title.
//! - Updates skip blank fields; deletion has no confirmation step.

use crate::model::contract::Contract;
use crate::model::project::{Project, ProjectDraft, ProjectPatch, ProjectSearch};
use crate::model::{Entity, RecordId};
use crate::repo::contract_repo::{ContractListQuery, ContractRepository};
use crate::repo::project_repo::{ProjectListQuery, ProjectRepository};
use crate::service::{parse_id, require_found, ServiceError, ServiceResult};
use log::info;

/// Use-case service for projects.
pub struct ProjectService<R: ProjectRepository, C: ContractRepository> {
    repo: R,
    contracts: C,
}

impl<R: ProjectRepository, C: ContractRepository> ProjectService<R, C> {
    pub fn new(repo: R, contracts: C) -> Self {
        Self { repo, contracts }
    }

    /// Contracts a new project can belong to.
    ///
    /// # Errors
    /// - `NoContractsAvailable` when the contract collection is empty.
    pub fn available_contracts(&self) -> ServiceResult<Vec<Contract>> {
        let contracts = self
            .contracts
            .list_contracts(&ContractListQuery::default())?;
        if contracts.is_empty() {
            return Err(ServiceError::NoContractsAvailable);
        }
        Ok(contracts)
    }

    pub fn create_project(&self, contract_id: &str, draft: ProjectDraft) -> ServiceResult<RecordId> {
        if self.contracts.count_contracts()? == 0 {
            return Err(ServiceError::NoContractsAvailable);
        }
        let contract_id = parse_id(contract_id)?;
        let contract = require_found(
            self.contracts.get_contract(contract_id)?,
            Entity::Contract,
            contract_id,
        )?;

        let project = Project::from_draft(contract.id, contract.title(), draft);
        let id = self.repo.create_project(&project)?;

        info!("event=project_create module=service status=ok id={id} contract_id={contract_id}");
        Ok(id)
    }

    pub fn get_project(&self, id: &str) -> ServiceResult<Project> {
        let id = parse_id(id)?;
        require_found(self.repo.get_project(id)?, Entity::Project, id)
    }

    pub fn list_projects(&self) -> ServiceResult<Vec<Project>> {
        Ok(self.repo.list_projects(&ProjectListQuery::default())?)
    }

    /// AND-combines the given filters; blank text filters are ignored.
    pub fn search_projects(&self, search: &ProjectSearch) -> ServiceResult<Vec<Project>> {
        let query = ProjectListQuery {
            title_contains: non_blank(search.title.as_deref()),
            status: search.status,
            client_name_contains: non_blank(search.client_name.as_deref()),
        };
        Ok(self.repo.list_projects(&query)?)
    }

    /// Applies the non-blank fields of `patch` and returns the stored project.
    pub fn update_project(&self, id: &str, patch: ProjectPatch) -> ServiceResult<Project> {
        let mut project = self.get_project(id)?;
        if patch.is_empty() {
            return Ok(project);
        }

        patch.apply_to(&mut project);
        self.repo.update_project(&project)?;

        info!("event=project_update module=service status=ok id={}", project.id);
        Ok(project)
    }

    /// Deletes a project immediately; deliverables keep their cached title.
    pub fn delete_project(&self, id: &str) -> ServiceResult<Project> {
        let project = self.get_project(id)?;
        self.repo.delete_project(project.id)?;

        info!("event=project_delete module=service status=ok id={}", project.id);
        Ok(project)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
