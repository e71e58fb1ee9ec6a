//! Deliverable use-case service.

use crate::model::deliverable::{Deliverable, DeliverableDraft};
use crate::model::project::Project;
use crate::model::{Entity, RecordId};
use crate::repo::contract_repo::ContractRepository;
use crate::repo::deliverable_repo::DeliverableRepository;
use crate::repo::project_repo::{ProjectListQuery, ProjectRepository};
use crate::service::{parse_id, require_found, ServiceError, ServiceResult};
use log::info;

/// Use-case service for deliverables.
///
/// Reads contracts only to cache the client name reached through the
/// deliverable's project.
pub struct DeliverableService<R, P, C>
where
    R: DeliverableRepository,
    P: ProjectRepository,
    C: ContractRepository,
{
    repo: R,
    projects: P,
    contracts: C,
}

impl<R, P, C> DeliverableService<R, P, C>
where
    R: DeliverableRepository,
    P: ProjectRepository,
    C: ContractRepository,
{
    pub fn new(repo: R, projects: P, contracts: C) -> Self {
        Self {
            repo,
            projects,
            contracts,
        }
    }

    /// Projects a new deliverable can belong to.
    ///
    /// # Errors
    /// - `NoProjectsAvailable` when the project collection is empty.
    pub fn available_projects(&self) -> ServiceResult<Vec<Project>> {
        let projects = self.projects.list_projects(&ProjectListQuery::default())?;
        if projects.is_empty() {
            return Err(ServiceError::NoProjectsAvailable);
        }
        Ok(projects)
    }

    /// Creates a deliverable under `project_id`, caching the project title
    /// and, when the project's contract still exists, its client name.
    pub fn create_deliverable(
        &self,
        project_id: &str,
        draft: DeliverableDraft,
    ) -> ServiceResult<RecordId> {
        if self.projects.count_projects()? == 0 {
            return Err(ServiceError::NoProjectsAvailable);
        }
        let project_id = parse_id(project_id)?;
        let project = require_found(
            self.projects.get_project(project_id)?,
            Entity::Project,
            project_id,
        )?;
        let client_name = self
            .contracts
            .get_contract(project.contract_id)?
            .map(|contract| contract.client_name);

        let deliverable = Deliverable::from_draft(project.id, project.title, client_name, draft);
        let id = self.repo.create_deliverable(&deliverable)?;

        info!(
            "event=deliverable_create module=service status=ok id={id} project_id={project_id}"
        );
        Ok(id)
    }

    pub fn get_deliverable(&self, id: &str) -> ServiceResult<Deliverable> {
        let id = parse_id(id)?;
        require_found(self.repo.get_deliverable(id)?, Entity::Deliverable, id)
    }

    pub fn list_deliverables(&self) -> ServiceResult<Vec<Deliverable>> {
        Ok(self.repo.list_deliverables()?)
    }

    /// Overwrites title, description and due date; a `None` due date clears it.
    pub fn update_deliverable(
        &self,
        id: &str,
        replacement: DeliverableDraft,
    ) -> ServiceResult<Deliverable> {
        let mut deliverable = self.get_deliverable(id)?;
        deliverable.replace(replacement);
        self.repo.update_deliverable(&deliverable)?;

        info!(
            "event=deliverable_update module=service status=ok id={}",
            deliverable.id
        );
        Ok(deliverable)
    }

    pub fn delete_deliverable(&self, id: &str) -> ServiceResult<Deliverable> {
        let deliverable = self.get_deliverable(id)?;
        self.repo.delete_deliverable(deliverable.id)?;

        info!(
            "event=deliverable_delete module=service status=ok id={}",
            deliverable.id
        );
        Ok(deliverable)
    }
}
