//! Proposal use-case service.

use crate::model::client::Client;
use crate::model::proposal::{Proposal, ProposalDraft};
use crate::model::{Entity, RecordId};
use crate::repo::client_repo::{ClientListQuery, ClientRepository};
use crate::repo::proposal_repo::ProposalRepository;
use crate::service::{parse_id, require_found, Outcome, ServiceError, ServiceResult};
use log::info;

/// Use-case service for proposals.
pub struct ProposalService<R: ProposalRepository, C: ClientRepository> {
    repo: R,
    clients: C,
}

impl<R: ProposalRepository, C: ClientRepository> ProposalService<R, C> {
    pub fn new(repo: R, clients: C) -> Self {
        Self { repo, clients }
    }

    /// # Errors
    /// - `NoClientsAvailable` when the client collection is empty.
    pub fn available_clients(&self) -> ServiceResult<Vec<Client>> {
        let clients = self.clients.list_clients(&ClientListQuery::default())?;
        if clients.is_empty() {
            return Err(ServiceError::NoClientsAvailable);
        }
        Ok(clients)
    }

    pub fn create_proposal(&self, client_id: &str, draft: ProposalDraft) -> ServiceResult<RecordId> {
        if self.clients.count_clients()? == 0 {
            return Err(ServiceError::NoClientsAvailable);
        }
        let client_id = parse_id(client_id)?;
        let client = require_found(self.clients.get_client(client_id)?, Entity::Client, client_id)?;

        let proposal = Proposal::from_draft(client.id, client.name, draft);
        let id = self.repo.create_proposal(&proposal)?;

        info!("event=proposal_create module=service status=ok id={id} client_id={client_id}");
        Ok(id)
    }

    pub fn list_proposals(&self) -> ServiceResult<Vec<Proposal>> {
        Ok(self.repo.list_proposals()?)
    }

    /// Full record, including the long-form content.
    pub fn view_proposal(&self, id: &str) -> ServiceResult<Proposal> {
        let id = parse_id(id)?;
        require_found(self.repo.get_proposal(id)?, Entity::Proposal, id)
    }

    /// Replaces title, content and date.
    pub fn update_proposal(&self, id: &str, replacement: ProposalDraft) -> ServiceResult<Proposal> {
        let mut proposal = self.view_proposal(id)?;
        proposal.replace(replacement);
        self.repo.update_proposal(&proposal)?;

        info!(
            "event=proposal_update module=service status=ok id={}",
            proposal.id
        );
        Ok(proposal)
    }

    pub fn delete_proposal(
        &self,
        id: &str,
        confirm: impl FnOnce(&Proposal) -> bool,
    ) -> ServiceResult<Outcome<Proposal>> {
        let proposal = self.view_proposal(id)?;
        if !confirm(&proposal) {
            return Ok(Outcome::Cancelled);
        }

        self.repo.delete_proposal(proposal.id)?;
        info!(
            "event=proposal_delete module=service status=ok id={}",
            proposal.id
        );
        Ok(Outcome::Applied(proposal))
    }
}
