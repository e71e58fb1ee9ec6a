//! Client use-case service.
//!
//! # Responsibility
//! - Create, search, update and delete clients.
//! - Guard deletion against cached-name references in dependent collections.
//!
//! # Invariants
//! - Names are unique (case-sensitive) at creation and on rename.
//! - A client referenced by any dependent record is never deleted.
//! - Renames do not touch names already cached by dependent records.

use crate::model::client::{Client, ClientCriterion, ClientField};
use crate::model::{Entity, RecordId};
use crate::repo::client_repo::{ClientListQuery, ClientRepository};
use crate::service::{parse_id, require_found, Outcome, ServiceError, ServiceResult};
use crate::validation::{require, ValidationError};
use log::{info, warn};

/// Use-case service for client records.
pub struct ClientService<R: ClientRepository> {
    repo: R,
}

impl<R: ClientRepository> ClientService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new client and returns its id.
    ///
    /// # Errors
    /// - `Validation` for an empty or taken name, a malformed email, or a
    ///   phone that is not 7 to 15 digits.
    pub fn create_client(&self, name: &str, email: &str, phone: &str) -> ServiceResult<RecordId> {
        require("name", name)?;
        self.ensure_name_available(name, None)?;

        let client = Client::new(name, email, phone);
        client.validate()?;
        let id = self.repo.create_client(&client)?;

        info!("event=client_create module=service status=ok id={id}");
        Ok(id)
    }

    pub fn list_clients(&self) -> ServiceResult<Vec<Client>> {
        Ok(self.repo.list_clients(&ClientListQuery::default())?)
    }

    /// Gets one client by id text.
    pub fn get_client(&self, id: &str) -> ServiceResult<Client> {
        let id = parse_id(id)?;
        require_found(self.repo.get_client(id)?, Entity::Client, id)
    }

    /// Finds clients by criterion.
    ///
    /// `Id` is an exact match and fails with `InvalidId` before touching the
    /// store when `value` is malformed; `Name`/`Email` are case-insensitive
    /// substring matches. No match is an empty list, not an error.
    pub fn search_clients(
        &self,
        criterion: ClientCriterion,
        value: &str,
    ) -> ServiceResult<Vec<Client>> {
        let query = match criterion {
            ClientCriterion::Id => {
                let id = parse_id(value)?;
                return Ok(self.repo.get_client(id)?.into_iter().collect());
            }
            ClientCriterion::Name => ClientListQuery {
                name_contains: Some(value.to_string()),
                ..ClientListQuery::default()
            },
            ClientCriterion::Email => ClientListQuery {
                email_contains: Some(value.to_string()),
                ..ClientListQuery::default()
            },
        };
        Ok(self.repo.list_clients(&query)?)
    }

    /// Resolves the clients an update by `criterion`/`value` would act on.
    ///
    /// # Errors
    /// - `InvalidId`/`NotFound` for an id lookup that fails.
    /// - `NoMatches` when a name/email lookup finds nothing.
    pub fn find_update_targets(
        &self,
        criterion: ClientCriterion,
        value: &str,
    ) -> ServiceResult<Vec<Client>> {
        let matches = self.search_clients(criterion, value)?;
        if !matches.is_empty() {
            return Ok(matches);
        }
        Err(match criterion {
            ClientCriterion::Id => ServiceError::NotFound {
                entity: Entity::Client,
                id: parse_id(value)?,
            },
            _ => ServiceError::NoMatches {
                entity: Entity::Client,
                query: value.to_string(),
            },
        })
    }

    /// Replaces one field of the client found by `criterion`/`value`.
    ///
    /// When the lookup yields several clients, `select` picks the target by
    /// id; returning `None` cancels. Renames re-check name uniqueness and
    /// email/phone changes are format-validated.
    ///
    /// # Errors
    /// - `InvalidId`/`NotFound` for an id lookup that fails.
    /// - `NoMatches` when a name/email lookup finds nothing.
    /// - `Validation` when the new value breaks a client rule.
    pub fn update_client(
        &self,
        criterion: ClientCriterion,
        value: &str,
        field: ClientField,
        new_value: &str,
        select: impl FnOnce(&[Client]) -> Option<RecordId>,
    ) -> ServiceResult<Outcome<Client>> {
        let mut matches = self.find_update_targets(criterion, value)?;
        let mut client = match matches.len() {
            1 => matches.remove(0),
            _ => {
                let Some(chosen) = select(&matches) else {
                    return Ok(Outcome::Cancelled);
                };
                let selected = matches.into_iter().find(|client| client.id == chosen);
                require_found(selected, Entity::Client, chosen)?
            }
        };

        if field == ClientField::Name {
            require("name", new_value)?;
            self.ensure_name_available(new_value, Some(client.id))?;
        }

        client.set_field(field, new_value);
        client.validate()?;
        self.repo.update_client(&client)?;

        info!(
            "event=client_update module=service status=ok id={} field={}",
            client.id, field
        );
        Ok(Outcome::Applied(client))
    }

    /// Deletes a client after the dependency scan and `confirm` both pass.
    ///
    /// # Errors
    /// - `InvalidId` for malformed id text.
    /// - `NotFound` when no client has that id.
    /// - `HasDependents` when a proposal, contract, deliverable or financial
    ///   movement caches this client's name.
    pub fn delete_client(
        &self,
        id: &str,
        confirm: impl FnOnce(&Client) -> bool,
    ) -> ServiceResult<Outcome<Client>> {
        let id = parse_id(id)?;
        let client = require_found(self.repo.get_client(id)?, Entity::Client, id)?;

        if let Some(collection) = self.repo.find_dependent_collection(&client.name)? {
            warn!(
                "event=client_delete module=service status=blocked id={id} collection={collection}"
            );
            return Err(ServiceError::HasDependents { collection });
        }

        if !confirm(&client) {
            return Ok(Outcome::Cancelled);
        }

        self.repo.delete_client(id)?;
        info!("event=client_delete module=service status=ok id={id}");
        Ok(Outcome::Applied(client))
    }

    fn ensure_name_available(&self, name: &str, owner: Option<RecordId>) -> ServiceResult<()> {
        match self.repo.find_client_by_name(name)? {
            Some(existing) if Some(existing.id) != owner => Err(ServiceError::Validation(
                ValidationError::DuplicateName(name.to_string()),
            )),
            _ => Ok(()),
        }
    }
}
