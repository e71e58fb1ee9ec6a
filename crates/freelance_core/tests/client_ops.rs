use chrono::NaiveDate;
use freelance_core::db::open_db_in_memory;
use freelance_core::model::client::{ClientCriterion, ClientField, DependentCollection};
use freelance_core::model::contract::{ContractDraft, ContractKind, ContractStatus};
use freelance_core::model::deliverable::DeliverableDraft;
use freelance_core::model::finance::{MovementDraft, MovementKind};
use freelance_core::model::project::{ProjectDraft, ProjectStatus};
use freelance_core::model::proposal::ProposalDraft;
use freelance_core::repo::client_repo::SqliteClientRepository;
use freelance_core::repo::contract_repo::SqliteContractRepository;
use freelance_core::repo::deliverable_repo::SqliteDeliverableRepository;
use freelance_core::repo::finance_repo::SqliteFinanceRepository;
use freelance_core::repo::project_repo::SqliteProjectRepository;
use freelance_core::repo::proposal_repo::SqliteProposalRepository;
use freelance_core::service::client_service::ClientService;
use freelance_core::service::contract_service::ContractService;
use freelance_core::service::deliverable_service::DeliverableService;
use freelance_core::service::finance_service::FinanceService;
use freelance_core::service::project_service::ProjectService;
use freelance_core::service::proposal_service::ProposalService;
use freelance_core::{Entity, Outcome, ServiceError, ValidationError};
use rusqlite::Connection;

fn client_service(conn: &Connection) -> ClientService<SqliteClientRepository<'_>> {
    ClientService::new(SqliteClientRepository::new(conn))
}

#[test]
fn created_client_is_found_by_its_id() {
    let conn = open_db_in_memory().unwrap();
    let service = client_service(&conn);

    let id = service
        .create_client("Ana", "ana@example.com", "5551234")
        .unwrap();

    let found = service
        .search_clients(ClientCriterion::Id, &id.to_string())
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Ana");
    assert_eq!(found[0].email, "ana@example.com");
    assert_eq!(found[0].phone, "5551234");
}

#[test]
fn duplicate_name_is_rejected_case_sensitively() {
    let conn = open_db_in_memory().unwrap();
    let service = client_service(&conn);
    service.create_client("Ana", "ana@example.com", "5551234").unwrap();

    let err = service
        .create_client("Ana", "other@example.com", "5559999")
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::DuplicateName(ref name)) if name == "Ana"
    ));

    service.create_client("ana", "lower@example.com", "5550000").unwrap();
    assert_eq!(service.list_clients().unwrap().len(), 2);
}

#[test]
fn create_rejects_bad_formats_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let service = client_service(&conn);

    assert!(matches!(
        service.create_client("", "a@b.co", "5551234").unwrap_err(),
        ServiceError::Validation(ValidationError::Required("name"))
    ));
    assert!(matches!(
        service.create_client("Ana", "not-an-email", "5551234").unwrap_err(),
        ServiceError::Validation(ValidationError::InvalidEmail(_))
    ));
    assert!(matches!(
        service.create_client("Ana", "a@b.co", "12-34").unwrap_err(),
        ServiceError::Validation(ValidationError::InvalidPhone(_))
    ));
    assert!(service.list_clients().unwrap().is_empty());
}

#[test]
fn text_search_is_case_insensitive_substring() {
    let conn = open_db_in_memory().unwrap();
    let service = client_service(&conn);
    service.create_client("Ana Torres", "ana@studio.io", "5551234").unwrap();
    service.create_client("Bruno", "bruno@mail.com", "5559876").unwrap();

    let by_name = service.search_clients(ClientCriterion::Name, "TORR").unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].name, "Ana Torres");

    let by_email = service.search_clients(ClientCriterion::Email, "MAIL.c").unwrap();
    assert_eq!(by_email.len(), 1);
    assert_eq!(by_email[0].name, "Bruno");

    assert!(service
        .search_clients(ClientCriterion::Name, "zzz")
        .unwrap()
        .is_empty());
}

#[test]
fn text_search_folds_accented_letters() {
    let conn = open_db_in_memory().unwrap();
    let service = client_service(&conn);
    service
        .create_client("José Álvarez", "jose@estudio.es", "5551234")
        .unwrap();
    service.create_client("Ñoño Pérez", "NONO@ESTUDIO.ES", "5559876").unwrap();

    for needle in ["josé", "JOSÉ", "álvarez", "ÁLVAREZ", "Jos"] {
        let found = service.search_clients(ClientCriterion::Name, needle).unwrap();
        assert_eq!(found.len(), 1, "name search for {needle}");
        assert_eq!(found[0].name, "José Álvarez");
    }

    let found = service.search_clients(ClientCriterion::Name, "ñoño").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Ñoño Pérez");

    let by_email = service.search_clients(ClientCriterion::Email, "nono@").unwrap();
    assert_eq!(by_email.len(), 1);
}

#[test]
fn id_search_rejects_malformed_id() {
    let conn = open_db_in_memory().unwrap();
    let service = client_service(&conn);

    let err = service
        .search_clients(ClientCriterion::Id, "not-a-uuid")
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidId(ref value) if value == "not-a-uuid"));
}

#[test]
fn list_is_ordered_by_name() {
    let conn = open_db_in_memory().unwrap();
    let service = client_service(&conn);
    service.create_client("Carla", "c@x.com", "5551111").unwrap();
    service.create_client("Ana", "a@x.com", "5552222").unwrap();
    service.create_client("Bruno", "b@x.com", "5553333").unwrap();

    let names: Vec<String> = service
        .list_clients()
        .unwrap()
        .into_iter()
        .map(|client| client.name)
        .collect();
    assert_eq!(names, vec!["Ana", "Bruno", "Carla"]);
}

#[test]
fn update_then_search_shows_new_value_and_keeps_others() {
    let conn = open_db_in_memory().unwrap();
    let service = client_service(&conn);
    let id = service.create_client("Ana", "ana@example.com", "5551234").unwrap();

    let outcome = service
        .update_client(
            ClientCriterion::Id,
            &id.to_string(),
            ClientField::Email,
            "ana@new.org",
            |_| panic!("single match must not ask for a selection"),
        )
        .unwrap();
    assert!(outcome.is_applied());

    let stored = service.get_client(&id.to_string()).unwrap();
    assert_eq!(stored.email, "ana@new.org");
    assert_eq!(stored.name, "Ana");
    assert_eq!(stored.phone, "5551234");
}

#[test]
fn update_with_several_matches_uses_selection() {
    let conn = open_db_in_memory().unwrap();
    let service = client_service(&conn);
    service.create_client("Ana One", "one@x.com", "5551111").unwrap();
    let second = service.create_client("Ana Two", "two@x.com", "5552222").unwrap();

    let outcome = service
        .update_client(
            ClientCriterion::Name,
            "ana",
            ClientField::Phone,
            "5559999",
            |matches| {
                assert_eq!(matches.len(), 2);
                Some(second)
            },
        )
        .unwrap();
    match outcome {
        Outcome::Applied(client) => {
            assert_eq!(client.id, second);
            assert_eq!(client.phone, "5559999");
        }
        Outcome::Cancelled => panic!("selection was made"),
    }

    let declined = service
        .update_client(
            ClientCriterion::Name,
            "ana",
            ClientField::Phone,
            "5550000",
            |_| None,
        )
        .unwrap();
    assert_eq!(declined, Outcome::Cancelled);
    assert_eq!(service.get_client(&second.to_string()).unwrap().phone, "5559999");
}

#[test]
fn update_reports_missing_targets() {
    let conn = open_db_in_memory().unwrap();
    let service = client_service(&conn);

    let err = service
        .update_client(ClientCriterion::Name, "nobody", ClientField::Phone, "5551234", |_| None)
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NoMatches { entity: Entity::Client, .. }
    ));

    let missing = uuid::Uuid::new_v4().to_string();
    let err = service
        .update_client(ClientCriterion::Id, &missing, ClientField::Phone, "5551234", |_| None)
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: Entity::Client, .. }));

    assert!(matches!(
        service.find_update_targets(ClientCriterion::Email, "nobody@").unwrap_err(),
        ServiceError::NoMatches { entity: Entity::Client, .. }
    ));
    assert!(matches!(
        service.find_update_targets(ClientCriterion::Id, "not-a-uuid").unwrap_err(),
        ServiceError::InvalidId(_)
    ));
}

#[test]
fn rename_checks_uniqueness_but_allows_own_name() {
    let conn = open_db_in_memory().unwrap();
    let service = client_service(&conn);
    let ana = service.create_client("Ana", "a@x.com", "5551111").unwrap();
    service.create_client("Bruno", "b@x.com", "5552222").unwrap();

    let err = service
        .update_client(ClientCriterion::Id, &ana.to_string(), ClientField::Name, "Bruno", |_| None)
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::DuplicateName(_))
    ));

    let same = service
        .update_client(ClientCriterion::Id, &ana.to_string(), ClientField::Name, "Ana", |_| None)
        .unwrap();
    assert!(same.is_applied());
}

#[test]
fn update_validates_email_and_phone_formats() {
    let conn = open_db_in_memory().unwrap();
    let service = client_service(&conn);
    let id = service.create_client("Ana", "a@x.com", "5551111").unwrap();

    let err = service
        .update_client(ClientCriterion::Id, &id.to_string(), ClientField::Phone, "abc", |_| None)
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::InvalidPhone(_))
    ));
    assert_eq!(service.get_client(&id.to_string()).unwrap().phone, "5551111");
}

#[test]
fn delete_is_blocked_by_cached_name_in_any_dependent_collection() {
    let conn = open_db_in_memory().unwrap();
    let clients = client_service(&conn);
    let proposals = ProposalService::new(
        SqliteProposalRepository::new(&conn),
        SqliteClientRepository::new(&conn),
    );
    let finance = FinanceService::new(
        SqliteFinanceRepository::new(&conn),
        SqliteClientRepository::new(&conn),
    );

    let ana = clients.create_client("Ana", "a@x.com", "5551111").unwrap();
    let bruno = clients.create_client("Bruno", "b@x.com", "5552222").unwrap();
    proposals
        .create_proposal(
            &ana.to_string(),
            ProposalDraft {
                title: "Website".to_string(),
                content: "Landing page".to_string(),
                date: None,
            },
        )
        .unwrap();
    finance
        .create_movement(
            MovementDraft {
                kind: MovementKind::Income,
                description: "Deposit".to_string(),
                amount: 100.0,
                date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            },
            Some(&bruno.to_string()),
        )
        .unwrap();

    let err = clients.delete_client(&ana.to_string(), |_| true).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::HasDependents {
            collection: DependentCollection::Proposals
        }
    ));
    let err = clients.delete_client(&bruno.to_string(), |_| true).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::HasDependents {
            collection: DependentCollection::FinancialMovements
        }
    ));
    assert_eq!(clients.list_clients().unwrap().len(), 2);
}

#[test]
fn delete_is_blocked_by_a_deliverable_after_its_contract_is_gone() {
    let conn = open_db_in_memory().unwrap();
    let clients = client_service(&conn);
    let contracts = ContractService::new(
        SqliteContractRepository::new(&conn),
        SqliteClientRepository::new(&conn),
    );
    let projects = ProjectService::new(
        SqliteProjectRepository::new(&conn),
        SqliteContractRepository::new(&conn),
    );
    let deliverables = DeliverableService::new(
        SqliteDeliverableRepository::new(&conn),
        SqliteProjectRepository::new(&conn),
        SqliteContractRepository::new(&conn),
    );

    let ana = clients.create_client("Ana", "a@x.com", "5551111").unwrap();
    let contract_id = contracts
        .create_contract(
            &ana.to_string(),
            ContractDraft {
                freelancer_name: "Marta".to_string(),
                project_name: "Shop".to_string(),
                kind: ContractKind::PerProject,
                status: ContractStatus::Active,
                start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                amount: 500.0,
            },
        )
        .unwrap();
    let project_id = projects
        .create_project(
            &contract_id.to_string(),
            ProjectDraft {
                title: "Checkout".to_string(),
                description: String::new(),
                status: ProjectStatus::Active,
            },
        )
        .unwrap();
    let deliverable_id = deliverables
        .create_deliverable(
            &project_id.to_string(),
            DeliverableDraft {
                title: "Mockups".to_string(),
                description: String::new(),
                due_date: None,
            },
        )
        .unwrap();
    assert_eq!(
        deliverables
            .get_deliverable(&deliverable_id.to_string())
            .unwrap()
            .client_name
            .as_deref(),
        Some("Ana")
    );

    projects.delete_project(&project_id.to_string()).unwrap();
    contracts
        .delete_contract(&contract_id.to_string(), |_| true)
        .unwrap();

    let err = clients.delete_client(&ana.to_string(), |_| true).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::HasDependents {
            collection: DependentCollection::Deliverables
        }
    ));

    deliverables
        .delete_deliverable(&deliverable_id.to_string())
        .unwrap();
    assert!(matches!(
        clients.delete_client(&ana.to_string(), |_| true).unwrap(),
        Outcome::Applied(_)
    ));
}

#[test]
fn delete_removes_exactly_the_confirmed_client() {
    let conn = open_db_in_memory().unwrap();
    let service = client_service(&conn);
    let ana = service.create_client("Ana", "a@x.com", "5551111").unwrap();
    service.create_client("Bruno", "b@x.com", "5552222").unwrap();

    let declined = service.delete_client(&ana.to_string(), |_| false).unwrap();
    assert_eq!(declined, Outcome::Cancelled);
    assert_eq!(service.list_clients().unwrap().len(), 2);

    let deleted = service
        .delete_client(&ana.to_string(), |client| client.name == "Ana")
        .unwrap();
    assert!(deleted.is_applied());

    let remaining = service.list_clients().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "Bruno");
}

#[test]
fn delete_reports_invalid_and_unknown_ids() {
    let conn = open_db_in_memory().unwrap();
    let service = client_service(&conn);

    assert!(matches!(
        service.delete_client("123", |_| true).unwrap_err(),
        ServiceError::InvalidId(_)
    ));
    assert!(matches!(
        service
            .delete_client(&uuid::Uuid::new_v4().to_string(), |_| true)
            .unwrap_err(),
        ServiceError::NotFound { entity: Entity::Client, .. }
    ));
}
