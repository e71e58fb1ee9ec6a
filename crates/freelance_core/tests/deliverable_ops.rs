use chrono::NaiveDate;
use freelance_core::db::open_db_in_memory;
use freelance_core::model::contract::{ContractDraft, ContractKind, ContractStatus};
use freelance_core::model::deliverable::DeliverableDraft;
use freelance_core::model::project::{ProjectDraft, ProjectStatus};
use freelance_core::model::RecordId;
use freelance_core::repo::client_repo::SqliteClientRepository;
use freelance_core::repo::contract_repo::SqliteContractRepository;
use freelance_core::repo::deliverable_repo::SqliteDeliverableRepository;
use freelance_core::repo::project_repo::SqliteProjectRepository;
use freelance_core::service::client_service::ClientService;
use freelance_core::service::contract_service::ContractService;
use freelance_core::service::deliverable_service::DeliverableService;
use freelance_core::service::project_service::ProjectService;
use freelance_core::{Entity, ServiceError};
use rusqlite::Connection;

type Deliverables<'conn> = DeliverableService<
    SqliteDeliverableRepository<'conn>,
    SqliteProjectRepository<'conn>,
    SqliteContractRepository<'conn>,
>;

fn deliverable_service(conn: &Connection) -> Deliverables<'_> {
    DeliverableService::new(
        SqliteDeliverableRepository::new(conn),
        SqliteProjectRepository::new(conn),
        SqliteContractRepository::new(conn),
    )
}

/// Seeds client "Ana", one contract and one project; returns
/// `(contract_id, project_id)`.
fn seed_project(conn: &Connection) -> (RecordId, RecordId) {
    let client_id = ClientService::new(SqliteClientRepository::new(conn))
        .create_client("Ana", "ana@x.com", "5551234")
        .unwrap();
    let contract_id = ContractService::new(
        SqliteContractRepository::new(conn),
        SqliteClientRepository::new(conn),
    )
    .create_contract(
        &client_id.to_string(),
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
    let project_id = ProjectService::new(
        SqliteProjectRepository::new(conn),
        SqliteContractRepository::new(conn),
    )
    .create_project(
        &contract_id.to_string(),
        ProjectDraft {
            title: "Checkout".to_string(),
            description: String::new(),
            status: ProjectStatus::Active,
        },
    )
    .unwrap();
    (contract_id, project_id)
}

fn draft(title: &str, due_date: Option<NaiveDate>) -> DeliverableDraft {
    DeliverableDraft {
        title: title.to_string(),
        description: "first pass".to_string(),
        due_date,
    }
}

#[test]
fn create_requires_projects() {
    let conn = open_db_in_memory().unwrap();
    let deliverables = deliverable_service(&conn);

    assert!(matches!(
        deliverables.available_projects().unwrap_err(),
        ServiceError::NoProjectsAvailable
    ));
    let err = deliverables
        .create_deliverable(&uuid::Uuid::new_v4().to_string(), draft("Mockups", None))
        .unwrap_err();
    assert!(matches!(err, ServiceError::NoProjectsAvailable));
}

#[test]
fn create_caches_project_title_and_client_name() {
    let conn = open_db_in_memory().unwrap();
    let (_, project_id) = seed_project(&conn);
    let deliverables = deliverable_service(&conn);
    let due = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();

    let id = deliverables
        .create_deliverable(&project_id.to_string(), draft("Mockups", Some(due)))
        .unwrap();

    let stored = deliverables.get_deliverable(&id.to_string()).unwrap();
    assert_eq!(stored.project_id, project_id);
    assert_eq!(stored.project_title, "Checkout");
    assert_eq!(stored.client_name.as_deref(), Some("Ana"));
    assert_eq!(stored.due_date, Some(due));
}

#[test]
fn create_after_contract_removal_has_no_client_name() {
    let conn = open_db_in_memory().unwrap();
    let (contract_id, project_id) = seed_project(&conn);
    ContractService::new(
        SqliteContractRepository::new(&conn),
        SqliteClientRepository::new(&conn),
    )
    .delete_contract(&contract_id.to_string(), |_| true)
    .unwrap();
    let deliverables = deliverable_service(&conn);

    let id = deliverables
        .create_deliverable(&project_id.to_string(), draft("Mockups", None))
        .unwrap();

    let stored = deliverables.get_deliverable(&id.to_string()).unwrap();
    assert_eq!(stored.client_name, None);
    assert_eq!(stored.due_date, None);
}

#[test]
fn update_replaces_all_fields_including_due_date() {
    let conn = open_db_in_memory().unwrap();
    let (_, project_id) = seed_project(&conn);
    let deliverables = deliverable_service(&conn);
    let id = deliverables
        .create_deliverable(
            &project_id.to_string(),
            draft("Mockups", NaiveDate::from_ymd_opt(2025, 6, 30)),
        )
        .unwrap();

    deliverables
        .update_deliverable(
            &id.to_string(),
            DeliverableDraft {
                title: "Final mockups".to_string(),
                description: String::new(),
                due_date: None,
            },
        )
        .unwrap();

    let stored = deliverables.get_deliverable(&id.to_string()).unwrap();
    assert_eq!(stored.title, "Final mockups");
    assert_eq!(stored.description, "");
    assert_eq!(stored.due_date, None);
    assert_eq!(stored.project_title, "Checkout");
}

#[test]
fn blank_title_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let (_, project_id) = seed_project(&conn);
    let deliverables = deliverable_service(&conn);

    let err = deliverables
        .create_deliverable(&project_id.to_string(), draft("  ", None))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[test]
fn delete_removes_record_and_reports_missing() {
    let conn = open_db_in_memory().unwrap();
    let (_, project_id) = seed_project(&conn);
    let deliverables = deliverable_service(&conn);
    let keep = deliverables
        .create_deliverable(&project_id.to_string(), draft("Copy", None))
        .unwrap();
    let drop_id = deliverables
        .create_deliverable(&project_id.to_string(), draft("Mockups", None))
        .unwrap();

    deliverables.delete_deliverable(&drop_id.to_string()).unwrap();

    let remaining = deliverables.list_deliverables().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, keep);
    assert!(matches!(
        deliverables.delete_deliverable(&drop_id.to_string()).unwrap_err(),
        ServiceError::NotFound { entity: Entity::Deliverable, .. }
    ));
}
