use chrono::NaiveDate;
use freelance_core::db::open_db_in_memory;
use freelance_core::model::client::DependentCollection;
use freelance_core::model::contract::{ContractDraft, ContractKind, ContractStatus};
use freelance_core::repo::client_repo::SqliteClientRepository;
use freelance_core::repo::contract_repo::SqliteContractRepository;
use freelance_core::service::client_service::ClientService;
use freelance_core::service::contract_service::ContractService;
use freelance_core::{ServiceError, ValidationError};

#[test]
fn client_with_contract_can_only_be_deleted_after_the_contract() {
    let conn = open_db_in_memory().unwrap();
    let clients = ClientService::new(SqliteClientRepository::new(&conn));
    let contracts = ContractService::new(
        SqliteContractRepository::new(&conn),
        SqliteClientRepository::new(&conn),
    );

    let ana = clients
        .create_client("Ana", "ana@mail.com", "5551234")
        .unwrap();

    let duplicate = clients
        .create_client("Ana", "ana2@mail.com", "5554321")
        .unwrap_err();
    assert!(matches!(
        duplicate,
        ServiceError::Validation(ValidationError::DuplicateName(_))
    ));

    let contract = contracts
        .create_contract(
            &ana.to_string(),
            ContractDraft {
                freelancer_name: "Me".to_string(),
                project_name: "Site".to_string(),
                kind: ContractKind::PerProject,
                status: ContractStatus::Active,
                start_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
                amount: 1000.0,
            },
        )
        .unwrap();

    let blocked = clients
        .delete_client(&ana.to_string(), |_| panic!("guard runs before confirmation"))
        .unwrap_err();
    assert!(matches!(
        blocked,
        ServiceError::HasDependents {
            collection: DependentCollection::Contracts
        }
    ));

    assert!(contracts
        .delete_contract(&contract.to_string(), |_| true)
        .unwrap()
        .is_applied());
    assert!(clients
        .delete_client(&ana.to_string(), |_| true)
        .unwrap()
        .is_applied());
    assert!(clients.list_clients().unwrap().is_empty());
}
