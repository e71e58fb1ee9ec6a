use chrono::NaiveDate;
use freelance_core::db::open_db_in_memory;
use freelance_core::model::finance::{Balance, MovementDraft, MovementKind};
use freelance_core::repo::client_repo::SqliteClientRepository;
use freelance_core::repo::finance_repo::SqliteFinanceRepository;
use freelance_core::service::client_service::ClientService;
use freelance_core::service::finance_service::FinanceService;
use freelance_core::{Entity, ServiceError, ValidationError};
use rusqlite::Connection;

fn finance_service(
    conn: &Connection,
) -> FinanceService<SqliteFinanceRepository<'_>, SqliteClientRepository<'_>> {
    FinanceService::new(
        SqliteFinanceRepository::new(conn),
        SqliteClientRepository::new(conn),
    )
}

fn movement(kind: MovementKind, amount: f64, date: &str) -> MovementDraft {
    MovementDraft {
        kind,
        description: format!("{kind} on {date}"),
        amount,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
    }
}

fn seed(finance: &FinanceService<SqliteFinanceRepository<'_>, SqliteClientRepository<'_>>) {
    for (kind, amount, date) in [
        (MovementKind::Income, 1000.0, "2025-03-01"),
        (MovementKind::Expense, 200.0, "2025-03-15"),
        (MovementKind::Income, 300.0, "2025-03-31"),
        (MovementKind::Income, 50.0, "2025-04-01"),
        (MovementKind::Income, 75.0, "2025-02-28"),
        (MovementKind::Expense, 40.0, "2024-12-31"),
        (MovementKind::Income, 10.0, "1900-03-05"),
    ] {
        finance
            .create_movement(movement(kind, amount, date), None)
            .unwrap();
    }
}

#[test]
fn list_is_ordered_by_date() {
    let conn = open_db_in_memory().unwrap();
    let finance = finance_service(&conn);
    seed(&finance);

    let dates: Vec<String> = finance
        .list_movements()
        .unwrap()
        .iter()
        .map(|movement| movement.date.to_string())
        .collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
    assert_eq!(dates.len(), 7);
}

#[test]
fn income_filter_for_march_2025_is_half_open() {
    let conn = open_db_in_memory().unwrap();
    let finance = finance_service(&conn);
    seed(&finance);

    let march = finance
        .filter_movements(Some(MovementKind::Income), Some(3), Some(2025))
        .unwrap();

    let amounts: Vec<f64> = march.iter().map(|movement| movement.amount).collect();
    assert_eq!(amounts, vec![1000.0, 300.0]);
    assert!(march
        .iter()
        .all(|movement| movement.kind == MovementKind::Income));
}

#[test]
fn filter_period_variants() {
    let conn = open_db_in_memory().unwrap();
    let finance = finance_service(&conn);
    seed(&finance);

    let year_only = finance.filter_movements(None, None, Some(2025)).unwrap();
    assert_eq!(year_only.len(), 5);

    let month_only = finance.filter_movements(None, Some(3), None).unwrap();
    assert_eq!(month_only.len(), 1);
    assert_eq!(month_only[0].date, NaiveDate::from_ymd_opt(1900, 3, 5).unwrap());

    let expenses = finance
        .filter_movements(Some(MovementKind::Expense), None, None)
        .unwrap();
    assert_eq!(expenses.len(), 2);

    assert!(matches!(
        finance.filter_movements(None, Some(13), Some(2025)).unwrap_err(),
        ServiceError::Validation(ValidationError::InvalidMonth(_))
    ));
}

#[test]
fn balance_sums_the_period() {
    let conn = open_db_in_memory().unwrap();
    let finance = finance_service(&conn);
    seed(&finance);

    let year = finance.balance(2025, None).unwrap();
    assert_eq!(year.income, 1425.0);
    assert_eq!(year.expense, 200.0);
    assert_eq!(year.balance, 1225.0);

    let march = finance.balance(2025, Some(3)).unwrap();
    assert_eq!(march.balance, 1100.0);

    assert_eq!(finance.balance(2030, None).unwrap(), Balance::default());
}

#[test]
fn create_validates_amount_and_optional_client() {
    let conn = open_db_in_memory().unwrap();
    let finance = finance_service(&conn);
    let ana = ClientService::new(SqliteClientRepository::new(&conn))
        .create_client("Ana", "ana@x.com", "5551234")
        .unwrap();

    assert!(matches!(
        finance
            .create_movement(movement(MovementKind::Income, -5.0, "2025-01-01"), None)
            .unwrap_err(),
        ServiceError::Validation(ValidationError::InvalidAmount(_))
    ));
    assert!(matches!(
        finance
            .create_movement(
                movement(MovementKind::Income, 5.0, "2025-01-01"),
                Some(&uuid::Uuid::new_v4().to_string()),
            )
            .unwrap_err(),
        ServiceError::NotFound { entity: Entity::Client, .. }
    ));

    let id = finance
        .create_movement(
            movement(MovementKind::Income, 5.0, "2025-01-01"),
            Some(&ana.to_string()),
        )
        .unwrap();
    let stored = finance.get_movement(&id.to_string()).unwrap();
    assert_eq!(stored.client_name.as_deref(), Some("Ana"));
    assert_eq!(finance.list_movements().unwrap().len(), 1);
}

#[test]
fn update_replaces_fields_and_keeps_client() {
    let conn = open_db_in_memory().unwrap();
    let finance = finance_service(&conn);
    let ana = ClientService::new(SqliteClientRepository::new(&conn))
        .create_client("Ana", "ana@x.com", "5551234")
        .unwrap();
    let id = finance
        .create_movement(
            movement(MovementKind::Income, 5.0, "2025-01-01"),
            Some(&ana.to_string()),
        )
        .unwrap();

    let updated = finance
        .update_movement(&id.to_string(), movement(MovementKind::Expense, 9.5, "2025-02-02"))
        .unwrap();

    let stored = finance.get_movement(&id.to_string()).unwrap();
    assert_eq!(stored, updated);
    assert_eq!(stored.kind, MovementKind::Expense);
    assert_eq!(stored.amount, 9.5);
    assert_eq!(stored.date, NaiveDate::from_ymd_opt(2025, 2, 2).unwrap());
    assert_eq!(stored.client_name.as_deref(), Some("Ana"));
}

#[test]
fn delete_reports_missing_movement() {
    let conn = open_db_in_memory().unwrap();
    let finance = finance_service(&conn);
    let id = finance
        .create_movement(movement(MovementKind::Expense, 20.0, "2025-05-05"), None)
        .unwrap();

    finance.delete_movement(&id.to_string()).unwrap();
    assert!(finance.list_movements().unwrap().is_empty());
    assert!(matches!(
        finance.delete_movement(&id.to_string()).unwrap_err(),
        ServiceError::NotFound { entity: Entity::FinancialMovement, .. }
    ));
}
