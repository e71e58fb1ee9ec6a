//! Core domain logic for the freelance ledger.
//! Record store bootstrap, entity rules and the use-case services the CLI
//! drives. Nothing in here touches a terminal.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{Entity, RecordId};
pub use repo::{RepoError, RepoResult};
pub use service::{Outcome, ServiceError, ServiceResult};
pub use validation::ValidationError;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
