//! Core domain logic for the taskboard backend.
//! Users, todos assigned to them, and the services that keep the two
//! collections consistent.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod seed;
pub mod service;
pub mod store;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::todo::{Todo, TodoId};
pub use model::user::{User, UserId};
pub use seed::{seed_defaults, SeedData, SeedOutcome};
pub use service::error::{LookupKey, ServiceError, ServiceResult};
pub use service::todo_service::TodoService;
pub use service::user_service::UserService;
pub use service::view::TodoView;
pub use store::{
    Collection, Document, MemoryCollection, SqliteCollection, StoreError, StoreResult,
};

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
