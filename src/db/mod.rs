pub mod connection;
pub mod member_repo;
pub mod migrations;
pub mod project_repo;
pub mod sqlite_store;
pub mod step_repo;
pub mod template_repo;

pub use connection::*;
pub use sqlite_store::SqliteStore;
