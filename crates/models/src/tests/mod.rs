/// CRUD and constraint tests for the entity store
pub mod crud_tests;

/// Relational integrity: cascades, restricts and unique indexes
pub mod constraint_tests;

use anyhow::Result;
use sea_orm::DatabaseConnection;

use crate::db;

/// Fresh in-memory database with every migration applied.
pub(crate) async fn setup_test_db() -> Result<DatabaseConnection> {
    db::connect_and_migrate(&configs::DatabaseConfig::in_memory_sqlite()).await
}
