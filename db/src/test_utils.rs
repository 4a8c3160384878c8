//! Test fixtures shared across crates.

use migration::Migrator;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

/// A private in-memory SQLite database with the full schema applied.
///
/// sea-orm caps in-memory SQLite pools at one connection, so work inside a
/// transaction must go through the transaction handle.
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite should open");
    Migrator::up(&db, None)
        .await
        .expect("migrations should apply to an empty database");
    db
}
