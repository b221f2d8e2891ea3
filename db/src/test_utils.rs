use migration::Migrator;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::path::Path;

/// In-memory SQLite database with every migration applied.
pub async fn setup_test_db() -> DatabaseConnection {
    migrated("sqlite::memory:").await
}

/// File-backed SQLite database at `path` with every migration applied. Unlike
/// the in-memory variant, every pooled connection sees the same store.
pub async fn setup_file_test_db(path: &Path) -> DatabaseConnection {
    migrated(&format!("sqlite://{}?mode=rwc", path.display())).await
}

async fn migrated(url: &str) -> DatabaseConnection {
    let db = Database::connect(url)
        .await
        .expect("Failed to connect to test db");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}
