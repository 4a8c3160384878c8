pub mod models;
pub mod test_utils;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::path::Path;
use std::time::Duration;
use util::config::AppConfig;

/// Opens the record store described by `DATABASE_PATH`.
///
/// A bare path is treated as a SQLite file (created on demand); anything that
/// already looks like a DSN is passed through unchanged.
pub async fn connect() -> Result<DatabaseConnection, DbErr> {
    let (path_or_url, timeout_secs) = {
        let cfg = AppConfig::global();
        (cfg.database_path.clone(), cfg.db_timeout_secs)
    };

    let url = if path_or_url.starts_with("sqlite:")
        || path_or_url.starts_with("postgres://")
        || path_or_url.starts_with("mysql://")
    {
        path_or_url
    } else {
        // SQLite won't create intermediate dirs.
        if let Some(parent) = Path::new(&path_or_url).parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        format!("sqlite://{path_or_url}?mode=rwc")
    };

    let mut options = ConnectOptions::new(url);
    options
        .connect_timeout(Duration::from_secs(timeout_secs))
        .acquire_timeout(Duration::from_secs(timeout_secs))
        .sqlx_logging(false);

    Database::connect(options).await
}
