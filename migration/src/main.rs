use migration::{Migrator, runner};
use sea_orm_migration::MigratorTrait;
use std::path::Path;
use std::process::ExitCode;
use util::config::AppConfig;

/// `migration [up|fresh|clean|status]`, defaulting to `up`.
#[tokio::main]
async fn main() -> ExitCode {
    let db_path = AppConfig::global().database_path.clone();
    let command = std::env::args().nth(1).unwrap_or_else(|| "up".into());

    if command == "clean" {
        return match remove_db_file(&db_path) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Could not delete {db_path}: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let url = sqlite_url(&db_path);
    let db = match sea_orm::Database::connect(&url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("DB connection failed ({url}): {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match command.as_str() {
        "up" => runner::apply_pending(&db).await,
        "fresh" => match Migrator::fresh(&db).await {
            Ok(()) => runner::print_status(&db).await,
            Err(e) => Err(e),
        },
        "status" => runner::print_status(&db).await,
        other => {
            eprintln!("Unknown command {other:?}; expected up, fresh, clean or status");
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn sqlite_url(db_path: &str) -> String {
    if db_path.starts_with("sqlite:") {
        return db_path.to_owned();
    }
    if let Some(parent) = Path::new(db_path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    format!("sqlite://{db_path}?mode=rwc")
}

fn remove_db_file(db_path: &str) -> std::io::Result<()> {
    let path = Path::new(db_path);
    if path.exists() {
        std::fs::remove_file(path)?;
        println!("Deleted DB: {}", path.display());
    } else {
        println!("DB file does not exist: {}", path.display());
    }
    Ok(())
}
