use crate::Migrator;
use colored::*;
use sea_orm::{DatabaseConnection, DbErr};
use sea_orm_migration::MigrationStatus;
use sea_orm_migration::prelude::*;
use std::io::{self, Write};
use std::time::Instant;

const STATUS_COLUMN: usize = 80;

fn label(text: String) {
    let dots = ".".repeat(STATUS_COLUMN.saturating_sub(text.len()));
    print!("{text}{dots} ");
    io::stdout().flush().ok();
}

/// Applies pending migrations one at a time, one status line each.
pub async fn apply_pending(db: &DatabaseConnection) -> Result<(), DbErr> {
    let pending = Migrator::get_pending_migrations(db).await?;
    if pending.is_empty() {
        println!("Nothing to migrate");
        return Ok(());
    }

    for migration in pending {
        label(format!("Applying {}", migration.name().bold()));
        let start = Instant::now();
        if let Err(err) = Migrator::up(db, Some(1)).await {
            println!("{}", "failed".red());
            return Err(err);
        }
        println!("{} {}", "done".green(), format!("({:.2?})", start.elapsed()).dimmed());
    }
    Ok(())
}

/// Prints every known migration with whether it has been applied.
pub async fn print_status(db: &DatabaseConnection) -> Result<(), DbErr> {
    for migration in Migrator::get_migration_with_status(db).await? {
        label(migration.name().to_string());
        match migration.status() {
            MigrationStatus::Applied => println!("{}", "applied".green()),
            MigrationStatus::Pending => println!("{}", "pending".yellow()),
        }
    }
    Ok(())
}
