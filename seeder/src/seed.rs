use async_trait::async_trait;
use colored::*;
use futures::FutureExt;
use sea_orm::{DatabaseConnection, DbErr};
use std::io::{self, Write};
use std::time::Instant;

const STATUS_COLUMN: usize = 80;

/// One idempotent seeding step. Returns the number of rows it inserted.
#[async_trait]
pub trait Seeder: Send + Sync {
    fn name(&self) -> &'static str;

    async fn seed(&self, db: &DatabaseConnection) -> Result<usize, DbErr>;
}

/// Runs `seeder`, printing `Seeding <name> .... done (n rows, t)`.
///
/// A panic inside the seeder is reported as a failure instead of unwinding.
pub async fn run_seeder(seeder: &dyn Seeder, db: &DatabaseConnection) -> Result<(), DbErr> {
    let label = format!("Seeding {}", seeder.name().bold());
    print!("{label}{} ", ".".repeat(STATUS_COLUMN.saturating_sub(label.len())));
    io::stdout().flush().ok();

    let start = Instant::now();
    let outcome = std::panic::AssertUnwindSafe(seeder.seed(db))
        .catch_unwind()
        .await
        .unwrap_or_else(|_| Err(DbErr::Custom(format!("{} seeder panicked", seeder.name()))));

    match outcome {
        Ok(rows) => {
            let detail = format!("({rows} rows, {:.2?})", start.elapsed()).dimmed();
            println!("{} {detail}", "done".green());
            Ok(())
        }
        Err(err) => {
            println!("{}", "failed".red());
            Err(err)
        }
    }
}
