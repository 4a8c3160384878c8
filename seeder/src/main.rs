use crate::seed::{Seeder, run_seeder};
use crate::seeds::{admin::AdminSeeder, subject::SubjectSeeder, submission::SubmissionSeeder};
use migration::Migrator;
use sea_orm_migration::MigratorTrait;
use std::process::ExitCode;

mod seed;
mod seeds;

#[tokio::main]
async fn main() -> ExitCode {
    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("DB connection failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = Migrator::up(&db, None).await {
        eprintln!("Migrations failed: {e}");
        return ExitCode::FAILURE;
    }

    let seeders: [&dyn Seeder; 3] = [&AdminSeeder, &SubjectSeeder, &SubmissionSeeder];
    for seeder in seeders {
        if let Err(e) = run_seeder(seeder, &db).await {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
