use crate::seed::Seeder;
use async_trait::async_trait;
use db::models::admin::Model;
use sea_orm::{DatabaseConnection, DbErr};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "password123";

pub struct AdminSeeder;

#[async_trait]
impl Seeder for AdminSeeder {
    fn name(&self) -> &'static str {
        "Admin"
    }

    async fn seed(&self, db: &DatabaseConnection) -> Result<usize, DbErr> {
        if Model::any_exists(db).await? {
            return Ok(0);
        }
        Model::create(db, ADMIN_EMAIL, ADMIN_PASSWORD).await?;
        Ok(1)
    }
}
