use crate::seed::Seeder;
use async_trait::async_trait;
use db::models::subject::Model;
use sea_orm::{DatabaseConnection, DbErr};

const SUBJECTS: &[(&str, Option<&str>, &str)] = &[
    ("Data Structures", Some("210244"), "SEM3"),
    ("Object Oriented Programming", Some("210243"), "SEM3"),
    ("Computer Graphics", Some("210245"), "SEM3"),
    ("Operating Systems", None, "SEM4"),
    ("Computer Networks", None, "SEM5"),
];

pub struct SubjectSeeder;

#[async_trait]
impl Seeder for SubjectSeeder {
    fn name(&self) -> &'static str {
        "Subject"
    }

    async fn seed(&self, db: &DatabaseConnection) -> Result<usize, DbErr> {
        let existing = Model::find_all(db).await?;
        let mut inserted = 0;
        for (name, code, semester) in SUBJECTS {
            if existing.iter().any(|s| s.name == *name && s.semester == *semester) {
                continue;
            }
            Model::create(db, name, *code, semester).await?;
            inserted += 1;
        }
        Ok(inserted)
    }
}
