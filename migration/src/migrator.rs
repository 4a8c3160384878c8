use crate::migrations::{
    m202510010001_create_admins, m202510010002_create_subjects,
    m202510010003_create_practicals, m202510010004_create_submissions,
};
use sea_orm_migration::prelude::*;

/// Schema for admins, subjects, practicals and submissions, in dependency order.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m202510010001_create_admins::Migration),
            Box::new(m202510010002_create_subjects::Migration),
            Box::new(m202510010003_create_practicals::Migration),
            Box::new(m202510010004_create_submissions::Migration),
        ]
    }
}
