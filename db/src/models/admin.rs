use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, PaginatorTrait, QueryFilter};
use serde::Serialize;

/// Represents a portal administrator in the `admins` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login e-mail, unique across admins.
    pub email: String,
    /// Argon2 PHC string.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("No RelationDef implemented")
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(db: &DbConn, email: &str, password: &str) -> Result<Model, DbErr> {
        let now = Utc::now();
        let admin = ActiveModel {
            email: Set(email.to_owned()),
            password_hash: Set(Self::hash_password(password)?),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        admin.insert(db).await
    }

    pub async fn find_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn find_by_email(db: &DbConn, email: &str) -> Result<Option<Model>, DbErr> {
        Entity::find().filter(Column::Email.eq(email)).one(db).await
    }

    /// Whether at least one admin account has been registered.
    pub async fn any_exists(db: &DbConn) -> Result<bool, DbErr> {
        Ok(Entity::find().count(db).await? > 0)
    }

    /// Updates the e-mail and/or password. `None` keeps the stored value.
    pub async fn update_profile(
        db: &DbConn,
        id: i64,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Model, DbErr> {
        let existing = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Admin {id} not found")))?;

        let mut active: ActiveModel = existing.into();
        if let Some(email) = email {
            active.email = Set(email.to_owned());
        }
        if let Some(password) = password {
            active.password_hash = Set(Self::hash_password(password)?);
        }
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    pub fn hash_password(password: &str) -> Result<String, DbErr> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DbErr::Custom(format!("password hashing failed: {e}")))
    }

    pub fn verify_password(&self, password: &str) -> bool {
        let parsed = match PasswordHash::new(&self.password_hash) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}
