use super::subject;
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};

/// Published content. The code body lives in the remote repository at `code_link`;
/// this record never stores it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "practicals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub subject_id: i64,
    pub title: String,
    pub description: String,
    /// Public blob URL of the published file.
    pub code_link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subject::Entity",
        from = "Column::SubjectId",
        to = "super::subject::Column::Id"
    )]
    Subject,
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Inserts a practical. Generic over the connection so it can join a transaction.
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        subject_id: i64,
        title: &str,
        description: &str,
        code_link: Option<&str>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let practical = ActiveModel {
            subject_id: Set(subject_id),
            title: Set(title.to_owned()),
            description: Set(description.to_owned()),
            code_link: Set(code_link.map(str::to_owned)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        practical.insert(db).await
    }

    pub async fn find_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn find_all_with_subject(
        db: &DbConn,
    ) -> Result<Vec<(Model, Option<subject::Model>)>, DbErr> {
        Entity::find()
            .find_also_related(subject::Entity)
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    pub async fn find_by_subject(db: &DbConn, subject_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::SubjectId.eq(subject_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    /// Partial update of the descriptive fields; `None` keeps the stored value.
    pub async fn update(
        db: &DbConn,
        id: i64,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<Model, DbErr> {
        let existing = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Practical {id} not found")))?;

        let mut active: ActiveModel = existing.into();
        if let Some(title) = title {
            active.title = Set(title.to_owned());
        }
        if let Some(description) = description {
            active.description = Set(description.to_owned());
        }
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    pub async fn delete(db: &DbConn, id: i64) -> Result<(), DbErr> {
        Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }
}
