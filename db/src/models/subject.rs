use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{PaginatorTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};

/// A course grouping that practicals and submissions belong to.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "subjects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name, also used as the folder name in the code repository.
    pub name: String,
    /// Optional course code, e.g. "210244".
    pub code: Option<String>,
    /// Short semester code such as "SEM3".
    pub semester: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::practical::Entity")]
    Practical,

    #[sea_orm(has_many = "super::submission::Entity")]
    Submission,
}

impl Related<super::practical::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Practical.def()
    }
}

impl Related<super::submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        name: &str,
        code: Option<&str>,
        semester: &str,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let subject = ActiveModel {
            name: Set(name.to_owned()),
            code: Set(code.map(str::to_owned)),
            semester: Set(semester.to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        subject.insert(db).await
    }

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// All subjects ordered by semester, then name.
    pub async fn find_all(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_asc(Column::Semester)
            .order_by_asc(Column::Name)
            .all(db)
            .await
    }

    /// Partial update; `None` keeps the stored value. `code: Some(None)` clears the code.
    pub async fn update(
        db: &DbConn,
        id: i64,
        name: Option<&str>,
        code: Option<Option<&str>>,
        semester: Option<&str>,
    ) -> Result<Model, DbErr> {
        let existing = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Subject {id} not found")))?;

        let mut active: ActiveModel = existing.into();
        if let Some(name) = name {
            active.name = Set(name.to_owned());
        }
        if let Some(code) = code {
            active.code = Set(code.map(str::to_owned));
        }
        if let Some(semester) = semester {
            active.semester = Set(semester.to_owned());
        }
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    pub async fn delete(db: &DbConn, id: i64) -> Result<(), DbErr> {
        Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }

    /// Whether any practical or submission still points at this subject.
    pub async fn is_referenced(db: &DbConn, id: i64) -> Result<bool, DbErr> {
        let practicals = super::practical::Entity::find()
            .filter(super::practical::Column::SubjectId.eq(id))
            .count(db)
            .await?;
        if practicals > 0 {
            return Ok(true);
        }

        let submissions = super::submission::Entity::find()
            .filter(super::submission::Column::SubjectId.eq(id))
            .count(db)
            .await?;
        Ok(submissions > 0)
    }
}
