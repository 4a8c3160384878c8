use super::subject;
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Review state of a submission.
///
/// `pending → approved` and `pending → rejected` are the only decisions. `publishing`
/// marks an approval that has claimed the submission and is pushing code to the
/// repository; it returns to `pending` if the push fails.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(
    rs_type = "String",
    db_type = "Enum",
    enum_name = "submission_status_enum"
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SubmissionStatus {
    #[sea_orm(string_value = "pending")]
    Pending,

    #[sea_orm(string_value = "publishing")]
    Publishing,

    #[sea_orm(string_value = "approved")]
    Approved,

    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl Default for SubmissionStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// A student-authored code sample awaiting an admin decision.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Submitter's name.
    pub name: String,
    /// Where decision notifications go.
    pub email: String,
    pub subject_id: i64,
    pub title: String,
    pub description: String,
    /// Raw code body.
    pub code: String,
    /// File suffix including the leading dot, e.g. ".py".
    pub extension: String,
    pub status: SubmissionStatus,
    /// Set if and only if `status` is `rejected`.
    pub rejection_reason: Option<String>,
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

/// Field values for a new submission.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub name: String,
    pub email: String,
    pub subject_id: i64,
    pub title: String,
    pub description: String,
    pub code: String,
    pub extension: String,
}

impl Model {
    /// Inserts a submission in the `pending` state.
    pub async fn create(db: &DbConn, new: NewSubmission) -> Result<Model, DbErr> {
        let now = Utc::now();
        let submission = ActiveModel {
            name: Set(new.name),
            email: Set(new.email),
            subject_id: Set(new.subject_id),
            title: Set(new.title),
            description: Set(new.description),
            code: Set(new.code),
            extension: Set(new.extension),
            status: Set(SubmissionStatus::Pending),
            rejection_reason: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        submission.insert(db).await
    }

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn find_all(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find().order_by_asc(Column::Id).all(db).await
    }

    /// Submissions in `status`, each paired with its subject when it still resolves.
    pub async fn find_by_status_with_subject(
        db: &DbConn,
        status: SubmissionStatus,
    ) -> Result<Vec<(Model, Option<subject::Model>)>, DbErr> {
        Entity::find()
            .filter(Column::Status.eq(status))
            .find_also_related(subject::Entity)
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    /// Compare-and-swap on `status`: moves the submission from `from` to `to` only if
    /// the stored status still equals `from`. Returns whether the row changed.
    pub async fn transition<C: ConnectionTrait>(
        db: &C,
        id: i64,
        from: SubmissionStatus,
        to: SubmissionStatus,
    ) -> Result<bool, DbErr> {
        let result = Entity::update_many()
            .set(ActiveModel {
                status: Set(to),
                updated_at: Set(Utc::now()),
                ..Default::default()
            })
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(from))
            .exec(db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Compare-and-swap `pending → rejected`, storing `reason` in the same statement.
    pub async fn reject<C: ConnectionTrait>(db: &C, id: i64, reason: &str) -> Result<bool, DbErr> {
        let result = Entity::update_many()
            .set(ActiveModel {
                status: Set(SubmissionStatus::Rejected),
                rejection_reason: Set(Some(reason.to_owned())),
                updated_at: Set(Utc::now()),
                ..Default::default()
            })
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(SubmissionStatus::Pending))
            .exec(db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
