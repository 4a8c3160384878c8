use crate::error::LifecycleError;
use db::models::subject::Model as SubjectModel;
use sea_orm::DatabaseConnection;
use tracing::info;
use validator::Validate;

#[derive(Debug, Clone, Validate)]
pub struct CreateSubject {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub code: Option<String>,
    #[validate(length(min = 1, message = "Semester is required"))]
    pub semester: String,
}

/// Partial update. `code: Some(None)` clears the course code.
#[derive(Debug, Clone, Default)]
pub struct UpdateSubject {
    pub name: Option<String>,
    pub code: Option<Option<String>>,
    pub semester: Option<String>,
}

fn blank_to_none(code: Option<String>) -> Option<String> {
    code.map(|c| c.trim().to_owned()).filter(|c| !c.is_empty())
}

pub struct SubjectService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SubjectService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<SubjectModel>, LifecycleError> {
        Ok(SubjectModel::find_all(self.db).await?)
    }

    pub async fn get(&self, id: i64) -> Result<SubjectModel, LifecycleError> {
        SubjectModel::find_by_id(self.db, id)
            .await?
            .ok_or_else(|| LifecycleError::NotFound(format!("Subject {id} not found")))
    }

    pub async fn create(&self, input: CreateSubject) -> Result<SubjectModel, LifecycleError> {
        let input = CreateSubject {
            name: input.name.trim().to_owned(),
            code: blank_to_none(input.code),
            semester: input.semester.trim().to_owned(),
        };
        input.validate()?;

        let subject =
            SubjectModel::create(self.db, &input.name, input.code.as_deref(), &input.semester)
                .await?;
        info!(subject_id = subject.id, name = %subject.name, "Subject created");
        Ok(subject)
    }

    pub async fn update(&self, id: i64, input: UpdateSubject) -> Result<SubjectModel, LifecycleError> {
        self.get(id).await?;

        let name = input.name.as_deref().map(str::trim);
        let semester = input.semester.as_deref().map(str::trim);
        if name == Some("") {
            return Err(LifecycleError::Validation("Name cannot be empty".into()));
        }
        if semester == Some("") {
            return Err(LifecycleError::Validation("Semester cannot be empty".into()));
        }
        let code = input.code.map(blank_to_none);

        // Renaming does not move files already published under the old folder.
        let subject = SubjectModel::update(
            self.db,
            id,
            name,
            code.as_ref().map(|c| c.as_deref()),
            semester,
        )
        .await?;
        info!(subject_id = id, "Subject updated");
        Ok(subject)
    }

    /// Deletes a subject that no practical or submission refers to.
    pub async fn delete(&self, id: i64) -> Result<(), LifecycleError> {
        self.get(id).await?;

        if SubjectModel::is_referenced(self.db, id).await? {
            return Err(LifecycleError::InUse(format!(
                "Subject {id} still has practicals or submissions"
            )));
        }

        SubjectModel::delete(self.db, id).await?;
        info!(subject_id = id, "Subject deleted");
        Ok(())
    }
}
