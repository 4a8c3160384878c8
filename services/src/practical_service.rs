//! Admin-managed practicals.
//!
//! A practical's code lives in the remote repository; the record keeps only the link.
//! Remote changes go first so a failed push never leaves a record describing code that
//! isn't there.

use crate::error::{LifecycleError, code_not_blank, title_fits};
use crate::identity::AdminIdentity;
use crate::naming;
use crate::publish;
use crate::remote_repository::RemoteRepository;
use crate::settings::LifecycleSettings;
use db::models::practical::Model as PracticalModel;
use db::models::subject::Model as SubjectModel;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{error, info, warn};
use validator::Validate;

#[derive(Debug, Clone, Validate)]
pub struct CreatePractical {
    pub subject_id: i64,
    #[validate(
        length(min = 1, message = "Title is required"),
        custom(function = "title_fits")
    )]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(custom(function = "code_not_blank"))]
    pub code: String,
    pub extension: Option<String>,
}

/// Partial update. `None` leaves the field alone.
#[derive(Debug, Clone, Default)]
pub struct UpdatePractical {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
}

/// A practical together with its code fetched from the repository.
#[derive(Debug, Clone, Serialize)]
pub struct PracticalWithCode {
    #[serde(flatten)]
    pub practical: PracticalModel,
    pub raw_url: Option<String>,
    /// `None` when the file could not be fetched.
    pub code: Option<String>,
}

pub struct PracticalService<'a> {
    db: &'a DatabaseConnection,
    repo: &'a dyn RemoteRepository,
    settings: &'a LifecycleSettings,
}

impl<'a> PracticalService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        repo: &'a dyn RemoteRepository,
        settings: &'a LifecycleSettings,
    ) -> Self {
        Self { db, repo, settings }
    }

    pub async fn list(&self) -> Result<Vec<(PracticalModel, Option<SubjectModel>)>, LifecycleError> {
        Ok(PracticalModel::find_all_with_subject(self.db).await?)
    }

    pub async fn get(&self, id: i64) -> Result<PracticalModel, LifecycleError> {
        PracticalModel::find_by_id(self.db, id)
            .await?
            .ok_or_else(|| LifecycleError::NotFound(format!("Practical {id} not found")))
    }

    /// Practicals of one subject with their code inlined.
    ///
    /// A file that cannot be fetched is logged and returned with `code: None`; it does
    /// not fail the listing.
    pub async fn list_for_subject(
        &self,
        subject_id: i64,
    ) -> Result<Vec<PracticalWithCode>, LifecycleError> {
        if SubjectModel::find_by_id(self.db, subject_id).await?.is_none() {
            return Err(LifecycleError::NotFound(format!("Subject {subject_id} not found")));
        }

        let coordinates = self.repo.coordinates();
        let practicals = PracticalModel::find_by_subject(self.db, subject_id).await?;
        let mut out = Vec::with_capacity(practicals.len());

        for practical in practicals {
            let path = practical
                .code_link
                .as_deref()
                .and_then(|link| coordinates.path_from_link(link));

            let (raw_url, code) = match path {
                Some(path) => {
                    let code = match self.repo.read_file(&path).await {
                        Ok(file) => Some(String::from_utf8_lossy(&file.content).into_owned()),
                        Err(e) => {
                            warn!(practical_id = practical.id, %path, error = %e, "Failed to fetch practical code");
                            None
                        }
                    };
                    (Some(coordinates.raw_url(&path)), code)
                }
                None => (None, None),
            };

            out.push(PracticalWithCode {
                practical,
                raw_url,
                code,
            });
        }

        Ok(out)
    }

    /// Publishes `code` under the subject's folder and records the practical.
    pub async fn create(
        &self,
        admin: &AdminIdentity,
        input: CreatePractical,
    ) -> Result<PracticalModel, LifecycleError> {
        let input = CreatePractical {
            title: input.title.trim().to_owned(),
            description: input.description.trim().to_owned(),
            ..input
        };
        input.validate()?;

        let extension = match input.extension.as_deref().map(str::trim) {
            None | Some("") => self.settings.default_extension.clone(),
            Some(raw) => naming::normalize_extension(raw).ok_or_else(|| {
                LifecycleError::Validation(format!("Invalid file extension {raw:?}"))
            })?,
        };

        let subject = SubjectModel::find_by_id(self.db, input.subject_id)
            .await?
            .ok_or_else(|| {
                LifecycleError::NotFound(format!("Subject {} not found", input.subject_id))
            })?;

        let coordinates = self.repo.coordinates();
        let folder = naming::folder_path(&coordinates.root_folder, &subject.semester, &subject.name);
        let path = publish::publish_new_file(
            self.repo,
            &folder,
            &input.title,
            &extension,
            input.code.as_bytes(),
            &format!("Add practical: {}", input.title),
        )
        .await?;
        let code_link = coordinates.blob_url(&path);

        match PracticalModel::create(
            self.db,
            subject.id,
            &input.title,
            &input.description,
            Some(&code_link),
        )
        .await
        {
            Ok(practical) => {
                info!(practical_id = practical.id, admin_id = admin.id(), %path, "Practical created");
                Ok(practical)
            }
            Err(cause) => {
                error!(%path, error = %cause, "Recording practical failed, removing published file");
                let message = format!("Revert unrecorded publish: {path}");
                match publish::remove_file(self.repo, &path, &message).await {
                    Ok(_) => Err(cause.into()),
                    Err(remote) => {
                        error!(%path, error = %remote, "Compensating delete failed, file is orphaned");
                        Err(LifecycleError::PartialPublish { path })
                    }
                }
            }
        }
    }

    /// Updates descriptive fields and, if given, the published code.
    pub async fn update(
        &self,
        admin: &AdminIdentity,
        id: i64,
        input: UpdatePractical,
    ) -> Result<PracticalModel, LifecycleError> {
        let existing = self.get(id).await?;

        let title = input.title.as_deref().map(str::trim);
        let description = input.description.as_deref().map(str::trim);
        if title == Some("") {
            return Err(LifecycleError::Validation("Title cannot be empty".into()));
        }
        if title.is_some_and(|t| t.chars().count() > naming::MAX_TITLE_CHARS) {
            return Err(LifecycleError::Validation(format!(
                "Title must be at most {} characters",
                naming::MAX_TITLE_CHARS
            )));
        }
        if description == Some("") {
            return Err(LifecycleError::Validation("Description cannot be empty".into()));
        }

        if let Some(code) = &input.code {
            if code.trim().is_empty() {
                return Err(LifecycleError::Validation("Code cannot be empty".into()));
            }
            let path = self.published_path(&existing)?.ok_or_else(|| {
                LifecycleError::Validation("Practical has no published file to update".into())
            })?;
            let message = format!("Update practical: {}", title.unwrap_or(existing.title.as_str()));
            publish::update_file(self.repo, &path, code.as_bytes(), &message).await?;
        }

        let updated = PracticalModel::update(self.db, id, title, description).await?;
        info!(practical_id = id, admin_id = admin.id(), code_changed = input.code.is_some(), "Practical updated");
        Ok(updated)
    }

    /// Deletes the published file, then the record. An already-missing file is not an error.
    pub async fn delete(&self, admin: &AdminIdentity, id: i64) -> Result<(), LifecycleError> {
        let existing = self.get(id).await?;

        if let Some(path) = self.published_path(&existing)? {
            let message = format!("Remove practical: {}", existing.title);
            if !publish::remove_file(self.repo, &path, &message).await? {
                warn!(practical_id = id, %path, "Published file was already gone");
            }
        }

        PracticalModel::delete(self.db, id).await?;
        info!(practical_id = id, admin_id = admin.id(), "Practical deleted");
        Ok(())
    }

    /// Repository path behind the practical's link, if it has one.
    fn published_path(&self, practical: &PracticalModel) -> Result<Option<String>, LifecycleError> {
        match practical.code_link.as_deref() {
            None => Ok(None),
            Some(link) => self
                .repo
                .coordinates()
                .path_from_link(link)
                .map(Some)
                .ok_or_else(|| {
                    LifecycleError::Validation(format!(
                        "Code link {link} does not point into the configured repository"
                    ))
                }),
        }
    }
}
