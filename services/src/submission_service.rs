//! The submission lifecycle: intake, approval and rejection.
//!
//! Approval runs as a short saga:
//!
//! 1. claim the submission with a `pending → publishing` compare-and-swap,
//! 2. publish the code to a free path in the remote repository,
//! 3. in one transaction, create the Practical and move `publishing → approved`,
//! 4. notify the submitter (best-effort).
//!
//! A failure in step 2 releases the claim. A failure in step 3 deletes the published
//! file and releases the claim; if that delete also fails the submission stays in
//! `publishing` and [`LifecycleError::PartialPublish`] names the orphaned path.

use crate::error::{LifecycleError, code_not_blank, title_fits};
use crate::identity::AdminIdentity;
use crate::naming;
use crate::notification::{self, Notifier};
use crate::publish;
use crate::remote_repository::RemoteRepository;
use crate::settings::LifecycleSettings;
use db::models::practical::Model as PracticalModel;
use db::models::subject::Model as SubjectModel;
use db::models::submission::{Model as SubmissionModel, NewSubmission, SubmissionStatus};
use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};
use tracing::{error, info, warn};
use validator::Validate;

/// Student-supplied fields for a new submission.
#[derive(Debug, Clone, Validate)]
pub struct CreateSubmission {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
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
    /// Falls back to the configured default when absent or blank.
    pub extension: Option<String>,
}

impl CreateSubmission {
    fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            title: self.title.trim().to_owned(),
            description: self.description.trim().to_owned(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Decision {
    Approve,
    Reject,
}

impl Decision {
    fn verb(self) -> &'static str {
        match self {
            Decision::Approve => "approve",
            Decision::Reject => "reject",
        }
    }
}

/// Only `pending` submissions can be decided.
fn check_decidable(status: SubmissionStatus, decision: Decision) -> Result<(), LifecycleError> {
    match (status, decision) {
        (SubmissionStatus::Pending, _) => Ok(()),
        (SubmissionStatus::Approved, Decision::Approve) => Err(LifecycleError::AlreadyDecided),
        (SubmissionStatus::Rejected, Decision::Reject) => Err(LifecycleError::AlreadyRejected),
        (from, decision) => Err(LifecycleError::InvalidTransition {
            from,
            action: decision.verb(),
        }),
    }
}

pub struct SubmissionService<'a> {
    db: &'a DatabaseConnection,
    repo: &'a dyn RemoteRepository,
    notifier: &'a dyn Notifier,
    settings: &'a LifecycleSettings,
}

impl<'a> SubmissionService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        repo: &'a dyn RemoteRepository,
        notifier: &'a dyn Notifier,
        settings: &'a LifecycleSettings,
    ) -> Self {
        Self {
            db,
            repo,
            notifier,
            settings,
        }
    }

    /// Records a new `pending` submission. No remote or notification side effects.
    pub async fn submit(&self, input: CreateSubmission) -> Result<SubmissionModel, LifecycleError> {
        let input = input.trimmed();
        input.validate()?;

        let extension = match input.extension.as_deref().map(str::trim) {
            None | Some("") => self.settings.default_extension.clone(),
            Some(raw) => naming::normalize_extension(raw).ok_or_else(|| {
                LifecycleError::Validation(format!("Invalid file extension {raw:?}"))
            })?,
        };

        if SubjectModel::find_by_id(self.db, input.subject_id).await?.is_none() {
            return Err(LifecycleError::Validation(format!(
                "Subject {} does not exist",
                input.subject_id
            )));
        }

        let submission = SubmissionModel::create(
            self.db,
            NewSubmission {
                name: input.name,
                email: input.email,
                subject_id: input.subject_id,
                title: input.title,
                description: input.description,
                code: input.code,
                extension,
            },
        )
        .await?;

        info!(
            submission_id = submission.id,
            subject_id = submission.subject_id,
            "Submission received"
        );
        Ok(submission)
    }

    pub async fn list(&self) -> Result<Vec<SubmissionModel>, LifecycleError> {
        Ok(SubmissionModel::find_all(self.db).await?)
    }

    /// Pending submissions with their subject populated.
    pub async fn list_pending(
        &self,
    ) -> Result<Vec<(SubmissionModel, Option<SubjectModel>)>, LifecycleError> {
        Ok(SubmissionModel::find_by_status_with_subject(self.db, SubmissionStatus::Pending).await?)
    }

    /// Publishes a pending submission and records it as a Practical.
    pub async fn approve(
        &self,
        admin: &AdminIdentity,
        submission_id: i64,
    ) -> Result<PracticalModel, LifecycleError> {
        let submission = self.load(submission_id).await?;
        check_decidable(submission.status, Decision::Approve)?;

        let subject = SubjectModel::find_by_id(self.db, submission.subject_id)
            .await?
            .ok_or_else(|| {
                LifecycleError::NotFound(format!("Subject {} not found", submission.subject_id))
            })?;

        if submission.code.trim().is_empty() {
            return Err(LifecycleError::EmptyCode);
        }

        if !SubmissionModel::transition(
            self.db,
            submission_id,
            SubmissionStatus::Pending,
            SubmissionStatus::Publishing,
        )
        .await?
        {
            return Err(self.explain_lost_claim(submission_id, Decision::Approve).await);
        }
        info!(submission_id, admin_id = admin.id(), "Approval claimed, publishing");

        let coordinates = self.repo.coordinates();
        let folder = naming::folder_path(&coordinates.root_folder, &subject.semester, &subject.name);
        let extension = if submission.extension.is_empty() {
            self.settings.default_extension.as_str()
        } else {
            submission.extension.as_str()
        };
        let message = format!("Approve student submission: {}", submission.title);

        let path = match publish::publish_new_file(
            self.repo,
            &folder,
            &submission.title,
            extension,
            submission.code.as_bytes(),
            &message,
        )
        .await
        {
            Ok(path) => path,
            Err(e) => {
                warn!(submission_id, error = %e, "Publishing failed, releasing claim");
                self.release_claim(submission_id).await;
                return Err(e);
            }
        };

        let code_link = coordinates.blob_url(&path);
        let practical = match self.record_approval(&submission, &code_link).await {
            Ok(practical) => practical,
            Err(e) => return Err(self.compensate(submission_id, &path, e).await),
        };

        info!(
            submission_id,
            practical_id = practical.id,
            admin_id = admin.id(),
            %path,
            "Submission approved"
        );

        let notice = notification::approval_notice(&submission, &code_link, &self.settings.portal_name);
        notification::deliver(self.notifier, notice, self.settings.notify_timeout).await;

        Ok(practical)
    }

    /// Rejects a pending submission with a reason. Never touches the remote repository.
    pub async fn reject(
        &self,
        admin: &AdminIdentity,
        submission_id: i64,
        reason: &str,
    ) -> Result<SubmissionModel, LifecycleError> {
        let submission = self.load(submission_id).await?;
        check_decidable(submission.status, Decision::Reject)?;

        let reason = reason.trim();
        if reason.is_empty() {
            return Err(LifecycleError::Validation(
                "A rejection reason is required".into(),
            ));
        }

        if !SubmissionModel::reject(self.db, submission_id, reason).await? {
            return Err(self.explain_lost_claim(submission_id, Decision::Reject).await);
        }
        info!(submission_id, admin_id = admin.id(), "Submission rejected");

        let rejected = self.load(submission_id).await?;
        let notice = notification::rejection_notice(&rejected, reason, &self.settings.portal_name);
        notification::deliver(self.notifier, notice, self.settings.notify_timeout).await;

        Ok(rejected)
    }

    async fn load(&self, submission_id: i64) -> Result<SubmissionModel, LifecycleError> {
        SubmissionModel::find_by_id(self.db, submission_id)
            .await?
            .ok_or_else(|| LifecycleError::NotFound(format!("Submission {submission_id} not found")))
    }

    /// Creates the Practical and finalizes the status in one transaction.
    async fn record_approval(
        &self,
        submission: &SubmissionModel,
        code_link: &str,
    ) -> Result<PracticalModel, DbErr> {
        let txn = self.db.begin().await?;

        let practical = PracticalModel::create(
            &txn,
            submission.subject_id,
            &submission.title,
            &submission.description,
            Some(code_link),
        )
        .await?;

        let finalized = SubmissionModel::transition(
            &txn,
            submission.id,
            SubmissionStatus::Publishing,
            SubmissionStatus::Approved,
        )
        .await?;
        if !finalized {
            txn.rollback().await?;
            return Err(DbErr::Custom(format!(
                "submission {} left the publishing state during approval",
                submission.id
            )));
        }

        txn.commit().await?;
        Ok(practical)
    }

    /// Undoes a publish whose records could not be written.
    async fn compensate(&self, submission_id: i64, path: &str, cause: DbErr) -> LifecycleError {
        error!(submission_id, path, error = %cause, "Recording approval failed, removing published file");

        let message = format!("Revert unrecorded publish: {path}");
        match publish::remove_file(self.repo, path, &message).await {
            Ok(_) => {
                self.release_claim(submission_id).await;
                LifecycleError::Database(cause)
            }
            Err(remote) => {
                error!(
                    submission_id,
                    path,
                    error = %remote,
                    "Compensating delete failed, file is orphaned and submission left in publishing"
                );
                LifecycleError::PartialPublish {
                    path: path.to_owned(),
                }
            }
        }
    }

    async fn release_claim(&self, submission_id: i64) {
        match SubmissionModel::transition(
            self.db,
            submission_id,
            SubmissionStatus::Publishing,
            SubmissionStatus::Pending,
        )
        .await
        {
            Ok(true) => {}
            Ok(false) => warn!(submission_id, "Claim already released"),
            Err(e) => error!(submission_id, error = %e, "Failed to release approval claim"),
        }
    }

    /// Maps a failed compare-and-swap to the guard error for the state that won.
    async fn explain_lost_claim(&self, submission_id: i64, decision: Decision) -> LifecycleError {
        match self.load(submission_id).await {
            Ok(current) => match check_decidable(current.status, decision) {
                Err(e) => e,
                Ok(()) => LifecycleError::Conflict(format!(
                    "Submission {submission_id} changed concurrently, retry the request"
                )),
            },
            Err(e) => e,
        }
    }
}
