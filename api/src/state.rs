use sea_orm::DatabaseConnection;
use services::LifecycleSettings;
use services::notification::Notifier;
use services::practical_service::PracticalService;
use services::remote_repository::RemoteRepository;
use services::subject_service::SubjectService;
use services::submission_service::SubmissionService;
use std::sync::Arc;

/// Shared handles every route needs: the record store, the remote repository client
/// and the notifier.
///
/// Cloned into each request by axum; all fields are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    repo: Arc<dyn RemoteRepository>,
    notifier: Arc<dyn Notifier>,
    settings: Arc<LifecycleSettings>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        repo: Arc<dyn RemoteRepository>,
        notifier: Arc<dyn Notifier>,
        settings: LifecycleSettings,
    ) -> Self {
        Self {
            db,
            repo,
            notifier,
            settings: Arc::new(settings),
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn repo(&self) -> &dyn RemoteRepository {
        self.repo.as_ref()
    }

    pub fn submissions(&self) -> SubmissionService<'_> {
        SubmissionService::new(&self.db, self.repo.as_ref(), self.notifier.as_ref(), &self.settings)
    }

    pub fn practicals(&self) -> PracticalService<'_> {
        PracticalService::new(&self.db, self.repo.as_ref(), &self.settings)
    }

    pub fn subjects(&self) -> SubjectService<'_> {
        SubjectService::new(&self.db)
    }
}
