pub mod error;
pub mod identity;
pub mod naming;
pub mod notification;
pub mod practical_service;
pub mod publish;
pub mod remote_repository;
pub mod settings;
pub mod subject_service;
pub mod submission_service;
pub mod test_utils;

pub use error::LifecycleError;
pub use identity::AdminIdentity;
pub use settings::LifecycleSettings;
