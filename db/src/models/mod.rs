pub mod admin;
pub mod practical;
pub mod subject;
pub mod submission;

pub use admin::Entity as Admin;
pub use practical::Entity as Practical;
pub use subject::Entity as Subject;
pub use submission::Entity as Submission;
