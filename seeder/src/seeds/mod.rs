pub mod admin;
pub mod subject;
pub mod submission;
