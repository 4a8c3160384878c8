mod auth_test;
mod github_test;
mod health_test;
mod practicals_test;
mod subjects_test;
mod submissions_test;
