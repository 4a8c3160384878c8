pub mod m202510010001_create_admins;
pub mod m202510010002_create_subjects;
pub mod m202510010003_create_practicals;
pub mod m202510010004_create_submissions;
