pub mod app;

pub use app::{TestApp, make_test_app, make_test_app_with};
