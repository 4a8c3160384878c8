pub mod auth;
pub mod mail;
pub mod response;
pub mod routes;
pub mod state;
