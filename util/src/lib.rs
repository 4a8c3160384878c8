//! Shared utilities for the code portal backend.

pub mod config;
