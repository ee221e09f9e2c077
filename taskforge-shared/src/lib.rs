//! # Taskforge Shared Library
//!
//! This crate contains the types and business logic shared by the Taskforge
//! API server and its test harness.
//!
//! ## Module Organization
//!
//! - `models`: Database models and owner-scoped queries
//! - `auth`: Password hashing and bearer-token utilities
//! - `analytics`: On-demand task rollups
//! - `db`: Connection pool and migration runner

pub mod analytics;
pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Taskforge shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
