//! # Taskgraph Shared Library
//!
//! This crate contains the database layer, models, and authentication
//! primitives shared by the Taskgraph GraphQL API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models (`User`, `Task`) and their CRUD operations
//! - `auth`: Password hashing, JWT tokens, session conventions
//! - `db`: Connection pooling and migrations

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Taskgraph shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
