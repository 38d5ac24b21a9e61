/// Database models for Taskgraph
///
/// # Models
///
/// - `user`: Registered accounts and credential storage
/// - `task`: Tasks owned by a user, with a three-state status
///
/// Both models expose async CRUD operations over a `PgPool`. The
/// Task↔User relationship is fixed in the schema (foreign key), not wired
/// up at runtime.

pub mod task;
pub mod user;
