/// Authentication primitives for Taskgraph
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: JWT token generation and validation (HS256, 1 hour expiry)
/// - [`session`]: Conventions for the server-side session payload
///
/// Sessions and tokens are two independent credentials for the same
/// identity: a request is authenticated by an active session when one
/// exists, falling back to a bearer token otherwise.

pub mod jwt;
pub mod password;
pub mod session;
