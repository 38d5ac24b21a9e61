/// Session conventions
///
/// Server-side sessions are managed by `tower-sessions` with a
/// Postgres-backed store; the cookie carries only the opaque session id.
/// This module pins down the single key the API writes into the session
/// payload so that login, logout, and identity resolution agree on it.

/// Key under which the authenticated user's id is stored in the session
pub const SESSION_USER_ID_KEY: &str = "user_id";
