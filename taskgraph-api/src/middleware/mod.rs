/// Middleware for the API server
///
/// - `security`: HTTP security headers on every response

pub mod security;
