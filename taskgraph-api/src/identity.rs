/// Per-request identity resolution
///
/// Every GraphQL request resolves an identity before the schema executes:
///
/// 1. An active server-side session wins. The session holds the user id;
///    the user row is verified to still exist, and a dangling session
///    (user deleted) is flushed.
/// 2. Otherwise an `Authorization: Bearer <jwt>` header is decoded.
/// 3. Otherwise the request proceeds with no identity. Resolution never
///    fails the request; operations that need an identity reject it with
///    an `UNAUTHORIZED` error themselves.
///
/// The resolved [`Identity`] is injected into the GraphQL request data and
/// read by resolvers via [`Identity::require`].

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::http::{header, HeaderMap};
use taskgraph_shared::{
    auth::{jwt, session::SESSION_USER_ID_KEY},
    models::user::User,
};
use tower_sessions::Session;
use tracing::debug;

/// The authenticated caller of the current request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    /// User id, matches `users.id`
    pub id: i64,
}

/// Resolved identity for one request, possibly absent
#[derive(Debug, Clone, Default)]
pub struct Identity(pub Option<CurrentUser>);

impl Identity {
    /// Returns the caller, or `Unauthorized` when the request carries no
    /// identity
    pub fn require(&self) -> ApiResult<CurrentUser> {
        self.0
            .ok_or_else(|| ApiError::Unauthorized("Unauthorized".to_string()))
    }

    /// The caller's user id, if any
    pub fn user_id(&self) -> Option<i64> {
        self.0.map(|u| u.id)
    }
}

/// Resolves the identity for a request
///
/// Session first, bearer token second, no identity otherwise. All failure
/// paths are logged at debug and fall open to `Identity(None)`.
pub async fn resolve_identity(state: &AppState, session: &Session, headers: &HeaderMap) -> Identity {
    // 1. Active server-side session
    match session.get::<i64>(SESSION_USER_ID_KEY).await {
        Ok(Some(user_id)) => match User::find_by_id(&state.db, user_id).await {
            Ok(Some(user)) => return Identity(Some(CurrentUser { id: user.id })),
            Ok(None) => {
                // Session points at a user that no longer exists
                debug!(user_id, "Flushing session for missing user");
                if let Err(e) = session.flush().await {
                    debug!("Failed to flush dangling session: {}", e);
                }
            }
            Err(e) => {
                debug!("User lookup during identity resolution failed: {}", e);
            }
        },
        Ok(None) => {}
        Err(e) => {
            debug!("Session read failed: {}", e);
        }
    }

    // 2. Bearer token fallback
    if let Some(token) = bearer_token(headers) {
        match jwt::validate_token(token, state.jwt_secret()) {
            Ok(claims) => return Identity(Some(CurrentUser { id: claims.sub })),
            Err(e) => {
                debug!("Bearer token rejected: {}", e);
            }
        }
    }

    // 3. No identity; not an error
    Identity(None)
}

/// Extracts the bearer token from the Authorization header, if present
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_without_identity() {
        let identity = Identity::default();
        let err = identity.require().unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn test_require_with_identity() {
        let identity = Identity(Some(CurrentUser { id: 9 }));
        assert_eq!(identity.require().unwrap().id, 9);
        assert_eq!(identity.user_id(), Some(9));
    }

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));

        headers.insert(header::AUTHORIZATION, "Basic dXNlcg==".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }
}
