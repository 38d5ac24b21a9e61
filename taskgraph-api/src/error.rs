/// Error handling for the API server
///
/// One unified error taxonomy for the resolver layer. Instead of
/// collapsing every failure into a generic message, each `ApiError`
/// variant maps to a machine-readable `code` extension on the GraphQL
/// error, so the transport surfaces structure while internal details stay
/// server-side.
///
/// # Taxonomy
///
/// - `Unauthorized`: no resolved identity (or bad credentials)
/// - `Forbidden`: identity present but not the resource owner
/// - `NotFound`: resource id absent
/// - `Conflict`: uniqueness violation (duplicate email)
/// - `Validation`: malformed input
/// - `Internal`: unexpected store/library failure; logged, message not
///   exposed to clients
///
/// # Example
///
/// ```
/// use taskgraph_api::error::ApiError;
/// use async_graphql::ErrorExtensions;
///
/// let err = ApiError::NotFound("Task not found".to_string());
/// let gql = err.extend();
/// assert_eq!(gql.message, "Task not found");
/// ```

use async_graphql::ErrorExtensions;
use taskgraph_shared::auth::{jwt::JwtError, password::PasswordError};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No resolved identity, or invalid credentials
    #[error("{0}")]
    Unauthorized(String),

    /// Identity present but does not own the resource
    #[error("{0}")]
    Forbidden(String),

    /// Resource id absent
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness violation, e.g. duplicate email
    #[error("{0}")]
    Conflict(String),

    /// Malformed input
    #[error("{0}")]
    Validation(String),

    /// Unexpected store or library failure
    #[error("An internal error occurred")]
    Internal(String),
}

impl ApiError {
    /// Machine-readable error code surfaced in GraphQL error extensions
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Validation(_) => "BAD_USER_INPUT",
            ApiError::Internal(_) => "INTERNAL",
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        // Internal details are logged, never sent to the client
        if let ApiError::Internal(detail) = self {
            tracing::error!("Internal error: {}", detail);
        }

        async_graphql::Error::new(self.to_string())
            .extend_with(|_, e| e.set("code", self.code()))
    }
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                // Only the unique constraint on email is a client-facing
                // conflict. Everything else (foreign keys, other unique
                // indexes) is internal; constraint names never reach the
                // client.
                if db_err.is_unique_violation()
                    && db_err.constraint().is_some_and(|c| c.contains("email"))
                {
                    return ApiError::Conflict("Email already exists".to_string());
                }

                ApiError::Internal(format!("Database error: {}", db_err))
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert password errors to API errors
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(format!("Password operation failed: {}", err))
    }
}

/// Convert JWT errors to API errors
impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => ApiError::Unauthorized("Token expired".to_string()),
            JwtError::InvalidIssuer => ApiError::Unauthorized("Invalid token issuer".to_string()),
            _ => ApiError::Unauthorized(format!("Invalid token: {}", err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::ErrorKind;

    /// Minimal DatabaseError for driving the From impl without a live
    /// Postgres connection
    #[derive(Debug)]
    struct StubDbError {
        unique: bool,
        constraint: &'static str,
    }

    impl std::fmt::Display for StubDbError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "constraint violation: {}", self.constraint)
        }
    }

    impl std::error::Error for StubDbError {}

    impl sqlx::error::DatabaseError for StubDbError {
        fn message(&self) -> &str {
            "constraint violation"
        }

        fn kind(&self) -> ErrorKind {
            if self.unique {
                ErrorKind::UniqueViolation
            } else {
                ErrorKind::ForeignKeyViolation
            }
        }

        fn constraint(&self) -> Option<&str> {
            Some(self.constraint)
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }
    }

    fn db_error(unique: bool, constraint: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(StubDbError { unique, constraint }))
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ApiError::Unauthorized("x".into()).code(), "UNAUTHORIZED");
        assert_eq!(ApiError::Forbidden("x".into()).code(), "FORBIDDEN");
        assert_eq!(ApiError::NotFound("x".into()).code(), "NOT_FOUND");
        assert_eq!(ApiError::Conflict("x".into()).code(), "CONFLICT");
        assert_eq!(ApiError::Validation("x".into()).code(), "BAD_USER_INPUT");
        assert_eq!(ApiError::Internal("x".into()).code(), "INTERNAL");
    }

    #[test]
    fn test_internal_message_not_exposed() {
        let err = ApiError::Internal("connection refused at 10.0.0.5".to_string());
        assert_eq!(err.to_string(), "An internal error occurred");
    }

    #[test]
    fn test_extend_sets_code() {
        let gql = ApiError::Forbidden("Unauthorized access to task".to_string()).extend();
        assert_eq!(gql.message, "Unauthorized access to task");

        let extensions = gql.extensions.expect("extensions should be set");
        assert!(format!("{:?}", extensions).contains("FORBIDDEN"));
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: ApiError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_unique_email_violation_maps_to_conflict() {
        let err: ApiError = db_error(true, "users_email_key").into();
        assert!(matches!(err, ApiError::Conflict(_)));
        assert_eq!(err.to_string(), "Email already exists");
    }

    #[test]
    fn test_foreign_key_violation_maps_to_internal() {
        let err: ApiError = db_error(false, "tasks_user_id_fkey").into();
        assert!(matches!(err, ApiError::Internal(_)));

        // The constraint name stays server-side
        assert_eq!(err.to_string(), "An internal error occurred");
        let gql = err.extend();
        assert_eq!(gql.message, "An internal error occurred");
        assert!(format!("{:?}", gql.extensions).contains("INTERNAL"));
    }

    #[test]
    fn test_non_email_unique_violation_maps_to_internal() {
        let err: ApiError = db_error(true, "tasks_pkey").into();
        assert!(matches!(err, ApiError::Internal(_)));
        assert_eq!(err.to_string(), "An internal error occurred");
    }

    #[test]
    fn test_jwt_expired_maps_to_unauthorized() {
        let err: ApiError = JwtError::Expired.into();
        assert!(matches!(err, ApiError::Unauthorized(_)));
        assert_eq!(err.to_string(), "Token expired");
    }
}
