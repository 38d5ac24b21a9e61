/// Common test utilities for database-backed integration tests
///
/// This module provides shared infrastructure for tests that run against a
/// real Postgres:
/// - Test database setup and migrations
/// - Test user creation with unique emails
/// - Schema execution helpers with an injected identity
/// - Cleanup that cascades from the test user
///
/// The suite is gated on `DATABASE_URL`: when the variable is unset the
/// tests return early, so the unit suites stay runnable without Postgres.

use async_graphql::Request;
use sqlx::PgPool;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use taskgraph_api::{
    config::{ApiConfig, Config, DatabaseConfig, JwtConfig, SessionConfig},
    graphql::{build_schema, TaskgraphSchema},
    identity::{CurrentUser, Identity},
};
use taskgraph_shared::models::user::{CreateUser, User};

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub schema: TaskgraphSchema,
    pub user: User,
}

impl TestContext {
    /// Creates a new test context against `DATABASE_URL`
    ///
    /// Returns None when `DATABASE_URL` is not set, so callers can skip.
    pub async fn new() -> anyhow::Result<Option<Self>> {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping database-backed test");
            return Ok(None);
        };

        let db = PgPool::connect(&url).await?;

        // Run migrations (path relative to Cargo.toml, not this file)
        sqlx::migrate!("../taskgraph-shared/migrations").run(&db).await?;

        let user = create_user(&db, "owner").await?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 4000,
                production: false,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url,
                max_connections: 2,
            },
            jwt: JwtConfig {
                secret: "test-secret-key-at-least-32-bytes-long".to_string(),
            },
            session: SessionConfig {
                cookie_name: "taskgraph.sid".to_string(),
                secure: false,
            },
        };

        let schema = build_schema(db.clone(), Arc::new(config));

        Ok(Some(TestContext { db, schema, user }))
    }

    /// Executes an operation as the context's test user
    pub async fn execute_as_user(&self, query: &str) -> async_graphql::Response {
        self.execute_as(query, self.user.id).await
    }

    /// Executes an operation as an arbitrary user id
    pub async fn execute_as(&self, query: &str, user_id: i64) -> async_graphql::Response {
        let request = Request::new(query.to_string())
            .data(Identity(Some(CurrentUser { id: user_id })));
        self.schema.execute(request).await
    }

    /// Executes an operation with no identity
    pub async fn execute_anonymous(&self, query: &str) -> async_graphql::Response {
        let request = Request::new(query.to_string()).data(Identity(None));
        self.schema.execute(request).await
    }

    /// Cleans up test data
    ///
    /// Deleting the test user cascades to its tasks.
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        remove_user(&self.db, self.user.id).await
    }
}

/// Creates a test user with a unique email
pub async fn create_user(db: &PgPool, prefix: &str) -> anyhow::Result<User> {
    let user = User::create(
        db,
        CreateUser {
            name: format!("Test User {}", prefix),
            email: unique_email(prefix),
            // Not used; register/login tests hash their own
            password_hash: "test_hash".to_string(),
        },
    )
    .await?;

    Ok(user)
}

/// Deletes a user row, cascading to its tasks
pub async fn remove_user(db: &PgPool, user_id: i64) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(())
}

/// Generates an email unique across parallel tests
pub fn unique_email(prefix: &str) -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be past the epoch")
        .subsec_nanos();

    format!("test-{}-{}-{}@example.com", prefix, nanos, n)
}

/// Extracts the GraphQL data payload as JSON
pub fn data_json(response: &async_graphql::Response) -> serde_json::Value {
    serde_json::to_value(&response.data).expect("response data should serialize")
}

/// Asserts the single error on a response carries the given code
pub fn assert_error_code(response: &async_graphql::Response, code: &str, message: &str) {
    assert_eq!(
        response.errors.len(),
        1,
        "expected exactly one error: {:?}",
        response.errors
    );
    assert_eq!(response.errors[0].message, message);
    assert!(
        format!("{:?}", response.errors[0].extensions).contains(code),
        "expected code {} in {:?}",
        code,
        response.errors[0].extensions
    );
}
