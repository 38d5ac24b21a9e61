/// GraphQL schema for the Taskgraph API
///
/// One schema, four queries, six mutations. The database pool and the
/// application config are schema-level data; the per-request session and
/// resolved identity are injected by the HTTP handler before execution.
///
/// # Example
///
/// ```no_run
/// use taskgraph_api::graphql::build_schema;
/// # use std::sync::Arc;
/// # use sqlx::PgPool;
/// # use taskgraph_api::config::Config;
///
/// # fn example(pool: PgPool, config: Arc<Config>) {
/// let schema = build_schema(pool, config);
/// println!("{}", schema.sdl());
/// # }
/// ```

pub mod mutation;
pub mod query;
pub mod types;

use crate::config::Config;
use async_graphql::{EmptySubscription, Schema};
use mutation::MutationRoot;
use query::QueryRoot;
use sqlx::PgPool;
use std::sync::Arc;

/// The executable schema type
pub type TaskgraphSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the schema with its long-lived data attached
pub fn build_schema(pool: PgPool, config: Arc<Config>) -> TaskgraphSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(pool)
        .data(config)
        .finish()
}
