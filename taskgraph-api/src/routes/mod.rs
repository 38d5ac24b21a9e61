/// HTTP route handlers
///
/// - `health`: Health check endpoint
/// - `graphql`: The GraphQL endpoint and the GraphiQL playground

pub mod graphql;
pub mod health;
