/// The GraphQL endpoint
///
/// One POST handler for the whole API surface. Identity is resolved here,
/// before schema execution, and injected into the request data together
/// with the session handle so resolvers can read and write both.
///
/// # Endpoints
///
/// - `POST /graphql` - execute a GraphQL operation
/// - `GET /graphql` - GraphiQL playground (not mounted in production)

use crate::{app::AppState, identity::resolve_identity};
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse},
};
use tower_sessions::Session;

/// Executes a GraphQL operation
///
/// The session extractor must run before the request body is consumed,
/// so it sits ahead of `GraphQLRequest` in the argument list.
pub async fn graphql_handler(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let identity = resolve_identity(&state, &session, &headers).await;

    let req = req.into_inner().data(session).data(identity);

    state.schema.execute(req).await.into()
}

/// Serves the GraphiQL playground (development only)
pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}
