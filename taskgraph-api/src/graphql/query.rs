/// Query resolvers
///
/// All user-scoped queries require a resolved identity and reject with an
/// `UNAUTHORIZED` error otherwise. `me` is the exception: an anonymous
/// request gets `null`, not an error, so the frontend can probe for a
/// session without special-casing failures.
///
/// `tasks` was reachable without authentication in earlier revisions of
/// this system; it now requires an identity like every other user-scoped
/// read.

use crate::{
    error::ApiError,
    graphql::types::{TaskObject, UserObject},
    identity::Identity,
};
use async_graphql::{Context, ErrorExtensions, Object, Result};
use sqlx::PgPool;
use taskgraph_shared::models::{task::Task, user::User};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All registered users (public fields only)
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<UserObject>> {
        ctx.data::<Identity>()?.require().map_err(|e| e.extend())?;
        let pool = ctx.data::<PgPool>()?;

        let users = User::list(pool)
            .await
            .map_err(|e| ApiError::from(e).extend())?;

        Ok(users.into_iter().map(UserObject::from).collect())
    }

    /// All tasks, with owner info attached
    async fn tasks(&self, ctx: &Context<'_>) -> Result<Vec<TaskObject>> {
        ctx.data::<Identity>()?.require().map_err(|e| e.extend())?;
        let pool = ctx.data::<PgPool>()?;

        let tasks = Task::list_with_owner(pool)
            .await
            .map_err(|e| ApiError::from(e).extend())?;

        Ok(tasks.into_iter().map(TaskObject::from).collect())
    }

    /// Tasks owned by the caller
    async fn my_tasks(&self, ctx: &Context<'_>) -> Result<Vec<TaskObject>> {
        let caller = ctx.data::<Identity>()?.require().map_err(|e| e.extend())?;
        let pool = ctx.data::<PgPool>()?;

        let tasks = Task::list_by_owner(pool, caller.id)
            .await
            .map_err(|e| ApiError::from(e).extend())?;

        Ok(tasks.into_iter().map(TaskObject::from).collect())
    }

    /// The caller's own public fields; null when unauthenticated
    async fn me(&self, ctx: &Context<'_>) -> Result<Option<UserObject>> {
        let identity = ctx.data::<Identity>()?;

        let Some(user_id) = identity.user_id() else {
            return Ok(None);
        };

        let pool = ctx.data::<PgPool>()?;
        let user = User::find_by_id(pool, user_id)
            .await
            .map_err(|e| ApiError::from(e).extend())?;

        Ok(user.map(UserObject::from))
    }
}
