/// Mutation resolvers
///
/// Authentication:
/// - `register` creates a user and returns a bearer token; it does not
///   establish a session.
/// - `login` checks credentials, binds the user id into the server-side
///   session, and also returns a bearer token for cookie-less clients.
/// - `logout` flushes the session; idempotent.
///
/// Task mutations require an identity and, for update/delete, ownership
/// of the target task. NotFound and Forbidden are reported distinctly.

use crate::{
    error::ApiError,
    graphql::types::{AuthPayload, TaskObject, TaskStatus, UserObject},
    identity::{CurrentUser, Identity},
};
use async_graphql::{Context, ErrorExtensions, Object, Result, ID};
use sqlx::PgPool;
use taskgraph_shared::{
    auth::{jwt, password, session::SESSION_USER_ID_KEY},
    models::{
        task::{CreateTask, Task, UpdateTask},
        user::{CreateUser, User},
    },
};
use tower_sessions::Session;

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Registers a new account and returns the user with a bearer token
    ///
    /// Fails with `CONFLICT` when the email is already registered.
    async fn register(
        &self,
        ctx: &Context<'_>,
        #[graphql(validator(min_length = 1, max_length = 100))] name: String,
        #[graphql(validator(email))] email: String,
        #[graphql(validator(min_length = 8))] password: String,
    ) -> Result<AuthPayload> {
        let pool = ctx.data::<PgPool>()?;

        // Checked up front for a clean error; the unique constraint on
        // email backstops the race with a concurrent registration.
        if User::find_by_email(pool, &email)
            .await
            .map_err(|e| ApiError::from(e).extend())?
            .is_some()
        {
            return Err(ApiError::Conflict("Email already exists".to_string()).extend());
        }

        let password_hash =
            password::hash_password(&password).map_err(|e| ApiError::from(e).extend())?;

        let user = User::create(
            pool,
            CreateUser {
                name,
                email,
                password_hash,
            },
        )
        .await
        .map_err(|e| ApiError::from(e).extend())?;

        let token = issue_token(ctx, user.id)?;

        Ok(AuthPayload {
            user: user.into(),
            token,
        })
    }

    /// Logs in, establishing a server-side session and returning a token
    ///
    /// Unknown email and wrong password fail identically with
    /// `UNAUTHORIZED`, without revealing which was wrong.
    async fn login(&self, ctx: &Context<'_>, email: String, password: String) -> Result<AuthPayload> {
        let pool = ctx.data::<PgPool>()?;

        let user = User::find_by_email(pool, &email)
            .await
            .map_err(|e| ApiError::from(e).extend())?
            .ok_or_else(|| invalid_credentials().extend())?;

        let valid = password::verify_password(&password, &user.password_hash)
            .map_err(|e| ApiError::from(e).extend())?;
        if !valid {
            return Err(invalid_credentials().extend());
        }

        // Bind the session to the user
        let session = ctx.data::<Session>()?;
        session
            .insert(SESSION_USER_ID_KEY, user.id)
            .await
            .map_err(|e| {
                ApiError::Internal(format!("Failed to persist session: {}", e)).extend()
            })?;

        User::update_last_login(pool, user.id)
            .await
            .map_err(|e| ApiError::from(e).extend())?;

        let token = issue_token(ctx, user.id)?;

        Ok(AuthPayload {
            user: user.into(),
            token,
        })
    }

    /// Invalidates the current session; idempotent
    async fn logout(&self, ctx: &Context<'_>) -> Result<bool> {
        let session = ctx.data::<Session>()?;

        session.flush().await.map_err(|e| {
            ApiError::Internal(format!("Failed to destroy session: {}", e)).extend()
        })?;

        Ok(true)
    }

    /// Creates a task owned by the caller
    ///
    /// `status` defaults to `PENDING` when absent.
    async fn create_task(
        &self,
        ctx: &Context<'_>,
        #[graphql(validator(min_length = 1, max_length = 255))] title: String,
        description: Option<String>,
        status: Option<TaskStatus>,
    ) -> Result<TaskObject> {
        let caller = ctx.data::<Identity>()?.require().map_err(|e| e.extend())?;
        let pool = ctx.data::<PgPool>()?;

        let task = Task::create(
            pool,
            CreateTask {
                title,
                description,
                status: status.map(Into::into).unwrap_or_default(),
                user_id: caller.id,
            },
        )
        .await
        .map_err(|e| ApiError::from(e).extend())?;

        let owner = load_owner(pool, caller).await?;
        Ok(TaskObject::project(task, owner))
    }

    /// Partially updates a task the caller owns
    ///
    /// Only supplied fields change. Fails with `NOT_FOUND` for an unknown
    /// id and `FORBIDDEN` when the caller is not the owner.
    async fn update_task(
        &self,
        ctx: &Context<'_>,
        id: ID,
        title: Option<String>,
        description: Option<String>,
        status: Option<TaskStatus>,
    ) -> Result<TaskObject> {
        let caller = ctx.data::<Identity>()?.require().map_err(|e| e.extend())?;
        let pool = ctx.data::<PgPool>()?;
        let task_id = parse_id(&id).map_err(|e| e.extend())?;

        let existing = Task::find_by_id(pool, task_id)
            .await
            .map_err(|e| ApiError::from(e).extend())?
            .ok_or_else(|| task_not_found().extend())?;

        if existing.user_id != caller.id {
            return Err(not_task_owner().extend());
        }

        let task = Task::update(
            pool,
            task_id,
            UpdateTask {
                title,
                description,
                status: status.map(Into::into),
            },
        )
        .await
        .map_err(|e| ApiError::from(e).extend())?
        .ok_or_else(|| task_not_found().extend())?;

        let owner = load_owner(pool, caller).await?;
        Ok(TaskObject::project(task, owner))
    }

    /// Deletes a task the caller owns
    ///
    /// The delete itself is scoped to both id and owner; a row that
    /// vanishes between the check and the delete reports `NOT_FOUND`.
    async fn delete_task(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let caller = ctx.data::<Identity>()?.require().map_err(|e| e.extend())?;
        let pool = ctx.data::<PgPool>()?;
        let task_id = parse_id(&id).map_err(|e| e.extend())?;

        let existing = Task::find_by_id(pool, task_id)
            .await
            .map_err(|e| ApiError::from(e).extend())?
            .ok_or_else(|| task_not_found().extend())?;

        if existing.user_id != caller.id {
            return Err(not_task_owner().extend());
        }

        let deleted = Task::delete_owned(pool, task_id, caller.id)
            .await
            .map_err(|e| ApiError::from(e).extend())?;

        if !deleted {
            return Err(task_not_found().extend());
        }

        Ok(true)
    }
}

/// Issues a 1-hour bearer token for a user
fn issue_token(ctx: &Context<'_>, user_id: i64) -> Result<String> {
    let config = ctx.data::<std::sync::Arc<crate::config::Config>>()?;
    let claims = jwt::Claims::new(user_id);

    jwt::create_token(&claims, &config.jwt.secret).map_err(|e| ApiError::from(e).extend())
}

/// Loads the caller's public fields for attaching as task owner
async fn load_owner(pool: &PgPool, caller: CurrentUser) -> Result<Option<UserObject>> {
    let owner = User::find_by_id(pool, caller.id)
        .await
        .map_err(|e| ApiError::from(e).extend())?;

    Ok(owner.map(UserObject::from))
}

/// Parses a GraphQL ID into a numeric row id
fn parse_id(id: &ID) -> Result<i64, ApiError> {
    id.parse::<i64>()
        .map_err(|_| ApiError::Validation(format!("Invalid id: {}", id.as_str())))
}

fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized("Invalid email or password".to_string())
}

fn task_not_found() -> ApiError {
    ApiError::NotFound("Task not found".to_string())
}

fn not_task_owner() -> ApiError {
    ApiError::Forbidden("Unauthorized access to task".to_string())
}
