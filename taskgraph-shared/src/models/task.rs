/// Task model and database operations
///
/// Tasks are the user-facing resource of the system. Every task belongs to
/// exactly one user and is only mutable or deletable by that owner; the
/// resolver layer enforces the ownership check, and `delete_owned` scopes
/// the delete to both id and owner as a backstop.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('pending', 'in_progress', 'completed');
///
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     status task_status NOT NULL DEFAULT 'pending',
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskgraph_shared::models::task::{CreateTask, Task, TaskStatus};
/// # use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let task = Task::create(&pool, CreateTask {
///     title: "Write report".to_string(),
///     description: Some("Q3 numbers".to_string()),
///     status: TaskStatus::Pending,
///     user_id: 1,
/// }).await?;
///
/// let mine = Task::list_by_owner(&pool, 1).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Task status
///
/// New tasks default to `Pending`. There is no state machine here; any
/// status can be set by the owner at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

impl TaskStatus {
    /// Status as its wire (GraphQL) name
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Completed => "COMPLETED",
        }
    }
}

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task id
    pub id: i64,

    /// Title
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Current status
    pub status: TaskStatus,

    /// Owning user id (foreign key to users)
    pub user_id: i64,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Task row joined with its owner's public fields
///
/// Produced by the list queries so the resolver layer can attach owner
/// info without a second round-trip per task.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskWithOwner {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Owner's display name
    pub owner_name: String,

    /// Owner's email
    pub owner_email: String,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub user_id: i64,
}

/// Input for partially updating a task
///
/// Only non-None fields are written; `updated_at` is always bumped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
}

const TASK_COLUMNS: &str = "id, title, description, status, user_id, created_at, updated_at";

impl Task {
    /// Creates a new task owned by `data.user_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the owner does not exist (foreign key
    /// violation) or the connection fails.
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, status, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, status, user_id, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by id
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE id = $1",
            TASK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks with owner info attached, newest first
    pub async fn list_with_owner(pool: &PgPool) -> Result<Vec<TaskWithOwner>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, TaskWithOwner>(
            r#"
            SELECT t.id, t.title, t.description, t.status, t.user_id,
                   t.created_at, t.updated_at,
                   u.name AS owner_name, u.email AS owner_email
            FROM tasks t
            JOIN users u ON u.id = t.user_id
            ORDER BY t.created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists tasks owned by one user, with owner info attached, newest first
    pub async fn list_by_owner(pool: &PgPool, user_id: i64) -> Result<Vec<TaskWithOwner>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, TaskWithOwner>(
            r#"
            SELECT t.id, t.title, t.description, t.status, t.user_id,
                   t.created_at, t.updated_at,
                   u.name AS owner_name, u.email AS owner_email
            FROM tasks t
            JOIN users u ON u.id = t.user_id
            WHERE t.user_id = $1
            ORDER BY t.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Partially updates a task
    ///
    /// Only non-None fields in `data` are written; `updated_at` is set to
    /// the current time either way. Ownership is checked by the caller
    /// before this is invoked.
    ///
    /// # Returns
    ///
    /// The updated task if found, None if no task with that id exists
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build the update set dynamically from the present fields
        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(", status = ${}", bind_count));
        }

        query.push_str(&format!(" WHERE id = $1 RETURNING {}", TASK_COLUMNS));

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(status) = data.status {
            q = q.bind(status);
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Deletes a task scoped to both id and owner
    ///
    /// The owner id is part of the WHERE clause, so a non-owner can never
    /// remove the row even if the resolver-level check were bypassed.
    ///
    /// # Returns
    ///
    /// True if a row was removed, false if no row matched both id and owner
    pub async fn delete_owned(pool: &PgPool, id: i64, user_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_default_is_pending() {
        assert_eq!(TaskStatus::default(), TaskStatus::Pending);
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(TaskStatus::Pending.as_str(), "PENDING");
        assert_eq!(TaskStatus::InProgress.as_str(), "IN_PROGRESS");
        assert_eq!(TaskStatus::Completed.as_str(), "COMPLETED");
    }

    #[test]
    fn test_status_serde_uses_wire_names() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");

        let back: TaskStatus = serde_json::from_str("\"COMPLETED\"").unwrap();
        assert_eq!(back, TaskStatus::Completed);
    }

    #[test]
    fn test_update_task_default_is_empty() {
        let update = UpdateTask::default();
        assert!(update.title.is_none());
        assert!(update.description.is_none());
        assert!(update.status.is_none());
    }
}
