/// GraphQL output types and the model-to-output projection
///
/// Model rows never cross the transport boundary directly; one explicit
/// projection maps them to the GraphQL objects below. This replaces the
/// original system's ad-hoc per-resolver row shapes with a single place
/// where null-handling is defined: `description` is the only nullable
/// scalar, and `user` is only present when the owner was joined in (list
/// queries) or known from the request (mutations).

use async_graphql::{Enum, SimpleObject, ID};
use taskgraph_shared::models::{
    task::{Task, TaskStatus as ModelTaskStatus, TaskWithOwner},
    user::User,
};

/// Task status as exposed over GraphQL
#[derive(Debug, Enum, Copy, Clone, Eq, PartialEq)]
#[graphql(name = "TaskStatus")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl From<ModelTaskStatus> for TaskStatus {
    fn from(status: ModelTaskStatus) -> Self {
        match status {
            ModelTaskStatus::Pending => TaskStatus::Pending,
            ModelTaskStatus::InProgress => TaskStatus::InProgress,
            ModelTaskStatus::Completed => TaskStatus::Completed,
        }
    }
}

impl From<TaskStatus> for ModelTaskStatus {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Pending => ModelTaskStatus::Pending,
            TaskStatus::InProgress => ModelTaskStatus::InProgress,
            TaskStatus::Completed => ModelTaskStatus::Completed,
        }
    }
}

/// Public user fields
///
/// The password hash and timestamps never leave the model layer.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "User")]
pub struct UserObject {
    pub id: ID,
    pub name: String,
    pub email: String,
}

impl From<User> for UserObject {
    fn from(user: User) -> Self {
        Self {
            id: ID(user.id.to_string()),
            name: user.name,
            email: user.email,
        }
    }
}

/// A task with its owner attached when known
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Task")]
pub struct TaskObject {
    pub id: ID,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub user: Option<UserObject>,
}

impl TaskObject {
    /// The single model-to-output projection for tasks
    pub fn project(task: Task, owner: Option<UserObject>) -> Self {
        Self {
            id: ID(task.id.to_string()),
            title: task.title,
            description: task.description,
            status: task.status.into(),
            user: owner,
        }
    }
}

impl From<TaskWithOwner> for TaskObject {
    fn from(row: TaskWithOwner) -> Self {
        Self {
            id: ID(row.id.to_string()),
            title: row.title,
            description: row.description,
            status: row.status.into(),
            user: Some(UserObject {
                id: ID(row.user_id.to_string()),
                name: row.owner_name,
                email: row.owner_email,
            }),
        }
    }
}

/// Result of `register` and `login`
#[derive(Debug, Clone, SimpleObject)]
pub struct AuthPayload {
    /// The authenticated user's public fields
    pub user: UserObject,

    /// Signed bearer token carrying the user id, 1 hour expiry
    pub token: String,
}
