/// Task model
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     title VARCHAR(200) NOT NULL,
///     description TEXT,
///     "order" INTEGER NOT NULL DEFAULT 0,
///     project_id BIGINT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// A task cannot exist without a project; the cascade removes tasks when
/// their project is deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID (assigned by the store)
    pub id: i64,

    /// Title, at most 200 characters
    pub title: String,

    /// Free-form description
    pub description: Option<String>,

    /// Caller-assigned ranking
    pub order: i32,

    /// Owning project
    pub project_id: i64,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last mutated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub order: i32,
    pub project_id: i64,
}
