/// Project model
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id BIGSERIAL PRIMARY KEY,
///     title VARCHAR(200) NOT NULL,
///     description TEXT,
///     "order" INTEGER NOT NULL DEFAULT 0,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Projects own their tasks (deleting a project cascades to its tasks) and
/// hold at most [`crate::models::MAX_PROJECT_MEMBERS`] members via the
/// `project_users` join table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Project record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID (assigned by the store)
    pub id: i64,

    /// Title, at most 200 characters
    pub title: String,

    /// Free-form description
    pub description: Option<String>,

    /// Caller-assigned ranking
    pub order: i32,

    /// When the project was created
    pub created_at: DateTime<Utc>,

    /// When the project was last mutated
    pub updated_at: DateTime<Utc>,
}

/// A project together with its current member count, as returned by listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub project: Project,
    pub user_count: i64,
}

/// Input for creating a new project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: Option<String>,
    pub order: i32,
}
