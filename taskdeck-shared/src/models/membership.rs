/// Project membership model
///
/// Memberships are the many-to-many relation between projects and users.
/// A user may belong to any number of projects, but a project holds at most
/// [`MAX_PROJECT_MEMBERS`] users.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE project_users (
///     project_id BIGINT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     assigned_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     PRIMARY KEY (project_id, user_id)
/// );
/// ```
///
/// The composite primary key rejects duplicate pairs at the schema level.
/// The member cap is enforced inside `Store::add_member`, which is the only
/// write path for this table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of users a single project may hold.
pub const MAX_PROJECT_MEMBERS: i64 = 3;

/// Membership record linking one user to one project
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Membership {
    /// Project ID
    pub project_id: i64,

    /// User ID
    pub user_id: i64,

    /// When the user was added to the project
    pub assigned_at: DateTime<Utc>,
}
