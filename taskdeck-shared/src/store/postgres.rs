/// PostgreSQL store implementation
///
/// Implements [`Store`] over a sqlx connection pool. Email uniqueness is
/// delegated to the `users.email` unique constraint and translated to
/// [`StoreError::DuplicateEmail`]; cascades on `tasks` and `project_users`
/// clean up after user and project deletions.
///
/// `add_member` runs inside a transaction that takes a row lock on the
/// project (`SELECT ... FOR UPDATE`), so concurrent adds against the same
/// project are serialized and the member cap holds.

use crate::models::{
    CreateProject, CreateTask, CreateUser, Membership, Project, ProjectSummary, Task, UpdateUser,
    User, MAX_PROJECT_MEMBERS,
};
use crate::store::{Store, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// Store backed by PostgreSQL
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wraps an existing connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Access to the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Translates unique-constraint violations on users.email into
/// [`StoreError::DuplicateEmail`].
fn map_user_write_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        if let Some(constraint) = db_err.constraint() {
            if constraint.contains("email") {
                return StoreError::DuplicateEmail;
            }
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        crate::db::pool::health_check(&self.pool).await?;
        Ok(())
    }

    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.email)
        .bind(data.password)
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_write_error)?;

        Ok(user)
    }

    async fn find_user(&self, id: i64) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, created_at
            FROM users
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn update_user(&self, id: i64, data: UpdateUser) -> StoreResult<Option<User>> {
        if data.is_empty() {
            return self.find_user(id).await;
        }

        // Build the update from whichever fields are present
        let mut assignments = Vec::new();
        let mut bind_count = 1;

        if data.name.is_some() {
            bind_count += 1;
            assignments.push(format!("name = ${}", bind_count));
        }
        if data.email.is_some() {
            bind_count += 1;
            assignments.push(format!("email = ${}", bind_count));
        }
        if data.password.is_some() {
            bind_count += 1;
            assignments.push(format!("password = ${}", bind_count));
        }

        let query = format!(
            "UPDATE users SET {} WHERE id = $1 RETURNING id, name, email, password, created_at",
            assignments.join(", ")
        );

        let mut q = sqlx::query_as::<_, User>(&query).bind(id);

        if let Some(name) = data.name {
            q = q.bind(name);
        }
        if let Some(email) = data.email {
            q = q.bind(email);
        }
        if let Some(password) = data.password {
            q = q.bind(password);
        }

        let user = q
            .fetch_optional(&self.pool)
            .await
            .map_err(map_user_write_error)?;

        Ok(user)
    }

    async fn delete_user(&self, id: i64) -> StoreResult<bool> {
        // project_users rows go with the user via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_project(&self, data: CreateProject) -> StoreResult<Project> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (title, description, "order")
            VALUES ($1, $2, $3)
            RETURNING id, title, description, "order", created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.order)
        .fetch_one(&self.pool)
        .await?;

        Ok(project)
    }

    async fn find_project(&self, id: i64) -> StoreResult<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, title, description, "order", created_at, updated_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn list_projects(&self) -> StoreResult<Vec<ProjectSummary>> {
        type Row = (
            i64,
            String,
            Option<String>,
            i32,
            DateTime<Utc>,
            DateTime<Utc>,
            i64,
        );

        let rows: Vec<Row> = sqlx::query_as(
            r#"
            SELECT p.id, p.title, p.description, p."order", p.created_at, p.updated_at,
                   COUNT(pu.user_id) AS user_count
            FROM projects p
            LEFT JOIN project_users pu ON pu.project_id = p.id
            GROUP BY p.id
            ORDER BY p.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(
                |(id, title, description, order, created_at, updated_at, user_count)| {
                    ProjectSummary {
                        project: Project {
                            id,
                            title,
                            description,
                            order,
                            created_at,
                            updated_at,
                        },
                        user_count,
                    }
                },
            )
            .collect())
    }

    async fn delete_project(&self, id: i64) -> StoreResult<bool> {
        // tasks and project_users rows go with the project via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_member(&self, project_id: i64, user_id: i64) -> StoreResult<Membership> {
        let mut tx = self.pool.begin().await?;

        // Lock the project row; concurrent adds for the same project queue
        // here, so the count below cannot go stale before the insert commits.
        let locked: Option<i64> =
            sqlx::query_scalar("SELECT id FROM projects WHERE id = $1 FOR UPDATE")
                .bind(project_id)
                .fetch_optional(&mut *tx)
                .await?;

        if locked.is_none() {
            return Err(StoreError::ProjectNotFound);
        }

        let already_member: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM project_users
                WHERE project_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        if already_member {
            return Err(StoreError::AlreadyMember);
        }

        let member_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM project_users WHERE project_id = $1")
                .bind(project_id)
                .fetch_one(&mut *tx)
                .await?;

        if member_count >= MAX_PROJECT_MEMBERS {
            return Err(StoreError::ProjectFull);
        }

        let membership = sqlx::query_as::<_, Membership>(
            r#"
            INSERT INTO project_users (project_id, user_id)
            VALUES ($1, $2)
            RETURNING project_id, user_id, assigned_at
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(membership)
    }

    async fn is_member(&self, project_id: i64, user_id: i64) -> StoreResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM project_users
                WHERE project_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn count_members(&self, project_id: i64) -> StoreResult<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM project_users WHERE project_id = $1")
                .bind(project_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn create_task(&self, data: CreateTask) -> StoreResult<Task> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, "order", project_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, "order", project_id, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.order)
        .bind(data.project_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    async fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, "order", project_id, created_at, updated_at
            FROM tasks
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn list_tasks_by_project(
        &self,
        project_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, "order", project_id, created_at, updated_at
            FROM tasks
            WHERE project_id = $1
            ORDER BY id ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(project_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn count_tasks_by_project(&self, project_id: i64) -> StoreResult<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE project_id = $1")
                .bind(project_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}
