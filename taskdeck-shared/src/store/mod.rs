/// Entity store abstraction
///
/// All persistence goes through the [`Store`] trait so the API handlers and
/// the membership rule can run against either the real database
/// ([`PgStore`]) or an in-memory fake ([`MemStore`]) in tests.
///
/// # Contract
///
/// - Creates assign identifiers; reads are by integer id; listings are in
///   insertion (id) order.
/// - Updates have merge semantics: only supplied fields overwrite.
/// - Each call is atomic. In particular `add_member` performs its
///   already-member and capacity checks and the insert as one unit, so two
///   concurrent adds can never both observe a count of 2 and push a project
///   past [`MAX_PROJECT_MEMBERS`] members.
/// - `User.email` is unique; violating writes fail with
///   [`StoreError::DuplicateEmail`].
///
/// # Example
///
/// ```
/// use taskdeck_shared::models::{CreateProject, CreateUser};
/// use taskdeck_shared::store::{MemStore, Store, StoreError};
///
/// # async fn example() -> Result<(), StoreError> {
/// let store = MemStore::new();
///
/// let user = store
///     .create_user(CreateUser {
///         name: "John".to_string(),
///         email: "john@example.com".to_string(),
///         password: "secret".to_string(),
///     })
///     .await?;
///
/// let project = store.create_project(CreateProject::default()).await?;
/// store.add_member(project.id, user.id).await?;
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod postgres;

pub use memory::MemStore;
pub use postgres::PgStore;

use crate::models::{
    CreateProject, CreateTask, CreateUser, Membership, Project, ProjectSummary, Task, UpdateUser,
    User, MAX_PROJECT_MEMBERS,
};
use async_trait::async_trait;

/// Store error types
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Another user already holds this email address
    #[error("email already exists")]
    DuplicateEmail,

    /// The user is already a member of the project
    #[error("user is already a member of this project")]
    AlreadyMember,

    /// The project already holds the maximum number of members
    #[error("project already has the maximum of {MAX_PROJECT_MEMBERS} members")]
    ProjectFull,

    /// The referenced project does not exist
    #[error("project not found")]
    ProjectNotFound,

    /// Underlying database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Durable entity store keyed by integer identifiers
#[async_trait]
pub trait Store: Send + Sync {
    /// Verifies the backing storage is reachable.
    async fn ping(&self) -> StoreResult<()>;

    // Users

    /// Creates a user, assigning its id and creation timestamp.
    async fn create_user(&self, data: CreateUser) -> StoreResult<User>;

    /// Looks up a user by id.
    async fn find_user(&self, id: i64) -> StoreResult<Option<User>>;

    /// Looks up a user by email (exact match).
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Lists all users in insertion order.
    async fn list_users(&self) -> StoreResult<Vec<User>>;

    /// Merges the supplied fields into an existing user.
    ///
    /// Returns `None` if the user does not exist.
    async fn update_user(&self, id: i64, data: UpdateUser) -> StoreResult<Option<User>>;

    /// Deletes a user and its membership pairs. Returns whether a row was
    /// removed.
    async fn delete_user(&self, id: i64) -> StoreResult<bool>;

    // Projects

    /// Creates a project, assigning its id and timestamps.
    async fn create_project(&self, data: CreateProject) -> StoreResult<Project>;

    /// Looks up a project by id.
    async fn find_project(&self, id: i64) -> StoreResult<Option<Project>>;

    /// Lists all projects with their member counts, in insertion order.
    async fn list_projects(&self) -> StoreResult<Vec<ProjectSummary>>;

    /// Deletes a project together with its tasks and membership pairs.
    /// Returns whether a row was removed.
    async fn delete_project(&self, id: i64) -> StoreResult<bool>;

    // Membership

    /// Adds a user to a project, enforcing the member cap.
    ///
    /// Fails with [`StoreError::AlreadyMember`] for a duplicate pair and
    /// [`StoreError::ProjectFull`] once the project holds
    /// [`MAX_PROJECT_MEMBERS`] members. The check-then-insert sequence is
    /// atomic with respect to concurrent calls.
    async fn add_member(&self, project_id: i64, user_id: i64) -> StoreResult<Membership>;

    /// Whether the user is a member of the project.
    async fn is_member(&self, project_id: i64, user_id: i64) -> StoreResult<bool>;

    /// Current member count of a project.
    async fn count_members(&self, project_id: i64) -> StoreResult<i64>;

    // Tasks

    /// Creates a task under its owning project.
    async fn create_task(&self, data: CreateTask) -> StoreResult<Task>;

    /// Lists all tasks in insertion order.
    async fn list_tasks(&self) -> StoreResult<Vec<Task>>;

    /// Lists one page of a project's tasks, ordered by id.
    async fn list_tasks_by_project(
        &self,
        project_id: i64,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Task>>;

    /// Total number of tasks in a project.
    async fn count_tasks_by_project(&self, project_id: i64) -> StoreResult<i64>;
}
