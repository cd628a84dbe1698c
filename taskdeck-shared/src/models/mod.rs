/// Entity types for taskdeck
///
/// This module contains the persistent entity types and the input structs
/// used to create and update them. All database access goes through the
/// `store` module; the types here are plain data.
///
/// # Models
///
/// - `user`: User accounts
/// - `project`: Projects with a bounded member list
/// - `task`: Tasks owned by a project
/// - `membership`: Project-user membership pairs and the member cap

pub mod membership;
pub mod project;
pub mod task;
pub mod user;

pub use membership::{Membership, MAX_PROJECT_MEMBERS};
pub use project::{CreateProject, Project, ProjectSummary};
pub use task::{CreateTask, Task};
pub use user::{CreateUser, UpdateUser, User};
