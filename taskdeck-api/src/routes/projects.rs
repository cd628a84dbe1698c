/// Project endpoints
///
/// # Endpoints
///
/// - `GET /api/projects/` - List all projects with member counts
/// - `POST /api/projects/:id/users/` - Add a user to a project by email
///
/// The add-member endpoint is the only write path for memberships; the cap
/// is enforced in `membership::add_member_by_email`.

use crate::{
    app::AppState,
    error::{validation_error, ApiResult},
    membership,
};
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskdeck_shared::models::{Project, ProjectSummary};
use validator::Validate;

/// Add member request
#[derive(Debug, Deserialize, Validate)]
pub struct AddMemberRequest {
    /// Email of an existing user to add
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Project as exposed over the API, including its member count
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_count: i64,
}

impl ProjectResponse {
    fn new(project: Project, user_count: i64) -> Self {
        Self {
            id: project.id,
            title: project.title,
            description: project.description,
            order: project.order,
            created_at: project.created_at,
            updated_at: project.updated_at,
            user_count,
        }
    }
}

impl From<ProjectSummary> for ProjectResponse {
    fn from(summary: ProjectSummary) -> Self {
        Self::new(summary.project, summary.user_count)
    }
}

/// List response
#[derive(Debug, Serialize)]
pub struct ProjectsListResponse {
    pub status: &'static str,
    pub count: usize,
    pub projects: Vec<ProjectResponse>,
}

/// Membership change response
#[derive(Debug, Serialize)]
pub struct MemberAddedResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub project: ProjectResponse,
}

/// `GET /api/projects/`
///
/// Lists all projects with their current member counts.
pub async fn list_projects(
    State(state): State<AppState>,
) -> ApiResult<Json<ProjectsListResponse>> {
    let projects = state.store.list_projects().await?;

    Ok(Json(ProjectsListResponse {
        status: "success",
        count: projects.len(),
        projects: projects.into_iter().map(ProjectResponse::from).collect(),
    }))
}

/// `POST /api/projects/:id/users/`
///
/// Adds the user identified by email to the project.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: invalid email
/// - `404 Not Found`: project or user does not exist
/// - `409 Conflict`: user is already a member
/// - `400 Bad Request` (`capacity_exceeded`): project already has 3 members
pub async fn add_project_member(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    Json(req): Json<AddMemberRequest>,
) -> ApiResult<Json<MemberAddedResponse>> {
    req.validate().map_err(validation_error)?;

    let (project, user_count) =
        membership::add_member_by_email(state.store.as_ref(), project_id, &req.email).await?;

    Ok(Json(MemberAddedResponse {
        status: "success",
        message: "User added to project",
        project: ProjectResponse::new(project, user_count),
    }))
}
