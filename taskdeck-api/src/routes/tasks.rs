/// Task endpoints
///
/// # Endpoints
///
/// - `GET /api/tasks/` - List all tasks
/// - `GET /api/tasks/project/:id/?email=&page=&per_page=` - Paginated listing
///   of one project's tasks, restricted to project members
///
/// Pagination is 1-indexed. An out-of-range page yields an empty page with
/// correct totals, not an error.

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult, ValidationErrorDetail},
    membership,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use taskdeck_shared::models::Task;
use validator::Validate;

/// Upper bound applied to per_page to keep response sizes sane.
const MAX_PER_PAGE: i64 = 100;

/// Query parameters for the per-project task listing
///
/// Pagination params arrive as raw strings so that a non-numeric value falls
/// into the structured validation error shape instead of an extractor 400.
#[derive(Debug, Deserialize, Validate)]
pub struct ProjectTasksQuery {
    /// Email of the requesting user; must belong to a project member
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    /// 1-indexed page number, default 1
    pub page: Option<String>,

    /// Page size, default 10, clamped to 100
    pub per_page: Option<String>,
}

/// Parses a pagination parameter, requiring a positive integer.
fn parse_positive_param(raw: Option<&str>, field: &str, default: i64) -> Result<i64, ApiError> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    match raw.parse::<i64>() {
        Ok(value) if value >= 1 => Ok(value),
        _ => Err(ApiError::ValidationError(vec![ValidationErrorDetail {
            field: field.to_string(),
            message: format!("{} must be a positive integer", field),
        }])),
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub pages: i64,
}

/// List response
#[derive(Debug, Serialize)]
pub struct TasksListResponse {
    pub status: &'static str,
    pub count: usize,
    pub tasks: Vec<Task>,
}

/// Per-project listing response
#[derive(Debug, Serialize)]
pub struct ProjectTasksResponse {
    pub status: &'static str,
    pub project_id: i64,
    pub user_email: String,
    pub pagination: Pagination,
    pub tasks: Vec<Task>,
}

/// `GET /api/tasks/`
///
/// Lists all tasks in insertion order.
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<TasksListResponse>> {
    let tasks = state.store.list_tasks().await?;

    Ok(Json(TasksListResponse {
        status: "success",
        count: tasks.len(),
        tasks,
    }))
}

/// `GET /api/tasks/project/:id/`
///
/// Returns one page of the project's tasks (ordered by id) with total-count
/// metadata. The supplied email must belong to a member of the project.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: missing/invalid email or pagination params
/// - `404 Not Found`: project does not exist
/// - `403 Forbidden`: email does not belong to a project member
pub async fn list_project_tasks(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    Query(query): Query<ProjectTasksQuery>,
) -> ApiResult<Json<ProjectTasksResponse>> {
    query.validate().map_err(validation_error)?;

    let email = query.email.ok_or_else(|| {
        ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "email".to_string(),
            message: "Missing required parameter: email".to_string(),
        }])
    })?;

    let page = parse_positive_param(query.page.as_deref(), "page", 1)?;
    let per_page = parse_positive_param(query.per_page.as_deref(), "per_page", 10)?.min(MAX_PER_PAGE);

    let project = state
        .store
        .find_project(project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    if !membership::is_member_email(state.store.as_ref(), project.id, &email).await? {
        return Err(ApiError::Forbidden(
            "User is not a member of this project".to_string(),
        ));
    }

    let total = state.store.count_tasks_by_project(project.id).await?;
    // Saturate so an absurdly large page stays an empty page, not an overflow
    let offset = (page - 1).saturating_mul(per_page);
    let tasks = state
        .store
        .list_tasks_by_project(project.id, per_page, offset)
        .await?;

    let pages = if total == 0 {
        0
    } else {
        (total + per_page - 1) / per_page
    };

    Ok(Json(ProjectTasksResponse {
        status: "success",
        project_id: project.id,
        user_email: email,
        pagination: Pagination {
            page,
            per_page,
            total,
            pages,
        },
        tasks,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive_param_defaults_when_absent() {
        assert_eq!(parse_positive_param(None, "page", 1).unwrap(), 1);
        assert_eq!(parse_positive_param(None, "per_page", 10).unwrap(), 10);
    }

    #[test]
    fn test_parse_positive_param_accepts_integers() {
        assert_eq!(parse_positive_param(Some("7"), "page", 1).unwrap(), 7);
    }

    #[test]
    fn test_parse_positive_param_rejects_garbage_and_zero() {
        for raw in ["abc", "0", "-1", "1.5", ""] {
            let err = parse_positive_param(Some(raw), "page", 1).unwrap_err();
            assert!(matches!(err, ApiError::ValidationError(_)));
        }
    }
}
