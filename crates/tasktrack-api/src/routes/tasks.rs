//! Task routes
//!
//! All handlers take the caller as an `AuthUser` and pass its id into the
//! owner-scoped database operations.

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use tasktrack_auth::AuthUser;
use tasktrack_db::{NewTask, TaskStatus};
use tracing::{debug, info};

use crate::error::{ApiError, AppJson};
use crate::state::AppState;

use super::types::{CreateTaskRequest, MessageResponse, TaskResponse, UpdateTaskRequest};

// ==================== Input Validation ====================

/// Maximum allowed title length
const MAX_TITLE_LENGTH: usize = 200;
/// Maximum allowed description length
const MAX_DESCRIPTION_LENGTH: usize = 5000;

fn validate_task(request: &CreateTaskRequest) -> Result<(), ApiError> {
    if request.title.trim().is_empty() {
        return Err(ApiError::BadRequest("Title cannot be empty".to_string()));
    }
    if request.title.chars().count() > MAX_TITLE_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Title exceeds maximum length of {} characters",
            MAX_TITLE_LENGTH
        )));
    }
    if request.description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Description exceeds maximum length of {} characters",
            MAX_DESCRIPTION_LENGTH
        )));
    }
    Ok(())
}

fn parse_task_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest("Invalid task ID".to_string()))
}

// ==================== Task Routes ====================

/// GET /tasks
async fn list_tasks(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<AppJson<Vec<TaskResponse>>, ApiError> {
    let tasks = state.db.list_tasks(user.id).await?;

    debug!("Listing {} tasks for user {}", tasks.len(), user.id);

    Ok(AppJson(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// POST /tasks
async fn create_task(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateTaskRequest>,
) -> Result<(StatusCode, AppJson<TaskResponse>), ApiError> {
    validate_task(&request)?;

    let task = state
        .db
        .insert_task(NewTask {
            user_id: user.id,
            title: request.title,
            description: request.description,
        })
        .await?;

    info!("User {} created task {}", user.id, task.id);

    Ok((StatusCode::CREATED, AppJson(TaskResponse::from(task))))
}

/// PUT /tasks/{id}
async fn update_task(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(request): AppJson<UpdateTaskRequest>,
) -> Result<AppJson<MessageResponse>, ApiError> {
    let task_id = parse_task_id(&id)?;

    // Validate before touching the store
    let status: TaskStatus = request
        .status
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid status value".to_string()))?;

    let updated = state.db.update_task_status(user.id, task_id, status).await?;
    if !updated {
        return Err(ApiError::NotFound(
            "Task not found or you do not have permission to update it".to_string(),
        ));
    }

    info!("User {} set task {} to {}", user.id, task_id, status);

    Ok(AppJson(MessageResponse::new("Task updated successfully")))
}

/// DELETE /tasks/{id}
async fn delete_task(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<AppJson<MessageResponse>, ApiError> {
    let task_id = parse_task_id(&id)?;

    let deleted = state.db.delete_task(user.id, task_id).await?;
    if !deleted {
        return Err(ApiError::NotFound(
            "Task not found or you do not have permission to delete it".to_string(),
        ));
    }

    info!("User {} deleted task {}", user.id, task_id);

    Ok(AppJson(MessageResponse::new("Task deleted successfully")))
}

/// Create task routes
///
/// These are the protected routes; the caller is expected to wrap them in
/// the `require_auth` layer.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", put(update_task).delete(delete_task))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, description: &str) -> CreateTaskRequest {
        CreateTaskRequest {
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_validate_task() {
        assert!(validate_task(&request("Buy milk", "")).is_ok());
        assert!(validate_task(&request("", "desc")).is_err());
        assert!(validate_task(&request("  \t", "desc")).is_err());
        assert!(validate_task(&request(&"t".repeat(MAX_TITLE_LENGTH), "")).is_ok());
        assert!(validate_task(&request(&"t".repeat(MAX_TITLE_LENGTH + 1), "")).is_err());
        assert!(validate_task(&request("t", &"d".repeat(MAX_DESCRIPTION_LENGTH + 1))).is_err());
    }

    #[test]
    fn test_parse_task_id() {
        assert_eq!(parse_task_id("17").unwrap(), 17);
        assert!(parse_task_id("abc").is_err());
        assert!(parse_task_id("1.5").is_err());
        assert!(parse_task_id("").is_err());
    }
}
