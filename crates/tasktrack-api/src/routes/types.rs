//! Request/Response DTOs

use serde::{Deserialize, Serialize};
use tasktrack_db::Task;

// ==================== Auth Types ====================

/// Registration and login request
#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Registration response
#[derive(Serialize)]
pub struct RegisterResponse {
    pub message: String,
    #[serde(rename = "userID")]
    pub user_id: i64,
}

/// Login response
#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64,
}

// ==================== Task Types ====================

/// Create task request
#[derive(Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Update task request
///
/// `status` stays a string here so that unknown values can be reported as
/// a validation error rather than a decoding error.
#[derive(Deserialize)]
pub struct UpdateTaskRequest {
    pub status: String,
}

/// Task response
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub status: String,
    pub created_at: String,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            user_id: task.user_id,
            title: task.title,
            description: task.description,
            status: task.status.as_str().to_string(),
            created_at: task.created_at.to_rfc3339(),
        }
    }
}

/// Plain acknowledgement
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
