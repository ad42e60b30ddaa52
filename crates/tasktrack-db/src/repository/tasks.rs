//! Task operations
//!
//! Every query here is scoped by owner: callers pass the authenticated user id
//! and rows belonging to anyone else are never read, changed, or removed.

use sqlx::Row;

use crate::error::DbError;
use crate::models::{NewTask, Task, TaskStatus};
use crate::repository::Database;
use crate::utils::{format_timestamp, now_micros};

impl Database {
    // ==================== Task Operations ====================

    /// Insert a new task in the `Pending` state
    pub async fn insert_task(&self, task: NewTask) -> Result<Task, DbError> {
        let now = now_micros();
        let status = TaskStatus::Pending;

        let result = sqlx::query(
            r#"
            INSERT INTO tasks (user_id, title, description, status, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(task.user_id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(status.as_str())
        .bind(format_timestamp(&now))
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = result.get("id");

        Ok(Task {
            id,
            user_id: task.user_id,
            title: task.title,
            description: task.description,
            status,
            created_at: now,
        })
    }

    /// List a user's tasks, most recent first
    pub async fn list_tasks(&self, user_id: i64) -> Result<Vec<Task>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, title, description, status, created_at
            FROM tasks
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Task::try_from(row).map_err(DbError::from))
            .collect()
    }

    /// Set the status of a task owned by `user_id`
    ///
    /// Returns `false` when no row matched, whether the task does not exist
    /// or belongs to another user.
    pub async fn update_task_status(
        &self,
        user_id: i64,
        task_id: i64,
        status: TaskStatus,
    ) -> Result<bool, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET status = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(status.as_str())
        .bind(task_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a task owned by `user_id`; same `false` semantics as the update
    pub async fn delete_task(&self, user_id: i64, task_id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
            .bind(task_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
