//! Task handlers

use super::{effective_role, require_role};
use crate::api::rest::state::AppState;
use crate::auth::Session;
use crate::error::{ApiError, ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use taskforge_engine::Operation;
use taskforge_store::{ProjectStore, TaskStore};
use taskforge_types::{AccountId, AssignmentId, ProjectId, Task};

/// Create task request
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub assignment_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub assigned_to: Vec<String>,
}

/// Create task response
#[derive(Debug, Serialize)]
pub struct CreateTaskResponse {
    pub success: bool,
    pub message: String,
    pub task: Task,
}

/// Create a task under an assignment log (Project Manager)
pub async fn create_task(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<CreateTaskResponse>)> {
    require_role(&state, &session, Operation::CreateTask).await?;

    let assigned_to: BTreeSet<AccountId> =
        request.assigned_to.into_iter().map(AccountId::new).collect();

    let task = state
        .directory
        .create_task(
            &AssignmentId::new(request.assignment_id),
            &request.title,
            &request.description,
            assigned_to,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateTaskResponse {
            success: true,
            message: format!("task {} created", task.id),
            task,
        }),
    ))
}

/// Project tasks response
#[derive(Debug, Serialize)]
pub struct ProjectTasksResponse {
    pub success: bool,
    pub tasks: Vec<Task>,
}

/// List the tasks recorded against a project
pub async fn project_tasks(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> ApiResult<Json<ProjectTasksResponse>> {
    effective_role(&state, &session).await?;

    let project_id = ProjectId::new(&id);
    if state.store.get_project(&project_id).await?.is_none() {
        return Err(ApiError::NotFound(format!("project {} not found", id)));
    }

    let tasks = state.store.list_tasks_for_project(&project_id).await?;

    Ok(Json(ProjectTasksResponse {
        success: true,
        tasks,
    }))
}
