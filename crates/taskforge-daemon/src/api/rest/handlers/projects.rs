//! Project management handlers

use super::{effective_role, require_role};
use crate::api::rest::state::AppState;
use crate::auth::Session;
use crate::error::{ApiError, ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use taskforge_engine::{ensure_owner, Operation};
use taskforge_store::{AssignmentStore, ProjectStore, TeamStore};
use taskforge_types::{validation, Project, ProjectId, ProjectStatus, Role, TeamId};

/// Create project request
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Create project response
#[derive(Debug, Serialize)]
pub struct CreateProjectResponse {
    pub success: bool,
    pub message: String,
    pub project: Project,
}

/// Create a project (Project Manager)
pub async fn create_project(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<CreateProjectResponse>)> {
    require_role(&state, &session, Operation::CreateProject).await?;

    let project = state
        .directory
        .create_project(&request.title, &request.description, &session.account_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateProjectResponse {
            success: true,
            message: format!("project {} created", project.id),
            project,
        }),
    ))
}

/// List projects response
#[derive(Debug, Serialize)]
pub struct ListProjectsResponse {
    pub success: bool,
    pub projects: Vec<Project>,
}

/// List projects visible to the caller: a Project Manager sees projects it
/// created, team participants see projects assigned to their teams.
pub async fn list_projects(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<ListProjectsResponse>> {
    let role = effective_role(&state, &session).await?;

    let projects = match role {
        Role::ProjectManager => {
            state
                .store
                .list_projects_created_by(&session.account_id)
                .await?
        }
        Role::Admin => state.store.list_projects().await?,
        _ => {
            let team_ids: BTreeSet<TeamId> = state
                .store
                .list_teams()
                .await?
                .into_iter()
                .filter(|t| {
                    t.is_leader(&session.account_id) || t.is_member(&session.account_id)
                })
                .map(|t| t.id)
                .collect();

            let assigned: BTreeSet<ProjectId> = state
                .store
                .list_assignments()
                .await?
                .into_iter()
                .filter(|log| team_ids.contains(&log.team_id))
                .map(|log| log.project_id)
                .collect();

            let mut projects = Vec::with_capacity(assigned.len());
            for project_id in &assigned {
                if let Some(project) = state.store.get_project(project_id).await? {
                    projects.push(project);
                }
            }
            projects
        }
    };

    Ok(Json(ListProjectsResponse {
        success: true,
        projects,
    }))
}

/// List the caller's projects that no assignment log references (Project
/// Manager). This is the picker for the assign workflow.
pub async fn unassigned_projects(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<ListProjectsResponse>> {
    require_role(&state, &session, Operation::AssignProject).await?;

    let projects = state
        .directory
        .unassigned_projects(&session.account_id)
        .await?;

    Ok(Json(ListProjectsResponse {
        success: true,
        projects,
    }))
}

/// Delete project response
#[derive(Debug, Serialize)]
pub struct DeleteProjectResponse {
    pub success: bool,
    pub message: String,
}

/// Delete an unassigned project (Project Manager, owner)
///
/// An assigned project must be unassigned first; deleting it outright
/// would orphan its log and tasks.
pub async fn delete_project(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteProjectResponse>> {
    require_role(&state, &session, Operation::DeleteProjects).await?;

    let project_id = ProjectId::new(&id);
    let project = state
        .store
        .get_project(&project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("project {} not found", id)))?;

    ensure_owner(
        &project.created_by,
        &session.account_id,
        &format!("project {}", id),
    )?;

    if state
        .store
        .get_assignment_for_project(&project_id)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(format!(
            "project {} is assigned; unassign it first",
            id
        )));
    }

    state.store.delete_project(&project_id).await?;

    tracing::info!(project_id = %id, deleted_by = %session.account_id, "project deleted");

    Ok(Json(DeleteProjectResponse {
        success: true,
        message: format!("project {} deleted", id),
    }))
}

/// Update project request
#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
}

/// Update project response
#[derive(Debug, Serialize)]
pub struct UpdateProjectResponse {
    pub success: bool,
    pub message: String,
    pub project: Project,
}

/// Update a project's title, description, or display status (Project
/// Manager, owner)
pub async fn update_project(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Json(request): Json<UpdateProjectRequest>,
) -> ApiResult<Json<UpdateProjectResponse>> {
    require_role(&state, &session, Operation::UpdateProject).await?;

    let project_id = ProjectId::new(&id);
    let mut project = state
        .store
        .get_project(&project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("project {} not found", id)))?;

    ensure_owner(
        &project.created_by,
        &session.account_id,
        &format!("project {}", id),
    )?;

    if let Some(title) = request.title {
        validation::validate_non_empty(&title, "project title")
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        project.title = title.trim().to_string();
    }
    if let Some(description) = request.description {
        project.description = description;
    }
    if let Some(status) = request.status {
        // Unassigned and Assigned mirror the assignment log; only the
        // cascade paths may flip them.
        if status != ProjectStatus::Completed {
            return Err(ApiError::BadRequest(format!(
                "status cannot be set to {}; assign or unassign the project instead",
                status
            )));
        }
        project.status = status;
    }
    project.updated_at = Utc::now();

    state.store.update_project(project.clone()).await?;

    Ok(Json(UpdateProjectResponse {
        success: true,
        message: format!("project {} updated", id),
        project,
    }))
}
