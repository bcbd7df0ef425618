//! Project assignment handlers

use super::{effective_role, require_role};
use crate::api::rest::state::AppState;
use crate::auth::Session;
use crate::error::{ApiError, ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskforge_engine::{ensure_owner, CascadeStats, Operation};
use taskforge_store::{AssignmentStore, ProjectStore, TeamStore};
use taskforge_types::{AssignmentLog, ProjectId, TeamId};

/// Assign project request
#[derive(Debug, Deserialize)]
pub struct AssignProjectRequest {
    pub project_id: String,
    pub team_id: String,
    pub deadline: DateTime<Utc>,
}

/// Assign project response
#[derive(Debug, Serialize)]
pub struct AssignProjectResponse {
    pub success: bool,
    pub message: String,
    pub assignment: AssignmentLog,
}

/// Bind a project to a team (Project Manager, owner of both)
pub async fn assign_project(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AssignProjectRequest>,
) -> ApiResult<(StatusCode, Json<AssignProjectResponse>)> {
    require_role(&state, &session, Operation::AssignProject).await?;

    let project_id = ProjectId::new(&request.project_id);
    let team_id = TeamId::new(&request.team_id);

    let project = state
        .store
        .get_project(&project_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("project {} not found", request.project_id))
        })?;
    ensure_owner(
        &project.created_by,
        &session.account_id,
        &format!("project {}", project_id),
    )?;

    let team = state
        .store
        .get_team(&team_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("team {} not found", request.team_id)))?;
    ensure_owner(
        &team.created_by,
        &session.account_id,
        &format!("team {}", team_id),
    )?;

    let assignment = state
        .engine
        .assign_project(&project_id, &team_id, request.deadline, &session.account_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AssignProjectResponse {
            success: true,
            message: format!("project {} assigned to team {}", project_id, team_id),
            assignment,
        }),
    ))
}

/// Unassign project request
#[derive(Debug, Deserialize)]
pub struct UnassignProjectRequest {
    pub team_id: String,
    pub project_ids: Vec<String>,
}

/// Unassign project response
#[derive(Debug, Serialize)]
pub struct UnassignProjectResponse {
    pub success: bool,
    pub message: String,
    pub details: CascadeStats,
}

/// Remove project-team bindings with their task cascades (Project
/// Manager, team owner). Projects with no matching log are skipped.
pub async fn unassign_project(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<UnassignProjectRequest>,
) -> ApiResult<Json<UnassignProjectResponse>> {
    require_role(&state, &session, Operation::UnassignProject).await?;

    let team_id = TeamId::new(&request.team_id);
    let team = state
        .store
        .get_team(&team_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("team {} not found", request.team_id)))?;
    ensure_owner(
        &team.created_by,
        &session.account_id,
        &format!("team {}", team_id),
    )?;

    let project_ids: Vec<ProjectId> =
        request.project_ids.into_iter().map(ProjectId::new).collect();
    let stats = state.engine.unassign_projects(&team_id, &project_ids).await?;

    Ok(Json(UnassignProjectResponse {
        success: true,
        message: format!("{} assignment(s) removed", stats.logs_deleted),
        details: stats,
    }))
}

/// Team assignments response
#[derive(Debug, Serialize)]
pub struct TeamAssignmentsResponse {
    pub success: bool,
    pub assignments: Vec<AssignmentLog>,
}

/// List the assignment logs binding projects to a team
pub async fn team_assignments(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> ApiResult<Json<TeamAssignmentsResponse>> {
    effective_role(&state, &session).await?;

    let team_id = TeamId::new(&id);
    if state.store.get_team(&team_id).await?.is_none() {
        return Err(ApiError::NotFound(format!("team {} not found", id)));
    }

    let assignments = state.store.list_assignments_for_team(&team_id).await?;

    Ok(Json(TeamAssignmentsResponse {
        success: true,
        assignments,
    }))
}
