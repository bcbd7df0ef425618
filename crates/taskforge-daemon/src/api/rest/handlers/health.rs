//! Health and status handlers

use crate::api::rest::state::AppState;
use crate::error::ApiResult;
use axum::{extract::State, Json};
use serde::Serialize;
use taskforge_store::{AccountStore, AssignmentStore, ProjectStore, TeamStore};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub version: String,
    pub uptime: String,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime: state.uptime(),
    })
}

/// Daemon status response
#[derive(Debug, Serialize)]
pub struct DaemonStatusResponse {
    pub status: String,
    pub version: String,
    pub uptime: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub stats: DaemonStats,
}

/// Collection counts
#[derive(Debug, Serialize)]
pub struct DaemonStats {
    pub total_accounts: usize,
    pub total_teams: usize,
    pub total_projects: usize,
    pub total_assignments: usize,
}

/// Daemon status endpoint
pub async fn daemon_status(State(state): State<AppState>) -> ApiResult<Json<DaemonStatusResponse>> {
    let accounts = state.store.list_accounts().await?;
    let teams = state.store.list_teams().await?;
    let projects = state.store.list_projects().await?;
    let assignments = state.store.list_assignments().await?;

    Ok(Json(DaemonStatusResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime: state.uptime(),
        started_at: state.started_at,
        stats: DaemonStats {
            total_accounts: accounts.len(),
            total_teams: teams.len(),
            total_projects: projects.len(),
            total_assignments: assignments.len(),
        },
    }))
}
