//! Team management handlers

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
use taskforge_engine::{ensure_owner, CascadeStats, Operation};
use taskforge_store::{AccountStore, TeamStore};
use taskforge_types::{validation, AccountId, Role, Team, TeamId};

/// Create team request
#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
    #[serde(default)]
    pub team_leader: Vec<String>,
    #[serde(default)]
    pub members: Vec<String>,
}

/// Create team response
#[derive(Debug, Serialize)]
pub struct CreateTeamResponse {
    pub success: bool,
    pub message: String,
    pub team: Team,
}

/// Create a team (Project Manager)
pub async fn create_team(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<CreateTeamRequest>,
) -> ApiResult<(StatusCode, Json<CreateTeamResponse>)> {
    require_role(&state, &session, Operation::CreateTeam).await?;

    let team_leader: BTreeSet<AccountId> =
        request.team_leader.into_iter().map(AccountId::new).collect();
    let members: BTreeSet<AccountId> = request.members.into_iter().map(AccountId::new).collect();

    let team = state
        .directory
        .create_team(&request.name, team_leader, members, &session.account_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateTeamResponse {
            success: true,
            message: format!("team {} created", team.id),
            team,
        }),
    ))
}

/// List teams response
#[derive(Debug, Serialize)]
pub struct ListTeamsResponse {
    pub success: bool,
    pub teams: Vec<Team>,
}

/// List teams visible to the caller: a Project Manager sees teams it
/// created, everyone else sees teams they participate in.
pub async fn list_teams(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<ListTeamsResponse>> {
    let role = effective_role(&state, &session).await?;

    let teams = match role {
        Role::ProjectManager => {
            state
                .store
                .list_teams_created_by(&session.account_id)
                .await?
        }
        Role::Admin => state.store.list_teams().await?,
        _ => state
            .store
            .list_teams()
            .await?
            .into_iter()
            .filter(|t| t.is_leader(&session.account_id) || t.is_member(&session.account_id))
            .collect(),
    };

    Ok(Json(ListTeamsResponse {
        success: true,
        teams,
    }))
}

/// Get team response
#[derive(Debug, Serialize)]
pub struct GetTeamResponse {
    pub success: bool,
    pub team: Team,
}

/// Get a team by id
pub async fn get_team(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> ApiResult<Json<GetTeamResponse>> {
    effective_role(&state, &session).await?;

    let team_id = TeamId::new(&id);
    let team = state
        .store
        .get_team(&team_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("team {} not found", id)))?;

    Ok(Json(GetTeamResponse {
        success: true,
        team,
    }))
}

/// Update team request. `None` fields are left untouched; participant
/// sets are replaced wholesale.
#[derive(Debug, Deserialize)]
pub struct UpdateTeamRequest {
    pub name: Option<String>,
    pub team_leader: Option<Vec<String>>,
    pub members: Option<Vec<String>>,
}

/// Update team response
#[derive(Debug, Serialize)]
pub struct UpdateTeamResponse {
    pub success: bool,
    pub message: String,
    pub team: Team,
}

/// Update a team's name or participant sets (Project Manager, owner)
///
/// Membership edits take effect on the next role resolution; no session
/// needs to be re-issued.
pub async fn update_team(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Json(request): Json<UpdateTeamRequest>,
) -> ApiResult<Json<UpdateTeamResponse>> {
    require_role(&state, &session, Operation::UpdateTeam).await?;

    let team_id = TeamId::new(&id);
    let mut team = state
        .store
        .get_team(&team_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("team {} not found", id)))?;

    ensure_owner(
        &team.created_by,
        &session.account_id,
        &format!("team {}", id),
    )?;

    if let Some(name) = request.name {
        validation::validate_non_empty(&name, "team name")
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        team.name = name.trim().to_string();
    }
    if let Some(team_leader) = request.team_leader {
        team.team_leader = resolve_participants(&state, team_leader).await?;
    }
    if let Some(members) = request.members {
        team.members = resolve_participants(&state, members).await?;
    }

    state.store.update_team(team.clone()).await?;

    Ok(Json(UpdateTeamResponse {
        success: true,
        message: format!("team {} updated", id),
        team,
    }))
}

/// Map raw ids to account ids, rejecting any that do not resolve.
async fn resolve_participants(
    state: &AppState,
    ids: Vec<String>,
) -> ApiResult<BTreeSet<AccountId>> {
    let mut set = BTreeSet::new();
    for id in ids {
        let account_id = AccountId::new(id);
        if state.store.get_account(&account_id).await?.is_none() {
            return Err(ApiError::NotFound(format!(
                "account {} not found",
                account_id
            )));
        }
        set.insert(account_id);
    }
    Ok(set)
}

/// Delete teams request
#[derive(Debug, Deserialize)]
pub struct DeleteTeamsRequest {
    pub ids: Vec<String>,
}

/// Delete teams response
#[derive(Debug, Serialize)]
pub struct DeleteTeamsResponse {
    pub success: bool,
    pub message: String,
    pub details: CascadeStats,
}

/// Delete teams with their assignment cascades (Project Manager, owner)
///
/// All-or-nothing: one unknown or foreign team fails the whole request
/// before anything is deleted.
pub async fn delete_teams(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<DeleteTeamsRequest>,
) -> ApiResult<Json<DeleteTeamsResponse>> {
    require_role(&state, &session, Operation::DeleteTeams).await?;

    let ids: Vec<TeamId> = request.ids.into_iter().map(TeamId::new).collect();
    let stats = state.engine.delete_teams(&ids, &session.account_id).await?;

    Ok(Json(DeleteTeamsResponse {
        success: true,
        message: format!("{} team(s) deleted", stats.teams_deleted),
        details: stats,
    }))
}
