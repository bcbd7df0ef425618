//! Admin account management handlers

use super::{batch_response, require_role, BatchResponse};
use crate::api::rest::state::AppState;
use crate::auth::{self, Session};
use crate::error::ApiResult;
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use taskforge_engine::{AccountUpdate, Operation};
use taskforge_store::AccountStore;
use taskforge_types::{Account, AccountId};

/// List accounts response
#[derive(Debug, Serialize)]
pub struct ListAccountsResponse {
    pub success: bool,
    pub accounts: Vec<Account>,
}

/// List all accounts (Admin)
pub async fn list_accounts(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<ListAccountsResponse>> {
    require_role(&state, &session, Operation::ListAccounts).await?;

    let accounts = state.store.list_accounts().await?;
    Ok(Json(ListAccountsResponse {
        success: true,
        accounts,
    }))
}

/// One item of a batch account update
#[derive(Debug, Deserialize)]
pub struct AccountUpdateRequest {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub contact: Option<String>,
    /// Raw password; re-hashed before storage
    pub password: Option<String>,
}

/// Batch account update request
#[derive(Debug, Deserialize)]
pub struct UpdateAccountsRequest {
    pub updates: Vec<AccountUpdateRequest>,
}

/// Update accounts in a batch with per-item outcomes (Admin)
pub async fn update_accounts(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<UpdateAccountsRequest>,
) -> ApiResult<(StatusCode, Json<BatchResponse>)> {
    require_role(&state, &session, Operation::UpdateAccounts).await?;

    let mut updates = Vec::with_capacity(request.updates.len());
    for item in request.updates {
        let password_hash = match item.password {
            Some(password) => Some(auth::hash_password(&password)?),
            None => None,
        };
        updates.push(AccountUpdate {
            id: AccountId::new(item.id),
            first_name: item.first_name,
            last_name: item.last_name,
            contact: item.contact,
            password_hash,
        });
    }

    let report = state.directory.update_accounts(updates).await?;
    tracing::info!(
        requested_by = %session.account_id,
        successful = report.successful_count,
        failed = report.failed_count,
        "account batch update"
    );

    Ok(batch_response("account update:", report))
}

/// Batch account delete request
#[derive(Debug, Deserialize)]
pub struct DeleteAccountsRequest {
    pub ids: Vec<String>,
}

/// Delete accounts in a batch, cascading owned records (Admin)
pub async fn delete_accounts(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<DeleteAccountsRequest>,
) -> ApiResult<(StatusCode, Json<BatchResponse>)> {
    require_role(&state, &session, Operation::DeleteAccounts).await?;

    let ids: Vec<AccountId> = request.ids.into_iter().map(AccountId::new).collect();
    let report = state.engine.delete_accounts(&ids).await?;

    tracing::info!(
        requested_by = %session.account_id,
        successful = report.successful_count,
        failed = report.failed_count,
        "account batch delete"
    );

    Ok(batch_response("account delete:", report))
}

/// Promote request
#[derive(Debug, Deserialize)]
pub struct PromoteRequest {
    pub id: String,
}

/// Promote response
#[derive(Debug, Serialize)]
pub struct PromoteResponse {
    pub success: bool,
    pub message: String,
    pub account: Account,
}

/// Promote a User-class account to Project Manager (Admin)
pub async fn promote_account(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<PromoteRequest>,
) -> ApiResult<Json<PromoteResponse>> {
    require_role(&state, &session, Operation::PromoteAccount).await?;

    let account = state
        .directory
        .promote_to_project_manager(&AccountId::new(request.id))
        .await?;

    Ok(Json(PromoteResponse {
        success: true,
        message: format!("{} is now a ProjectManager", account.id),
        account,
    }))
}
