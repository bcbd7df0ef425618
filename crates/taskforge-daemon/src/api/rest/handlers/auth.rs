//! Registration, login, and session status handlers

use super::effective_role;
use crate::api::rest::state::AppState;
use crate::auth::{self, Session};
use crate::error::{ApiError, ApiResult};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use taskforge_engine::NewAccount;
use taskforge_store::AccountStore;
use taskforge_types::{validation, Account, AccountClass};

/// Register request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub contact: Option<String>,
    pub avatar: Option<String>,
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub account: Account,
}

/// Register a new User-class account
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    if request.password.len() < 8 {
        return Err(ApiError::BadRequest(
            "password must be at least 8 characters".to_string(),
        ));
    }

    let password_hash = auth::hash_password(&request.password)?;
    let account = state
        .directory
        .create_account(NewAccount {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            password_hash,
            contact: request.contact,
            avatar: request.avatar,
            class: AccountClass::User,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "account registered".to_string(),
            account,
        }),
    ))
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub account: Account,
}

/// Authenticate and issue a session token
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let email = validation::normalize_email(&request.email)
        .map_err(|_| ApiError::Unauthenticated("invalid credentials".to_string()))?;

    let account = state
        .store
        .get_account_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::Unauthenticated("invalid credentials".to_string()))?;

    if !auth::verify_password(&request.password, &account.password_hash) {
        return Err(ApiError::Unauthenticated("invalid credentials".to_string()));
    }

    let token = auth::issue_token(&state.auth.jwt_secret, &account, state.auth.session_ttl_hours)?;

    tracing::info!(account_id = %account.id, "login");

    Ok(Json(LoginResponse {
        success: true,
        message: "login successful".to_string(),
        token,
        account,
    }))
}

/// Session status response
#[derive(Debug, Serialize)]
pub struct AuthStatusResponse {
    pub success: bool,
    pub account_id: String,
    pub email: String,
    pub role: &'static str,
}

/// Report the caller's effective role, derived from live team membership
pub async fn auth_status(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<AuthStatusResponse>> {
    let role = effective_role(&state, &session).await?;

    Ok(Json(AuthStatusResponse {
        success: true,
        account_id: session.account_id.as_str().to_string(),
        email: session.email,
        role: role.as_str(),
    }))
}
