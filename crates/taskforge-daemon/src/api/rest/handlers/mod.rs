//! API request handlers

mod accounts;
mod assignments;
mod auth;
mod health;
mod projects;
mod tasks;
mod teams;

pub use accounts::*;
pub use assignments::*;
pub use auth::*;
pub use health::*;
pub use projects::*;
pub use tasks::*;
pub use teams::*;

use crate::api::rest::state::AppState;
use crate::auth::Session;
use crate::error::ApiResult;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use taskforge_engine::{authorize, resolve_role, BatchReport, Operation};
use taskforge_types::Role;

/// Resolve the caller's effective role and check it against the operation.
///
/// Role resolution hits the team collection on every call; a stale role is
/// never served from the token.
pub(crate) async fn require_role(
    state: &AppState,
    session: &Session,
    operation: Operation,
) -> ApiResult<Role> {
    let role = resolve_role(state.store.as_ref(), &session.account_id, session.class).await?;
    authorize(role, operation).into_result()?;
    Ok(role)
}

/// Resolve the caller's effective role without an operation check.
pub(crate) async fn effective_role(state: &AppState, session: &Session) -> ApiResult<Role> {
    let role = resolve_role(state.store.as_ref(), &session.account_id, session.class).await?;
    Ok(role)
}

/// Batch endpoint response envelope
#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub success: bool,
    pub message: String,
    pub details: BatchReport,
}

/// Map a batch report to its response: 200 when every item succeeded,
/// 207 Multi-Status otherwise.
pub(crate) fn batch_response(
    verb: &str,
    report: BatchReport,
) -> (StatusCode, Json<BatchResponse>) {
    let status = if report.all_succeeded() {
        StatusCode::OK
    } else {
        StatusCode::MULTI_STATUS
    };

    let message = format!(
        "{} {} succeeded, {} failed",
        verb, report.successful_count, report.failed_count
    );

    (
        status,
        Json(BatchResponse {
            success: report.all_succeeded(),
            message,
            details: report,
        }),
    )
}
