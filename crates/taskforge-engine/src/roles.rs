//! Role resolver
//!
//! An account's effective role is a pure function of its stored class and
//! the team collections as they stand right now. It is recomputed on every
//! authentication check and never cached, so it cannot drift as the
//! cascade engine mutates team membership.

use crate::error::{EngineError, EngineResult};
use taskforge_store::TeamStore;
use taskforge_types::{AccountClass, AccountId, Role};

/// Compute the effective role for an account.
///
/// Admin and ProjectManager classes return directly; they are never team
/// participants. User-class accounts are classified by whether their id
/// appears in any team's leader set, member set, both, or neither.
///
/// A store failure yields [`EngineError::Transient`]; callers must treat
/// that as "unauthenticated" and fail closed rather than granting any
/// default role.
pub async fn resolve_role<S>(
    store: &S,
    account_id: &AccountId,
    class: AccountClass,
) -> EngineResult<Role>
where
    S: TeamStore + ?Sized,
{
    match class {
        AccountClass::Admin => return Ok(Role::Admin),
        AccountClass::ProjectManager => return Ok(Role::ProjectManager),
        AccountClass::User => {}
    }

    let leads = store.leads_any_team(account_id).await?;
    let belongs = store.member_of_any_team(account_id).await?;

    let role = match (leads, belongs) {
        (true, true) => Role::TeamLeaderAndMember,
        (true, false) => Role::TeamLeader,
        (false, true) => Role::TeamMember,
        (false, false) => Role::PlainUser,
    };

    Ok(role)
}
