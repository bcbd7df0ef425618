//! API Router configuration

use super::handlers;
use super::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Health and status
        .route("/health", get(handlers::health_check))
        .route("/status", get(handlers::daemon_status))
        // Sessions
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        .route("/auth/status", post(handlers::auth_status))
        // Accounts (Admin)
        .route("/accounts", get(handlers::list_accounts))
        .route("/accounts", put(handlers::update_accounts))
        .route("/accounts", delete(handlers::delete_accounts))
        .route("/accounts/promote", post(handlers::promote_account))
        // Teams
        .route("/teams", post(handlers::create_team))
        .route("/teams", get(handlers::list_teams))
        .route("/teams/:id", get(handlers::get_team))
        .route("/teams/:id", put(handlers::update_team))
        .route("/teams/:id/assignments", get(handlers::team_assignments))
        .route("/delete-teams", post(handlers::delete_teams))
        // Projects
        .route("/projects", post(handlers::create_project))
        .route("/projects", get(handlers::list_projects))
        .route("/projects/unassigned", get(handlers::unassigned_projects))
        .route("/projects/:id", put(handlers::update_project))
        .route("/projects/:id", delete(handlers::delete_project))
        .route("/projects/:id/tasks", get(handlers::project_tasks))
        // Assignments
        .route("/assign-project", post(handlers::assign_project))
        .route("/unassign-project", post(handlers::unassign_project))
        // Tasks
        .route("/tasks", post(handlers::create_task));

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth;
    use crate::config::AuthConfig;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use chrono::Utc;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use taskforge_store::{AccountStore, InMemoryStore};
    use taskforge_types::{Account, AccountClass, AccountId};
    use tower::ServiceExt;

    async fn seed_account(
        store: &InMemoryStore,
        id: &str,
        email: &str,
        password: &str,
        class: AccountClass,
    ) {
        let account = Account {
            id: AccountId::new(id),
            first_name: "Test".to_string(),
            last_name: "Account".to_string(),
            email: email.to_string(),
            password_hash: auth::hash_password(password).unwrap(),
            contact: None,
            avatar: None,
            class,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        store.insert_account(account).await.unwrap();
    }

    fn test_app() -> (Arc<InMemoryStore>, Router, AuthConfig) {
        let store = Arc::new(InMemoryStore::new());
        let auth_config = AuthConfig {
            jwt_secret: "test-secret".to_string(),
            session_ttl_hours: 1,
        };
        let state = AppState::new(store.clone(), auth_config.clone());
        (store, create_router(state), auth_config)
    }

    fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        request_json("POST", uri, token, body)
    }

    fn request_json(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn login(app: &Router, email: &str, password: &str) -> String {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/auth/login",
                None,
                json!({"email": email, "password": password}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let (_, app, _) = test_app();
        let response = app.oneshot(get("/api/v1/health", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_token_is_401() {
        let (_, app, _) = test_app();
        let response = app
            .clone()
            .oneshot(get("/api/v1/accounts", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(get("/api/v1/accounts", Some("garbage")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_register_login_status_flow() {
        let (_, app, _) = test_app();

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/auth/register",
                None,
                json!({
                    "first_name": "Ada",
                    "last_name": "Lovelace",
                    "email": "Ada@Example.com",
                    "password": "s3cret-pass"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["account"]["id"], "User-00001");
        assert_eq!(body["account"]["email"], "ada@example.com");
        assert!(body["account"].get("password_hash").is_none());

        let token = login(&app, "ada@example.com", "s3cret-pass").await;

        let response = app
            .clone()
            .oneshot(post_json("/api/v1/auth/status", Some(&token), json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["role"], "User");
    }

    #[tokio::test]
    async fn test_wrong_password_is_401() {
        let (store, app, _) = test_app();
        seed_account(&store, "User-00001", "a@example.com", "right-pass", AccountClass::User)
            .await;

        let response = app
            .oneshot(post_json(
                "/api/v1/auth/login",
                None,
                json!({"email": "a@example.com", "password": "wrong-pass"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_surface_is_403_for_users() {
        let (store, app, _) = test_app();
        seed_account(&store, "User-00001", "u@example.com", "password1", AccountClass::User)
            .await;
        let token = login(&app, "u@example.com", "password1").await;

        let response = app
            .oneshot(get("/api/v1/accounts", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_lists_accounts() {
        let (store, app, _) = test_app();
        seed_account(&store, "User-00001", "root@example.com", "password1", AccountClass::Admin)
            .await;
        let token = login(&app, "root@example.com", "password1").await;

        let response = app
            .oneshot(get("/api/v1/accounts", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["accounts"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_assign_workflow_over_http() {
        let (store, app, _) = test_app();
        seed_account(&store, "User-00001", "pm@example.com", "password1", AccountClass::ProjectManager)
            .await;
        let token = login(&app, "pm@example.com", "password1").await;

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/teams",
                Some(&token),
                json!({"name": "Platform"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let team_id = body_json(response).await["team"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/projects",
                Some(&token),
                json!({"title": "Rollout"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let project_id = body_json(response).await["project"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/assign-project",
                Some(&token),
                json!({
                    "project_id": project_id,
                    "team_id": team_id,
                    "deadline": "2026-12-31T00:00:00Z"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["assignment"]["id"], "AP-00001");

        // A second assignment of the same project is a conflict.
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/assign-project",
                Some(&token),
                json!({
                    "project_id": body["assignment"]["project_id"],
                    "team_id": team_id,
                    "deadline": "2026-12-31T00:00:00Z"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        // The project no longer shows as unassigned.
        let response = app
            .oneshot(get("/api/v1/projects/unassigned", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["projects"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_project_cannot_flip_assignment_status() {
        let (store, app, _) = test_app();
        seed_account(&store, "User-00001", "pm@example.com", "password1", AccountClass::ProjectManager)
            .await;
        let token = login(&app, "pm@example.com", "password1").await;

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/teams",
                Some(&token),
                json!({"name": "Platform"}),
            ))
            .await
            .unwrap();
        let team_id = body_json(response).await["team"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/projects",
                Some(&token),
                json!({"title": "Rollout"}),
            ))
            .await
            .unwrap();
        let project_id = body_json(response).await["project"]["id"]
            .as_str()
            .unwrap()
            .to_string();
        let uri = format!("/api/v1/projects/{}", project_id);

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/assign-project",
                Some(&token),
                json!({
                    "project_id": project_id,
                    "team_id": team_id,
                    "deadline": "2026-12-31T00:00:00Z"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        // The log-mirrored states cannot be written directly.
        let response = app
            .clone()
            .oneshot(request_json(
                "PUT",
                &uri,
                Some(&token),
                json!({"status": "Unassigned"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // The stored status still mirrors the active log.
        let response = app
            .clone()
            .oneshot(get("/api/v1/projects", Some(&token)))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["projects"][0]["status"], "Assigned");

        // Completed is the one externally settable state.
        let response = app
            .oneshot(request_json(
                "PUT",
                &uri,
                Some(&token),
                json!({"status": "Completed"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["project"]["status"], "Completed");
    }

    #[tokio::test]
    async fn test_batch_delete_reports_multi_status() {
        let (store, app, _) = test_app();
        seed_account(&store, "User-00001", "root@example.com", "password1", AccountClass::Admin)
            .await;
        seed_account(&store, "User-00002", "u@example.com", "password1", AccountClass::User)
            .await;
        let token = login(&app, "root@example.com", "password1").await;

        let response = app
            .oneshot(request_json(
                "DELETE",
                "/api/v1/accounts",
                Some(&token),
                json!({"ids": ["User-00002", "User-00099"]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::MULTI_STATUS);
        let body = body_json(response).await;
        assert_eq!(body["details"]["successful_count"], 1);
        assert_eq!(body["details"]["failed_count"], 1);
        assert_eq!(body["success"], false);
    }
}
