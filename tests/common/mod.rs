use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::routing::post;
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use fleet_messaging_api::auth::{generate_jwt, Claims};
use fleet_messaging_api::database::models::{
    NewActivityLog, NewMessage, Plugin, Project, Site, Team, TeamMember, User,
};
use fleet_messaging_api::handlers::messages::send_post;
use fleet_messaging_api::messaging::{Directory, DirectoryError};
use fleet_messaging_api::middleware::jwt_auth_middleware;
use fleet_messaging_api::services::{MessageStore, StoreError};
use fleet_messaging_api::state::AppState;

static INIT: Once = Once::new();

/// The config singleton reads the environment once; make sure the JWT secret
/// is in place before anything touches it.
pub fn init() {
    INIT.call_once(|| {
        std::env::set_var("JWT_SECRET", "test-secret");
    });
}

#[derive(Default)]
pub struct TestDirectory {
    pub users: HashMap<Uuid, User>,
    pub teams: HashMap<Uuid, Team>,
    pub plugins: HashMap<Uuid, Plugin>,
    pub sites: HashMap<Uuid, Site>,
    pub projects: HashMap<Uuid, Project>,
    pub fail: bool,
    lookups: AtomicUsize,
}

impl TestDirectory {
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn touch(&self) -> Result<(), DirectoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(DirectoryError::Backend("connection reset".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Directory for TestDirectory {
    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, DirectoryError> {
        self.touch()?;
        Ok(self.users.get(&id).cloned())
    }

    async fn team_by_id(&self, id: Uuid) -> Result<Option<Team>, DirectoryError> {
        self.touch()?;
        Ok(self.teams.get(&id).cloned())
    }

    async fn plugin_by_id(&self, id: Uuid) -> Result<Option<Plugin>, DirectoryError> {
        self.touch()?;
        Ok(self.plugins.get(&id).cloned())
    }

    async fn site_by_id(&self, id: Uuid) -> Result<Option<Site>, DirectoryError> {
        self.touch()?;
        Ok(self.sites.get(&id).cloned())
    }

    async fn project_by_id(&self, id: Uuid) -> Result<Option<Project>, DirectoryError> {
        self.touch()?;
        Ok(self.projects.get(&id).cloned())
    }
}

#[derive(Default)]
pub struct TestStore {
    pub messages: Mutex<Vec<NewMessage>>,
    pub activity: Mutex<Vec<NewActivityLog>>,
    pub fail_messages: bool,
}

impl TestStore {
    pub fn message_count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}

#[async_trait]
impl MessageStore for TestStore {
    async fn create_message(&self, message: &NewMessage) -> Result<Uuid, StoreError> {
        if self.fail_messages {
            return Err(StoreError::Backend("insert failed".into()));
        }
        self.messages.lock().unwrap().push(message.clone());
        Ok(Uuid::new_v4())
    }

    async fn record_activity(&self, entry: &NewActivityLog) -> Result<(), StoreError> {
        self.activity.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

/// The protected messaging routes, wired exactly as in main.rs but with
/// in-memory collaborators.
pub fn test_app(directory: Arc<TestDirectory>, store: Arc<TestStore>) -> Router {
    init();
    let state = AppState::new(directory, store);
    Router::new()
        .route("/api/messages", post(send_post))
        .layer(axum::middleware::from_fn(jwt_auth_middleware))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

pub fn bearer_for(id: Uuid, email: &str, role: &str) -> String {
    init();
    let claims = Claims::new(id, email.to_string(), Some("Test Sender".to_string()), role.to_string());
    format!("Bearer {}", generate_jwt(claims).expect("jwt"))
}

pub async fn post_message(app: Router, token: Option<&str>, body: Value) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/messages")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    let request = builder.body(Body::from(body.to_string())).expect("request");

    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

pub fn user(email: &str) -> User {
    let now = chrono::Utc::now();
    User {
        id: Uuid::new_v4(),
        email: email.into(),
        full_name: None,
        role: "user".into(),
        created_at: now,
        updated_at: now,
    }
}

pub fn team(owner_id: Uuid, members: Vec<(Uuid, &str)>) -> Team {
    let now = chrono::Utc::now();
    Team {
        id: Uuid::new_v4(),
        name: "Acme".into(),
        owner_id,
        members: sqlx::types::Json(
            members
                .into_iter()
                .map(|(user_id, status)| TeamMember { user_id, status: status.into() })
                .collect(),
        ),
        created_at: now,
        updated_at: now,
    }
}
