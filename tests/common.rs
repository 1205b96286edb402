use ikigaivilla_backend::{
    api::router::create_router,
    config::Config,
    domain::models::user::{User, ROLE_ADMIN, ROLE_STAFF},
    domain::services::auth_service::hash_password,
    infra::factory::sqlite_state,
    state::AppState,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    Router,
};
use std::str::FromStr;
use tower::ServiceExt;
use serde_json::Value;

pub const ADMIN_EMAIL: &str = "admin@ikigaivilla.test";
pub const STAFF_EMAIL: &str = "staff@ikigaivilla.test";
pub const PASSWORD: &str = "correct-horse-battery";

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        Self::build(false).await
    }

    /// Same app, but every request is authenticated as the synthetic development admin.
    pub async fn with_dev_bypass() -> Self {
        Self::build(true).await
    }

    async fn build(auth_dev_bypass: bool) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url,
            port: 0,
            jwt_secret: "test-secret".to_string(),
            session_ttl_hours: 1,
            cookie_secure: false,
            auth_dev_bypass,
            admin_email: None,
            admin_password: None,
        };

        let state = Arc::new(sqlite_state(&config, pool.clone()));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn create_user(&self, email: &str, role: &str) -> User {
        let user = User::new(email.to_string(), "Test User".to_string(), hash_password(PASSWORD).unwrap(), role);
        self.state.user_repo.create(&user).await.unwrap()
    }

    /// Creates an admin account and returns a bearer token for it.
    pub async fn admin_token(&self) -> String {
        self.create_user(ADMIN_EMAIL, ROLE_ADMIN).await;
        self.login(ADMIN_EMAIL, PASSWORD).await
    }

    pub async fn staff_token(&self) -> String {
        self.create_user(STAFF_EMAIL, ROLE_STAFF).await;
        self.login(STAFF_EMAIL, PASSWORD).await
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self.request("POST", "/api/auth/login", None, Some(serde_json::json!({
            "email": email,
            "password": password
        }))).await;

        if status != StatusCode::OK {
            panic!("Login failed in test helper: status {}", status);
        }

        body["token"].as_str().expect("No token in login response").to_string()
    }

    pub async fn request(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
        (status, json)
    }

    /// Creates an ACTIVE room through the admin API and returns its JSON.
    pub async fn create_room(&self, token: &str, name: &str, price: &str, capacity: i32) -> Value {
        let (status, body) = self.request("POST", "/api/admin/rooms", Some(token), Some(serde_json::json!({
            "name": name,
            "price": price,
            "capacity": capacity,
            "features": ["Ban công", "Bồn tắm"],
            "images": ["/img/room-1.jpg"]
        }))).await;
        assert_eq!(status, StatusCode::OK, "room creation failed: {}", body);
        body
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
