use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::{info, warn};
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::error::AppError;
use crate::domain::models::user::{User, ROLE_ADMIN};
use crate::domain::services::auth_service::{hash_password, AuthService};
use crate::infra::repositories::{
    postgres_banner_repo::PostgresBannerRepo, postgres_booking_repo::PostgresBookingRepo,
    postgres_customer_repo::PostgresCustomerRepo, postgres_news_repo::PostgresNewsRepo,
    postgres_room_repo::PostgresRoomRepo, postgres_service_zone_repo::PostgresServiceZoneRepo,
    postgres_session_repo::PostgresSessionRepo, postgres_setting_repo::PostgresSettingRepo,
    postgres_team_member_repo::PostgresTeamMemberRepo, postgres_user_repo::PostgresUserRepo,
    sqlite_banner_repo::SqliteBannerRepo, sqlite_booking_repo::SqliteBookingRepo,
    sqlite_customer_repo::SqliteCustomerRepo, sqlite_news_repo::SqliteNewsRepo,
    sqlite_room_repo::SqliteRoomRepo, sqlite_service_zone_repo::SqliteServiceZoneRepo,
    sqlite_session_repo::SqliteSessionRepo, sqlite_setting_repo::SqliteSettingRepo,
    sqlite_team_member_repo::SqliteTeamMemberRepo, sqlite_user_repo::SqliteUserRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    if config.auth_dev_bypass {
        warn!("AUTH_DEV_BYPASS is enabled: every request is treated as an administrator");
    }

    let state = if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;
        postgres_state(config, pool)
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;
        sqlite_state(config, pool)
    };

    if let Err(e) = ensure_admin_user(&state).await {
        warn!("Could not create the bootstrap admin user: {}", e);
    }

    state
}

pub fn postgres_state(config: &Config, pool: PgPool) -> AppState {
    let user_repo = Arc::new(PostgresUserRepo::new(pool.clone()));
    let session_repo = Arc::new(PostgresSessionRepo::new(pool.clone()));
    let auth_service = Arc::new(AuthService::new(session_repo, user_repo.clone(), config));

    AppState {
        config: config.clone(),
        room_repo: Arc::new(PostgresRoomRepo::new(pool.clone())),
        booking_repo: Arc::new(PostgresBookingRepo::new(pool.clone())),
        customer_repo: Arc::new(PostgresCustomerRepo::new(pool.clone())),
        news_repo: Arc::new(PostgresNewsRepo::new(pool.clone())),
        service_zone_repo: Arc::new(PostgresServiceZoneRepo::new(pool.clone())),
        banner_repo: Arc::new(PostgresBannerRepo::new(pool.clone())),
        team_member_repo: Arc::new(PostgresTeamMemberRepo::new(pool.clone())),
        setting_repo: Arc::new(PostgresSettingRepo::new(pool)),
        user_repo,
        auth_service,
    }
}

pub fn sqlite_state(config: &Config, pool: SqlitePool) -> AppState {
    let user_repo = Arc::new(SqliteUserRepo::new(pool.clone()));
    let session_repo = Arc::new(SqliteSessionRepo::new(pool.clone()));
    let auth_service = Arc::new(AuthService::new(session_repo, user_repo.clone(), config));

    AppState {
        config: config.clone(),
        room_repo: Arc::new(SqliteRoomRepo::new(pool.clone())),
        booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
        customer_repo: Arc::new(SqliteCustomerRepo::new(pool.clone())),
        news_repo: Arc::new(SqliteNewsRepo::new(pool.clone())),
        service_zone_repo: Arc::new(SqliteServiceZoneRepo::new(pool.clone())),
        banner_repo: Arc::new(SqliteBannerRepo::new(pool.clone())),
        team_member_repo: Arc::new(SqliteTeamMemberRepo::new(pool.clone())),
        setting_repo: Arc::new(SqliteSettingRepo::new(pool)),
        user_repo,
        auth_service,
    }
}

/// Creates the `ADMIN_EMAIL` account on first start. Existing accounts are left alone.
pub async fn ensure_admin_user(state: &AppState) -> Result<(), AppError> {
    let (Some(email), Some(password)) = (&state.config.admin_email, &state.config.admin_password) else {
        return Ok(());
    };

    let email = email.trim().to_lowercase();
    if state.user_repo.find_by_email(&email).await?.is_some() {
        return Ok(());
    }

    let user = User::new(email, "Administrator".to_string(), hash_password(password)?, ROLE_ADMIN);
    let created = state.user_repo.create(&user).await?;
    info!("Bootstrap admin user created: {}", created.id);
    Ok(())
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
