mod auth;
mod sessions;
mod teachers;
mod users;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};

use crate::auth::jwt::JwtService;
use crate::auth::middleware::require_auth;
use crate::config::Config;
use crate::db::{self, DbPool};

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
    pub jwt: JwtService,
}

impl AppState {
    /// Open the database, run migrations and seed the admin account when a
    /// password for it is configured.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let pool = db::create_pool(&config.sqlite_path)?;
        tracing::info!("Database initialized at {}", config.sqlite_path);

        if let Some(password) = &config.admin_password {
            if db::seed_admin(&pool, &config.admin_email, password)? {
                tracing::info!("Seeded admin account {}", config.admin_email);
            }
        }

        Ok(Self {
            db: pool,
            jwt: JwtService::from_config(&config),
            config,
        })
    }
}

async fn health() -> &'static str {
    "ok"
}

pub fn create_router(state: AppState) -> Router {
    let health_routes = Router::new().route("/health", get(health));

    let mut auth_routes = Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login));

    let mut protected = Router::new()
        // Sessions
        .route("/api/session", get(sessions::list).post(sessions::create))
        .route(
            "/api/session/{id}",
            get(sessions::get)
                .put(sessions::update)
                .delete(sessions::delete),
        )
        .route(
            "/api/session/{id}/participate/{user_id}",
            post(sessions::participate).delete(sessions::no_longer_participate),
        )
        // Teachers
        .route("/api/teacher", get(teachers::list))
        .route("/api/teacher/{id}", get(teachers::get))
        // Users
        .route("/api/user", get(users::list))
        .route("/api/user/{id}", get(users::get).delete(users::delete))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    if state.config.rate_limit {
        // Auth routes: 10 requests burst, one token every 6 seconds per IP
        let auth_governor = GovernorConfigBuilder::default()
            .per_second(6)
            .burst_size(10)
            .finish()
            .expect("non-zero auth rate limit");

        // Protected API: 120 requests burst, one token every 2 seconds per IP
        let api_governor = GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(120)
            .finish()
            .expect("non-zero api rate limit");

        auth_routes = auth_routes.layer(GovernorLayer::new(Arc::new(auth_governor)));
        protected = protected.layer(GovernorLayer::new(Arc::new(api_governor)));
    }

    Router::new()
        .merge(health_routes)
        .merge(auth_routes)
        .merge(protected)
        .with_state(state)
}
