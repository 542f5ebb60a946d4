//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::jwt::JwtManager;
use crate::middleware::normalize_error_response;
use crate::migration;
use crate::openapi::ApiDoc;
use crate::repository::{
    todo_item::TodoItemRepositoryImpl, todo_list::TodoListRepositoryImpl, user::UserRepositoryImpl,
};
use crate::service::{TodoItemService, TodoListService, UserService};
use crate::state::HasServices;
use anyhow::{Context, Result};
use axum::{
    http::StatusCode,
    routing::{get, post, put},
    Router,
};
use sqlx::SqlitePool;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: SqlitePool,
    pub todo_list_service: Arc<TodoListService<TodoListRepositoryImpl>>,
    pub todo_item_service: Arc<TodoItemService<TodoItemRepositoryImpl, TodoListRepositoryImpl>>,
    pub user_service: Arc<UserService<UserRepositoryImpl>>,
    pub jwt_manager: JwtManager,
}

impl AppState {
    /// Wire repositories and services on top of an open pool
    pub fn new(config: Config, db_pool: SqlitePool) -> Self {
        let todo_list_repo = Arc::new(TodoListRepositoryImpl::new(db_pool.clone()));
        let todo_item_repo = Arc::new(TodoItemRepositoryImpl::new(db_pool.clone()));
        let user_repo = Arc::new(UserRepositoryImpl::new(db_pool.clone()));

        let jwt_manager = JwtManager::new(config.jwt.clone());

        Self {
            config: Arc::new(config),
            db_pool,
            todo_list_service: Arc::new(TodoListService::new(todo_list_repo.clone())),
            todo_item_service: Arc::new(TodoItemService::new(todo_item_repo, todo_list_repo)),
            user_service: Arc::new(UserService::new(user_repo, jwt_manager.clone())),
            jwt_manager,
        }
    }
}

impl HasServices for AppState {
    type TodoListRepo = TodoListRepositoryImpl;
    type TodoItemRepo = TodoItemRepositoryImpl;
    type UserRepo = UserRepositoryImpl;

    fn config(&self) -> &Config {
        &self.config
    }

    fn todo_list_service(&self) -> &TodoListService<Self::TodoListRepo> {
        &self.todo_list_service
    }

    fn todo_item_service(&self) -> &TodoItemService<Self::TodoItemRepo, Self::TodoListRepo> {
        &self.todo_item_service
    }

    fn user_service(&self) -> &UserService<Self::UserRepo> {
        &self.user_service
    }

    fn jwt_manager(&self) -> &JwtManager {
        &self.jwt_manager
    }

    async fn check_ready(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.db_pool).await.is_ok()
    }
}

/// Migrate, seed, and serve HTTP until Ctrl+C / SIGTERM
pub async fn run(config: Config) -> Result<()> {
    let db_pool = migration::connect(&config.database).await?;
    migration::run_migrations(&db_pool).await?;
    migration::seed_default_user(&db_pool, &config.seed).await?;

    let http_addr = config.http_addr();
    let state = AppState::new(config, db_pool);

    let listener = TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("Failed to bind {}", http_addr))?;
    info!("HTTP server started on {}", http_addr);

    serve(listener, state, shutdown_signal()).await
}

/// Serve the router on an already-bound listener until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let db_pool = state.db_pool.clone();
    let app = build_router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")?;

    db_pool.close().await;
    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}

/// Build the HTTP router with generic state type
///
/// Generic over `HasServices` so tests can drive the same routes with their
/// own state.
pub fn build_router<S: HasServices>(state: S) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let timeout = TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        Duration::from_secs(state.config().request_timeout_secs),
    );

    let mut router = Router::new()
        // Health endpoints
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready::<S>))
        // Users
        .route("/api/users", post(api::user::register::<S>))
        .route(
            "/api/users/authenticate",
            post(api::user::authenticate::<S>),
        )
        .route(
            "/api/users/changePassword",
            put(api::user::change_password::<S>),
        )
        // Todo lists
        .route(
            "/api/todoLists",
            get(api::todo_list::list::<S>).post(api::todo_list::create::<S>),
        )
        .route(
            "/api/todoLists/{id}",
            put(api::todo_list::update::<S>).delete(api::todo_list::delete::<S>),
        )
        .route(
            "/api/todoLists/{id}/todoItems",
            get(api::todo_list::list_items::<S>),
        )
        // Todo items
        .route("/api/todoItems", post(api::todo_item::create::<S>))
        .route(
            "/api/todoItems/{id}",
            put(api::todo_item::update::<S>).delete(api::todo_item::delete::<S>),
        );

    if !state.config().is_production() {
        router = router.merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::build()),
        );
    }

    router
        .layer(timeout)
        .layer(axum::middleware::from_fn(normalize_error_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
