//! Common test utilities
//!
//! `TestApp` is an explicit fixture: every test spawns its own server on a
//! random port backed by its own SQLite file, and passes the fixture around.

use todo_core::config::{Config, DatabaseConfig, JwtConfig, SeedConfig, TelemetryConfig};
use todo_core::domain::{CreateTodoItemInput, CreateTodoListInput, StringUuid, User};
use todo_core::jwt::JwtManager;
use todo_core::migration;
use todo_core::repository::todo_item::TodoItemRepositoryImpl;
use todo_core::repository::todo_list::TodoListRepositoryImpl;
use todo_core::repository::user::UserRepositoryImpl;
use todo_core::repository::{TodoItemRepository, TodoListRepository, UserRepository};
use todo_core::server::{self, AppState};
use todo_core::service::user::hash_password;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use sqlx::SqlitePool;
use std::net::SocketAddr;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

#[allow(dead_code)]
pub struct TestApp {
    pub addr: SocketAddr,
    pub config: Config,
    /// Bearer token of the seeded user
    pub token: String,
    pub seed_user_id: StringUuid,
    db_pool: SqlitePool,
    jwt_manager: JwtManager,
    shutdown_tx: Option<oneshot::Sender<()>>,
    server: Option<JoinHandle<anyhow::Result<()>>>,
    // Dropped last so the database file outlives the pools
    _temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestApp {
    /// Create a test configuration pointing at `database_url`
    pub fn test_config(database_url: String) -> Config {
        Config {
            environment: "test".to_string(),
            http_host: "127.0.0.1".to_string(),
            http_port: 0,
            request_timeout_secs: 30,
            database: DatabaseConfig {
                url: database_url,
                max_connections: 5,
                min_connections: 1,
            },
            jwt: JwtConfig {
                secret: "test-secret-key-for-testing-purposes".to_string(),
                issuer: "https://todo.test".to_string(),
                access_token_ttl_secs: 3600,
            },
            telemetry: TelemetryConfig::default(),
            seed: SeedConfig::default(),
        }
    }

    pub async fn spawn() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("todo_test.db");
        let config = Self::test_config(format!("sqlite://{}", db_path.display()));

        let db_pool = migration::connect(&config.database)
            .await
            .expect("Failed to open test database");
        migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");
        let seed_user_id = migration::seed_default_user(&db_pool, &config.seed)
            .await
            .expect("Failed to seed default user");

        let jwt_manager = JwtManager::new(config.jwt.clone());
        let token = jwt_manager
            .create_identity_token(*seed_user_id, &config.seed.email, &config.seed.username)
            .expect("Failed to issue token");

        let state = AppState::new(config.clone(), db_pool.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let addr = listener.local_addr().expect("Failed to get local address");

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let server = tokio::spawn(server::serve(listener, state, async move {
            let _ = shutdown_rx.await;
        }));

        TestApp {
            addr,
            config,
            token,
            seed_user_id,
            db_pool,
            jwt_manager,
            shutdown_tx: Some(shutdown_tx),
            server: Some(server),
            _temp_dir: temp_dir,
        }
    }

    pub fn api_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Client authenticated as the seeded user
    pub fn client(&self) -> reqwest::Client {
        self.client_with_token(&self.token)
    }

    pub fn client_with_token(&self, token: &str) -> reqwest::Client {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).expect("Invalid token header"),
        );
        reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client")
    }

    /// Client without credentials
    pub fn anonymous_client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client")
    }

    /// The fixture's long-lived pool, for seeding rows
    pub fn db(&self) -> &SqlitePool {
        &self.db_pool
    }

    /// A brand new pool on the same database file.
    ///
    /// Use this for every read that checks the effect of an API write.
    pub async fn fresh_db(&self) -> SqlitePool {
        migration::connect(&DatabaseConfig {
            max_connections: 1,
            ..self.config.database.clone()
        })
        .await
        .expect("Failed to open fresh pool")
    }

    /// The well-known seeded user, looked up by email
    pub async fn seeded_user(&self) -> User {
        UserRepositoryImpl::new(self.db_pool.clone())
            .find_by_email(&self.config.seed.email)
            .await
            .expect("Failed to query seed user")
            .expect("Seed user missing")
    }

    /// Insert another user directly and return its id with a bearer token
    pub async fn create_user(&self, username: &str, password: &str) -> (StringUuid, String) {
        let email = format!("{}@example.com", username);
        let password_hash = hash_password(password).expect("Failed to hash password");
        let user = UserRepositoryImpl::new(self.db_pool.clone())
            .create(username, &email, &password_hash)
            .await
            .expect("Failed to create user");
        let token = self
            .jwt_manager
            .create_identity_token(*user.id, &email, username)
            .expect("Failed to issue token");
        (user.id, token)
    }

    /// Insert a todo list owned by `owner` through the fixture pool
    pub async fn insert_list(&self, owner: StringUuid, title: &str) -> StringUuid {
        TodoListRepositoryImpl::new(self.db_pool.clone())
            .create(
                owner,
                &CreateTodoListInput {
                    title: title.to_string(),
                },
            )
            .await
            .expect("Failed to insert todo list")
            .id
    }

    /// Insert a todo item into `todo_list_id` through the fixture pool
    pub async fn insert_item(&self, todo_list_id: StringUuid, title: &str) -> StringUuid {
        TodoItemRepositoryImpl::new(self.db_pool.clone())
            .create(&CreateTodoItemInput {
                todo_list_id,
                title: title.to_string(),
                body: "Seeded item body".to_string(),
            })
            .await
            .expect("Failed to insert todo item")
            .id
    }

    /// Stop the server and wait for it to finish
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.server.take() {
            handle
                .await
                .expect("Server task panicked")
                .expect("Server returned an error");
        }
        self.db_pool.close().await;
    }
}

/// Read a response body as the JSON envelope
#[allow(dead_code)]
pub async fn envelope(response: reqwest::Response) -> serde_json::Value {
    response.json().await.expect("Response body is not JSON")
}
