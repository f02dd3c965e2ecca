//! Server runtime
//!
//! [`ServerHandle`] owns the whole lifecycle: metrics recorder, database
//! connection and migrations, default admin, the REST API listener and
//! graceful shutdown. The CLI binary is a thin wrapper around it.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::{DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::application::{ActorService, CustomerService};
use crate::config::{AppConfig, ConfigError};
use crate::infrastructure::crypto::jwt::{JwtConfig, TokenIssuer, TokenVerifier};
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::database::repositories::{ActorRepository, CustomerRepository};
use crate::infrastructure::{init_database, DatabaseConfig};
use crate::interfaces::http::modules::health::HealthState;
use crate::interfaces::http::modules::metrics::MetricsState;
use crate::interfaces::http::{create_api_router, AppState, AuthState};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};
use crate::shared::DomainError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("Failed to install metrics recorder: {0}")]
    Metrics(String),

    #[error("Failed to create default admin: {0}")]
    Admin(#[from] DomainError),
}

// ── Options ────────────────────────────────────────────────────────

pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Seed the default admin when no actors exist (default: true).
    pub create_default_admin: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            create_default_admin: true,
        }
    }
}

// ── Wiring ─────────────────────────────────────────────────────────

/// Assemble services and HTTP state over an open database connection.
pub fn build_app_state(db: &DatabaseConnection, config: &AppConfig, metrics: PrometheusHandle) -> AppState {
    let jwt = JwtConfig::new(config.security.signing_secret(), config.security.token_ttl_secs);

    let actors = Arc::new(ActorService::new(
        Arc::new(ActorRepository::new(db.clone())),
        TokenIssuer::new(&jwt),
        config.security.bcrypt_cost,
    ));
    let customers = Arc::new(CustomerService::new(Arc::new(CustomerRepository::new(
        db.clone(),
    ))));

    AppState {
        actors,
        customers,
        auth: AuthState {
            verifier: TokenVerifier::new(&jwt),
        },
        health: HealthState {
            db: db.clone(),
            started_at: Arc::new(Instant::now()),
        },
        metrics: MetricsState { handle: metrics },
    }
}

/// The global recorder can only be installed once per process; later
/// starts in the same process reuse the first handle.
fn prometheus_handle() -> Result<PrometheusHandle, ServerError> {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    if let Some(handle) = PROM_HANDLE.get() {
        return Ok(handle.clone());
    }
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServerError::Metrics(e.to_string()))?;
    info!("Prometheus metrics recorder installed");
    Ok(PROM_HANDLE.get_or_init(|| handle).clone())
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running CRM service.
///
/// ```rust,no_run
/// use crm_backend::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub config: AppConfig,
    /// Address the API listener is bound to
    pub local_addr: SocketAddr,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Connect, migrate, seed and start serving.
    pub async fn start(opts: ServerOptions) -> Result<Self, ServerError> {
        let app_cfg = opts.config;
        app_cfg.validate()?;
        info!("Starting CRM service...");

        let prometheus = prometheus_handle()?;

        let db_config = DatabaseConfig::from(&app_cfg.database);
        let db = init_database(&db_config).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        let state = build_app_state(&db, &app_cfg, prometheus);

        if opts.create_default_admin && app_cfg.admin.enabled {
            create_default_admin(&state.actors, &app_cfg).await?;
        }

        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let router = create_api_router(state);

        let addr = app_cfg.server.address();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;
        let local_addr = listener.local_addr().map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
        info!("REST API listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown.signal();
        let api_task = tokio::spawn(async move {
            let server = axum::serve(listener, router).with_graceful_shutdown(async move {
                api_shutdown.wait().await;
                info!("REST API received shutdown signal");
            });
            if let Err(e) = server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install SIGTERM/SIGINT listeners that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the listener to drain (bounded by the shutdown timeout),
    /// then close the database pool.
    pub async fn wait(self) {
        info!("Waiting for in-flight requests to complete...");

        match tokio::time::timeout(self.shutdown.timeout(), self.api_task).await {
            Ok(Ok(())) => info!("REST API server stopped"),
            Ok(Err(e)) => error!("REST API server task panicked: {}", e),
            Err(_) => warn!(
                "REST API did not stop within {:?}, closing anyway",
                self.shutdown.timeout()
            ),
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }

        info!("CRM service shutdown complete");
    }

    pub async fn shutdown(self) {
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

async fn create_default_admin(actors: &ActorService, app_cfg: &AppConfig) -> Result<(), DomainError> {
    if let Some(admin) = actors
        .ensure_admin(&app_cfg.admin.username, &app_cfg.admin.password)
        .await?
    {
        info!("Default admin created: {}", admin.username);
        warn!("Change the default admin password immediately");
    }
    Ok(())
}

/// Initialize tracing from the logging config. `RUST_LOG` wins over
/// `logging.level`. Call once at process startup.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match config.logging.format.to_lowercase().as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };
    if let Err(e) = result {
        eprintln!("Tracing already initialised: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        let mut cfg = AppConfig::default();
        cfg.server.host = "127.0.0.1".to_string();
        cfg.server.port = 0;
        cfg.server.shutdown_timeout = 5;
        cfg.database.url = "sqlite::memory:".to_string();
        cfg.database.max_connections = 1;
        cfg.database.min_connections = 1;
        cfg.security.bcrypt_cost = 4;
        cfg
    }

    #[tokio::test]
    async fn start_rejects_invalid_config() {
        let mut cfg = test_config();
        cfg.security.token_ttl_secs = 0;
        let result = ServerHandle::start(ServerOptions {
            config: cfg,
            ..Default::default()
        })
        .await;
        assert!(matches!(result, Err(ServerError::Config(_))));
    }

    #[tokio::test]
    async fn start_serves_health_and_shuts_down() {
        let handle = ServerHandle::start(ServerOptions {
            config: test_config(),
            auto_migrate: true,
            create_default_admin: true,
        })
        .await
        .unwrap();
        assert!(handle.is_running());
        assert_ne!(handle.local_addr.port(), 0);

        let mut stream = tokio::net::TcpStream::connect(handle.local_addr).await.unwrap();
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf).await.unwrap();
        let text = String::from_utf8_lossy(&buf);
        assert!(text.starts_with("HTTP/1.1 200"));
        assert!(text.contains("x-request-id"));

        handle.shutdown().await;
    }
}
