//! Reusable shop service runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! database init, migrations, default admin seeding, REST API, metrics,
//! and graceful shutdown.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::{OrderService, ProductService, UserService};
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{init_database, SeaOrmRepositoryProvider};
use crate::interfaces::http::middleware::AuthState;
use crate::interfaces::http::{create_router, AppState};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the shop service.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Create default admin user if none exists (default: true).
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

/// Process-wide Prometheus recorder. The global recorder can only be
/// installed once, so restarts within one process reuse it.
pub fn prometheus_handle() -> PrometheusHandle {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    PROM_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("Prometheus metrics recorder installed");
                handle
            }
            Err(e) => {
                warn!("Prometheus recorder not installed, metrics stay local: {}", e);
                PrometheusBuilder::new().build_recorder().handle()
            }
        })
        .clone()
}

/// Build services and router state over an open connection.
pub fn build_app_state(
    db: DatabaseConnection,
    config: &AppConfig,
    metrics: PrometheusHandle,
) -> AppState {
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
    let jwt_config = config.security.to_jwt_config();

    AppState {
        user_service: Arc::new(UserService::new(
            repos.clone(),
            jwt_config.clone(),
            config.security.bcrypt_cost,
        )),
        product_service: Arc::new(ProductService::new(repos.clone())),
        order_service: Arc::new(OrderService::new(
            repos,
            config.orders.transition_policy,
        )),
        auth: AuthState { jwt_config },
        db,
        metrics,
        started_at: Arc::new(Instant::now()),
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running shop service.
///
/// # Examples
///
/// ```rust,no_run
/// use shop_service::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     // ... wait for shutdown signal ...
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the REST API is bound to.
    pub local_addr: SocketAddr,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the shop service with the given options.
    ///
    /// This will:
    /// 1. Install the Prometheus metrics recorder
    /// 2. Connect to the database and run migrations
    /// 3. Create the default admin user (if enabled)
    /// 4. Start the REST API server (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("Starting shop service...");
        let prometheus_handle = prometheus_handle();

        // ── Database ───────────────────────────────────────────
        let db = init_database(&app_cfg.database.to_database_config()).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        let state = build_app_state(db.clone(), &app_cfg, prometheus_handle);

        if opts.create_default_admin {
            create_default_admin(&state.user_service, &app_cfg).await;
        }

        info!(
            policy = ?app_cfg.orders.transition_policy,
            "Order status transition policy"
        );

        // ── REST API server ────────────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let router = create_router(state);

        let listener = tokio::net::TcpListener::bind(app_cfg.server.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API listening on http://{}", local_addr);
        info!("Swagger UI: http://{}/docs", local_addr);

        let signal = shutdown.signal();
        let api_task = tokio::spawn(async move {
            let server = axum::serve(listener, router).with_graceful_shutdown(async move {
                signal.wait().await;
                info!("REST API server received shutdown signal");
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

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop after shutdown has been triggered,
    /// bounded by the configured shutdown timeout.
    pub async fn wait(self) {
        info!("Waiting for in-flight requests to complete...");

        let timeout = Duration::from_secs(self.shutdown.timeout_secs());
        match join_or_abort(self.api_task, timeout).await {
            TaskExit::Finished => info!("REST API server stopped"),
            TaskExit::Panicked(e) => error!("REST API server task panicked: {}", e),
            TaskExit::Aborted => warn!(
                timeout_secs = timeout.as_secs(),
                "Shutdown timeout elapsed, in-flight requests aborted"
            ),
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }

        info!("Shop service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down shop service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

enum TaskExit {
    Finished,
    Panicked(tokio::task::JoinError),
    Aborted,
}

/// Wait up to `timeout` for `task`, aborting it if it is still running.
async fn join_or_abort(mut task: tokio::task::JoinHandle<()>, timeout: Duration) -> TaskExit {
    match tokio::time::timeout(timeout, &mut task).await {
        Ok(Ok(())) => TaskExit::Finished,
        Ok(Err(e)) => TaskExit::Panicked(e),
        Err(_) => {
            task.abort();
            // Abort takes effect at the next poll; wait for the task to unwind.
            let _ = task.await;
            TaskExit::Aborted
        }
    }
}

/// Create the default admin user if no users exist in the database.
async fn create_default_admin(users: &UserService, app_cfg: &AppConfig) {
    let admin = &app_cfg.admin;
    match users
        .ensure_default_admin(&admin.name, &admin.email, &admin.password)
        .await
    {
        Ok(true) => info!(email = %admin.email, "Default admin created"),
        Ok(false) => {}
        Err(e) => error!("Failed to create admin user: {}", e),
    }
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let result = match config.logging.format.to_lowercase().as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init(),
    };

    if let Err(e) = result {
        eprintln!("tracing already initialised: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn finished_task_is_joined() {
        let task = tokio::spawn(async {});
        let exit = join_or_abort(task, Duration::from_secs(1)).await;
        assert!(matches!(exit, TaskExit::Finished));
    }

    #[tokio::test]
    async fn stuck_task_is_aborted_after_timeout() {
        let (alive_tx, alive_rx) = tokio::sync::oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let _alive = alive_tx;
            std::future::pending::<()>().await;
        });

        let exit = join_or_abort(task, Duration::from_millis(20)).await;
        assert!(matches!(exit, TaskExit::Aborted));
        // The sender is dropped only once the task has been torn down.
        assert!(alive_rx.await.is_err());
    }
}
