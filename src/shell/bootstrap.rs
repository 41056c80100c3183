// Startup pipeline.
//
// Steps run strictly in order and the pipeline halts at the first failure:
// both backends are connected before any middleware or route is registered,
// so no request can reach an unready database.
//
// Phases
// - Initializing: from construction until the listener is bound.
// - Serving: listener bound, ready to accept connections.
// - Terminated: a step failed. There is no way back; restart the process.

use crate::shared::infrastructure::connectors::{ConnectionError, Connector};
use crate::shell::config::AppConfig;
use crate::shell::http;
use crate::shell::route_groups::RouteGroups;
use crate::shell::state::AppState;
use axum::{Router, routing::get};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("database connection failed")]
    Database(#[source] ConnectionError),

    #[error("media host connection failed")]
    MediaHost(#[source] ConnectionError),

    #[error("bootstrap already ran and is {0:?}; restart the process instead")]
    AlreadyStarted(Phase),

    #[error("failed to bind listener on {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initializing,
    Serving,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupStep {
    ConnectDatabase,
    ConnectMediaHost,
    ConfigureCors,
    ConfigureBodyParsing,
    ConfigureStaticAssets,
    MountRoutes,
    RegisterLivenessEndpoint,
    StartListener,
}

pub type StateOf<TDatabaseConnector, TMediaHostConnector> = AppState<
    <TDatabaseConnector as Connector>::Handle,
    <TMediaHostConnector as Connector>::Handle,
>;

pub struct Bootstrap<TDatabaseConnector, TMediaHostConnector>
where
    TDatabaseConnector: Connector,
    TMediaHostConnector: Connector,
{
    config: Arc<AppConfig>,
    database: TDatabaseConnector,
    media_host: TMediaHostConnector,
    phase: Phase,
    completed: Vec<StartupStep>,
}

impl<TDatabaseConnector, TMediaHostConnector> Bootstrap<TDatabaseConnector, TMediaHostConnector>
where
    TDatabaseConnector: Connector,
    TMediaHostConnector: Connector,
{
    pub fn new(
        config: AppConfig,
        database: TDatabaseConnector,
        media_host: TMediaHostConnector,
    ) -> Self {
        Self {
            config: Arc::new(config),
            database,
            media_host,
            phase: Phase::Initializing,
            completed: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn completed_steps(&self) -> &[StartupStep] {
        &self.completed
    }

    /// Runs the whole pipeline. On success the listener is bound and the
    /// returned server only needs to be driven with [`Running::serve`].
    pub async fn start(
        &mut self,
        routes: RouteGroups<StateOf<TDatabaseConnector, TMediaHostConnector>>,
    ) -> Result<Running, BootstrapError> {
        if self.phase != Phase::Initializing {
            return Err(BootstrapError::AlreadyStarted(self.phase));
        }
        match self.run_pipeline(routes).await {
            Ok(running) => {
                self.phase = Phase::Serving;
                Ok(running)
            }
            Err(e) => {
                self.phase = Phase::Terminated;
                match std::error::Error::source(&e) {
                    Some(cause) => error!(error = %e, %cause, "startup aborted"),
                    None => error!(error = %e, "startup aborted"),
                }
                Err(e)
            }
        }
    }

    fn complete(&mut self, step: StartupStep) {
        debug!(?step, "startup step completed");
        self.completed.push(step);
    }

    async fn run_pipeline(
        &mut self,
        routes: RouteGroups<StateOf<TDatabaseConnector, TMediaHostConnector>>,
    ) -> Result<Running, BootstrapError> {
        let database = self
            .database
            .connect()
            .await
            .map_err(BootstrapError::Database)?;
        info!("Database connected");
        self.complete(StartupStep::ConnectDatabase);

        let media_host = self
            .media_host
            .connect()
            .await
            .map_err(BootstrapError::MediaHost)?;
        info!("Media host connected");
        self.complete(StartupStep::ConnectMediaHost);

        let state = AppState {
            config: self.config.clone(),
            database: Arc::new(database),
            media_host: Arc::new(media_host),
        };

        let cors = http::cors_layer(&self.config.allowed_origins);
        self.complete(StartupStep::ConfigureCors);

        let body_limit = http::body_limit_layer(self.config.json_body_limit);
        self.complete(StartupStep::ConfigureBodyParsing);

        let app = Router::new().nest_service(
            http::STATIC_ASSETS_PREFIX,
            http::static_assets(&self.config.static_dir),
        );
        self.complete(StartupStep::ConfigureStaticAssets);

        let app = routes.mount(app);
        self.complete(StartupStep::MountRoutes);

        let app = app.route(http::LIVENESS_PATH, get(http::liveness));
        self.complete(StartupStep::RegisterLivenessEndpoint);

        // Layers wrap everything registered above; the last one added runs first.
        let app = app
            .layer(body_limit)
            .layer(cors)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(http::MakeRequestUuid))
            .with_state(state);

        let addr = SocketAddr::new(self.config.host, self.config.port);
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| BootstrapError::Bind { addr, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| BootstrapError::Bind { addr, source })?;
        info!("Server running on PORT: {}", local_addr.port());
        self.complete(StartupStep::StartListener);

        Ok(Running {
            listener,
            app,
            local_addr,
        })
    }
}

/// A bound listener with its fully composed application.
pub struct Running {
    listener: TcpListener,
    app: Router,
    local_addr: SocketAddr,
}

impl Running {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Accepts connections until `shutdown` resolves, then drains in-flight
    /// requests.
    pub async fn serve<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.app)
            .with_graceful_shutdown(shutdown)
            .await
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
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
                error!(error = %e, "failed to listen for SIGTERM");
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
    info!("shutdown signal received");
}
