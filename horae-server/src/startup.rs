//! Server startup and shutdown logic

use anyhow::{Context, Result};
use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::get,
    Router,
};
use horae_graphql_api::{graphql_router, GraphQLState};
use horae_i18n::{CatalogStore, Locale};
use horae_web::{cors_layer_with_config, handle_not_found, negotiate_language, request_id_middleware, CorsConfig};
use tower_http::trace::TraceLayer;

use crate::{services::ServiceContainer, HoraeConfig};

/// Server application struct
pub struct Server {
    config: HoraeConfig,
    services: ServiceContainer,
}

impl Server {
    /// Initialize logging and build all services
    ///
    /// Fails when any message catalog cannot be loaded.
    pub fn new(config: HoraeConfig) -> Result<Self> {
        crate::services::init_logging(&config.logging);

        let services = ServiceContainer::new(&config).context("Failed to initialize services")?;
        Ok(Self { config, services })
    }

    /// Assemble a server from prebuilt services
    pub fn with_services(config: HoraeConfig, services: ServiceContainer) -> Self {
        Self { config, services }
    }

    /// Build the complete application router
    pub fn build_app(&self) -> Router {
        let graphql_state = GraphQLState {
            registry: self.services.registry.clone(),
            endpoint: self.config.graphql.endpoint.clone(),
        };

        let info = Router::new()
            .route("/", get(root_handler))
            .route("/health", get(health_handler))
            .with_state(InfoState {
                catalogs: self.services.catalogs.clone(),
                graphql_endpoint: self.config.graphql.endpoint.clone(),
            });

        let mut app = graphql_router(graphql_state, self.config.graphql.enable_graphiql)
            .merge(info)
            .fallback(handle_not_found);

        // Inside negotiation, so the request span knows the language
        if self.config.server.enable_request_id {
            app = app.layer(middleware::from_fn(request_id_middleware));
        }

        app = app.layer(middleware::from_fn_with_state(
            self.services.negotiator.clone(),
            negotiate_language,
        ));

        if self.config.server.enable_tracing {
            app = app.layer(TraceLayer::new_for_http());
        }

        if self.config.server.enable_cors {
            let cors = CorsConfig::with_origins(self.config.server.cors_allowed_origins.clone());
            app = app.layer(cors_layer_with_config(cors));
        }

        app
    }

    /// Start the server
    pub async fn start(self) -> Result<()> {
        let addr = self.config.server.socket_addr()?;
        let app = self.build_app();

        self.log_config_summary();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Log configuration summary
    fn log_config_summary(&self) {
        let locales: Vec<&str> = self.services.catalogs.available_locales().iter().map(Locale::as_str).collect();

        tracing::info!("=== Horae Server Configuration ===");
        tracing::info!("Bind Address: {}:{}", self.config.server.bind_address, self.config.server.port);
        tracing::info!("GraphQL Endpoint: {}", self.config.graphql.endpoint);
        tracing::info!("Locales: {} (default {})", locales.join(", "), self.services.catalogs.default_locale());
        tracing::info!("Timezone: {}", self.config.graphql.timezone);
        tracing::info!("CORS: {}", if self.config.server.enable_cors { "Enabled" } else { "Disabled" });
        tracing::info!("Request ID: {}", if self.config.server.enable_request_id { "Enabled" } else { "Disabled" });

        if self.config.graphql.enable_graphiql {
            tracing::info!(
                "GraphiQL: http://{}:{}{}",
                self.config.server.bind_address,
                self.config.server.port,
                self.config.graphql.endpoint
            );
        }

        tracing::info!("==================================");
    }
}

/// State for the informational routes
#[derive(Clone)]
struct InfoState {
    catalogs: CatalogStore,
    graphql_endpoint: String,
}

/// Root handler
async fn root_handler(State(state): State<InfoState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "Horae",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "graphql": state.graphql_endpoint,
            "schema": "/schema",
            "health": "/health"
        }
    }))
}

/// Health handler listing the loaded locales
async fn health_handler(State(state): State<InfoState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "locales": state.catalogs.available_locales().iter().map(Locale::as_str).collect::<Vec<_>>(),
        "default_locale": state.catalogs.default_locale().as_str(),
    }))
}

/// Graceful shutdown signal
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

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
