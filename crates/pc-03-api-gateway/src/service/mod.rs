//! API Gateway service: router assembly and server lifecycle.

use crate::domain::config::GatewayConfig;
use crate::domain::error::GatewayError;
use crate::handlers::{chain, feed, health, media, transact, AppState};
use crate::middleware::create_cors_layer;
use crate::ports::BlobStore;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use pc_02_chain_ledger::Ledger;
use std::future::Future;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::map_response_body::MapResponseBodyLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the HTTP router.
///
/// Layer order: Request → CORS → Trace → BodyLimit → [Timeout] → Handler
///
/// Ledger writes carry no timeout: dropping the handler does not cancel the
/// blocking commit.
pub fn build_router(state: AppState, config: &GatewayConfig) -> Router {
    let json_limit = DefaultBodyLimit::max(config.limits.max_json_size);

    let middleware = ServiceBuilder::new()
        .layer(create_cors_layer(&config.cors))
        .layer(MapResponseBodyLayer::new(axum::body::Body::new))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(config.limits.max_body_size));

    let ledger_writes = Router::new()
        .route("/audit", get(chain::audit))
        .route("/transact", post(transact::transact).layer(json_limit.clone()))
        .route("/register", post(transact::register).layer(json_limit));

    Router::new()
        .route("/chain", get(chain::get_chain))
        .route("/upload", post(media::upload))
        .route("/feed/:username", get(feed::home_feed))
        .route("/explore", get(feed::explore))
        .route("/users", get(feed::search_users))
        .route("/users/:username/posts", get(feed::user_posts))
        .route("/users/:username/activity", get(feed::activity))
        .route("/health", get(health::health_check))
        .nest_service("/files", ServeDir::new(&config.uploads.dir))
        .layer(TimeoutLayer::new(config.timeouts.request))
        .merge(ledger_writes)
        .layer(middleware)
        .with_state(state)
}

/// API Gateway service
pub struct ApiGatewayService {
    config: GatewayConfig,
    state: AppState,
}

impl ApiGatewayService {
    /// Create a new API Gateway service
    pub fn new(
        config: GatewayConfig,
        ledger: Arc<Ledger>,
        blobs: Arc<dyn BlobStore>,
    ) -> Result<Self, GatewayError> {
        config.validate()?;
        Ok(Self {
            config,
            state: AppState::new(ledger, blobs),
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone(), &self.config)
    }

    /// Bind and serve until `shutdown` resolves.
    pub async fn serve<F>(self, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.http_addr();
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(GatewayError::Bind)?;
        info!("[pc-03] 🌐 HTTP server listening on {}", addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(GatewayError::Serve)?;

        info!("[pc-03] 🛑 HTTP server stopped");
        Ok(())
    }
}
