//! TaxIQ API Server
//!
//! Thin JSON boundary over the tax engine: regime comparison, deduction
//! suggestions, and optional persistence of computed recommendations.

pub mod tax_routes;

use advice_store::AdviceStore;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared state for all routes.
#[derive(Clone)]
pub struct AppState {
    /// `None` when DATABASE_URL is unset or the store failed to open;
    /// the calculator works the same either way.
    pub store: Option<AdviceStore>,
}

impl AppState {
    pub async fn from_env() -> Self {
        let store = match std::env::var("DATABASE_URL") {
            Ok(url) => match AdviceStore::new(&url).await {
                Ok(store) => Some(store),
                Err(err) => {
                    tracing::warn!(
                        "advice store unavailable, persistence disabled: {err}"
                    );
                    None
                }
            },
            Err(_) => None,
        };
        Self { store }
    }
}

/// Uniform JSON envelope for every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Route-level error: anything internal becomes a 500 carrying the
/// message in the standard envelope.
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(self.0.to_string())),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "ok",
        service: "taxiq-api",
        version: env!("CARGO_PKG_VERSION"),
    }))
}

/// Assemble the router with CORS and request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .merge(tax_routes::tax_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until shutdown. Reads TAXIQ_PORT (fallback PORT,
/// default 3000) and the optional DATABASE_URL.
pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_server=info,tower_http=warn".into()),
        )
        .init();

    let state = AppState::from_env().await;
    if state.store.is_some() {
        tracing::info!("recommendation persistence enabled");
    }

    let port: u16 = std::env::var("TAXIQ_PORT")
        .or_else(|_| std::env::var("PORT"))
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(3000);

    let app = router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
