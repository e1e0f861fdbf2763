// Mortgage Calculator - Web Server
// Server-rendered calculator page plus a small JSON API

use axum::{
    extract::RawQuery,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use mortgage_calc::{
    compute, parse_query, render_page, rows, to_query_string, LoanInputs, LoanSummary, PageMeta,
    ReportRow, ServerConfig, VERSION,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

/// Inputs and outputs together, as the page loader sees them
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ComputeResponse {
    inputs: LoanInputs,
    summary: LoanSummary,
    net_monthly_cost: f64,
    share_query: String,
    /// Display rows, formatted as on the page
    rows: Vec<ReportRow>,
    meta: PageMeta,
    /// Field problems for callers that want strict input; the figures are
    /// still returned
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

impl From<LoanInputs> for ComputeResponse {
    fn from(inputs: LoanInputs) -> Self {
        let summary = compute(&inputs);
        let warnings = match inputs.validate() {
            Ok(()) => Vec::new(),
            Err(issues) => issues.iter().map(|i| i.to_string()).collect(),
        };

        Self {
            net_monthly_cost: summary.net_monthly_cost(inputs.rent),
            share_query: to_query_string(&inputs),
            rows: rows(&inputs, &summary),
            meta: PageMeta::new(&inputs, &summary),
            inputs,
            summary,
            warnings,
        }
    }
}

fn inputs_from(query: Option<String>) -> LoanInputs {
    query.as_deref().map(parse_query).unwrap_or_default()
}

/// Share links point back at whatever host and scheme the page was requested
/// on. Behind a proxy the scheme comes from `X-Forwarded-Proto`.
fn base_url(headers: &HeaderMap) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost:3000");

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| v == "http" || v == "https")
        .unwrap_or_else(|| "http".to_string());

    format!("{}://{}", scheme, host)
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/compute?<query> - Derived figures as JSON.
/// serde_json writes non-finite floats as null.
async fn compute_summary(RawQuery(query): RawQuery) -> impl IntoResponse {
    let response = ComputeResponse::from(inputs_from(query));
    (StatusCode::OK, Json(ApiResponse::ok(response)))
}

/// GET /?<query> - Calculator page
async fn serve_index(headers: HeaderMap, RawQuery(query): RawQuery) -> impl IntoResponse {
    let inputs = inputs_from(query);
    Html(render_page(&inputs, &base_url(&headers)))
}

fn build_router() -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/compute", get(compute_summary));

    Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mortgage_calc=info,mortgage_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let addr = config.addr();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", addr, e))?;

    info!("🚀 Mortgage calculator v{} running on http://{}", VERSION, addr);
    info!("   API: http://{}/api/compute", addr);

    axum::serve(listener, build_router()).await?;
    Ok(())
}
