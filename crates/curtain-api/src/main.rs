use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use curtain_core::{
    FabricCatalog, FoldAllowance, LayoutRequest, OptimizationResult, Optimizer, OptimizerError,
    STANDARD_ROLL_LENGTH,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("Starting Curtain Cut Planner API");

    let addr = std::env::var("CURTAIN_API_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("API server listening on http://{}", addr);
    info!("Try: curl http://{}/api/health", addr);

    axum::serve(listener, app()).await?;

    Ok(())
}

fn app() -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/catalog", get(catalog))
        .route("/api/optimize", post(optimize))
        .layer(CorsLayer::permissive())
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "curtain-cut-planner-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Standard widths and defaults a client can prefill a form with
async fn catalog() -> Json<serde_json::Value> {
    Json(json!({
        "fabric_widths": FabricCatalog::standard(),
        "allowance": FoldAllowance::default(),
        "roll_length": STANDARD_ROLL_LENGTH,
    }))
}

/// Main optimization endpoint
async fn optimize(
    Json(request): Json<LayoutRequest>,
) -> Result<Json<OptimizationResult>, AppError> {
    info!(
        "Received request for a {}mm curtain with {} rolls in stock",
        request.curtain.width,
        request.inventory.total_rolls()
    );

    let optimizer = Optimizer::new(request)?;
    let result = optimizer.optimize()?;

    info!(
        "Optimization complete: {} panels of {}mm, {:.1}mm waste",
        result.solution.part_count, result.solution.fabric_width, result.solution.waste
    );

    Ok(Json(result))
}

/// Application error type
struct AppError(OptimizerError);

impl From<OptimizerError> for AppError {
    fn from(err: OptimizerError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request error: {}", self.0);

        // Every optimizer error is caused by the request
        let status = match self.0 {
            OptimizerError::InvalidInput(_)
            | OptimizerError::EmptyInventory
            | OptimizerError::NoValidSolution => StatusCode::BAD_REQUEST,
        };

        (
            status,
            Json(json!({
                "error": self.0.to_string(),
            })),
        )
            .into_response()
    }
}
