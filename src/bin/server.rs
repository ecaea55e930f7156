use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use bar_cutter::parse::parse_cut_list;
use bar_cutter::presets::{self, PRESETS, Preset};
use bar_cutter::types::{
    CutRequest, deserialize_u32_from_number, deserialize_u32_vec_from_numbers, expand_requests,
};
use bar_cutter::{Plan, PlanError, Summary, plan, summarize};
use serde::{Deserialize, Serialize};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Deserialize, Serialize)]
struct OptimizeRequest {
    #[serde(default)]
    cuts: Vec<CutRequest>,
    /// Free-text alternative to `cuts`, e.g. "1200x4, 800x2".
    #[serde(default)]
    cut_spec: Option<String>,
    #[serde(default, deserialize_with = "deserialize_u32_vec_from_numbers")]
    stock_lengths: Vec<u32>,
    #[serde(default)]
    preset: Option<String>,
    #[serde(default, deserialize_with = "deserialize_u32_from_number")]
    kerf: u32,
}

#[derive(Serialize)]
struct OptimizeResponse {
    plans: Vec<Plan>,
    summary: Summary,
}

type ApiError = (StatusCode, String);

fn bad_request(msg: impl ToString) -> ApiError {
    (StatusCode::BAD_REQUEST, msg.to_string())
}

fn run_optimize(req: OptimizeRequest) -> Result<OptimizeResponse, ApiError> {
    let mut stock = Vec::new();
    if let Some(name) = &req.preset {
        let preset =
            presets::find(name).ok_or_else(|| bad_request(format!("unknown preset '{}'", name)))?;
        stock.extend_from_slice(preset.stock_lengths);
    }
    for length in req.stock_lengths {
        if !stock.contains(&length) {
            stock.push(length);
        }
    }

    let mut requests = req.cuts;
    if let Some(spec) = &req.cut_spec {
        requests.extend(parse_cut_list(spec).map_err(bad_request)?);
    }
    if requests.iter().any(|c| c.qty == 0) {
        return Err(bad_request("cut quantity must be non-zero"));
    }
    let cuts = expand_requests(&requests).map_err(bad_request)?;

    let plans = plan(&cuts, &stock, req.kerf).map_err(|e| match e {
        PlanError::InvalidInput(_) => bad_request(e),
        PlanError::InsufficientStock { .. } => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
    })?;
    let summary = summarize(&plans, req.kerf);

    Ok(OptimizeResponse { plans, summary })
}

async fn optimize(Json(req): Json<OptimizeRequest>) -> Result<Json<OptimizeResponse>, ApiError> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /optimize"
    );

    let response = run_optimize(req).inspect_err(|(status, msg)| {
        tracing::info!(%status, error = %msg, "optimize rejected");
    })?;
    tracing::info!(
        bars = response.summary.total_stock_used,
        efficiency = response.summary.efficiency,
        "optimize done"
    );
    Ok(Json(response))
}

async fn list_presets() -> Json<&'static [Preset]> {
    Json(PRESETS)
}

fn init_sentry() -> Option<sentry::ClientInitGuard> {
    let dsn = std::env::var("SENTRY_DSN").ok().filter(|d| !d.is_empty())?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

fn main() {
    let _sentry = init_sentry();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
        .block_on(serve());
}

async fn serve() {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    let app = Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/presets", get(list_presets))
        .route("/optimize", post(optimize))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listener");
    eprintln!("Listening on {addr}");
    axum::serve(listener, app).await.expect("server error");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> OptimizeRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_optimize_with_cut_list() {
        let resp = run_optimize(request(
            r#"{"cuts": [{"length": 1000, "qty": 5}], "stock_lengths": [3000], "kerf": 0}"#,
        ))
        .unwrap();
        assert_eq!(resp.plans.len(), 2);
        assert_eq!(resp.summary.total_stock_used, 2);
        assert_eq!(resp.summary.total_waste, 1000);
    }

    #[test]
    fn test_optimize_with_preset_and_cut_spec() {
        let resp = run_optimize(request(
            r#"{"cut_spec": "2900 x 4", "preset": "structural-steel", "kerf": 0.0}"#,
        ))
        .unwrap();
        assert_eq!(resp.plans.len(), 1);
        assert_eq!(resp.plans[0].stock_length, 12100);
    }

    #[test]
    fn test_optimize_insufficient_stock() {
        let err = run_optimize(request(
            r#"{"cuts": [{"length": 2500}], "stock_lengths": [2000]}"#,
        ))
        .err()
        .unwrap();
        assert_eq!(err.0, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.1.contains("2500"));
    }

    #[test]
    fn test_optimize_bad_input() {
        let err = run_optimize(request(r#"{"cuts": [{"length": 100}]}"#))
            .err()
            .unwrap();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);

        let err = run_optimize(request(
            r#"{"cut_spec": "100x0", "stock_lengths": [6000]}"#,
        ))
        .err()
        .unwrap();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);

        let err = run_optimize(request(r#"{"preset": "plywood"}"#)).err().unwrap();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_optimize_rejects_oversized_quantity() {
        let err = run_optimize(request(
            r#"{"cuts": [{"length": 100, "qty": 4294967295}], "stock_lengths": [6000]}"#,
        ))
        .err()
        .unwrap();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert!(err.1.contains("at most"));
    }
}
