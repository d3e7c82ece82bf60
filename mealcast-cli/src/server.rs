//! HTTP entry point for recommendations.
//!
//! `GET|POST /api/recommend` runs one pass when the `x-api-key` header
//! matches the configured secret. `GET /health` reports liveness.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use log::{error, info};
use serde_json::json;

use crate::CliError;
use crate::config::ServeArgs;
use crate::handler::{ApiResponse, handle_recommend};
use crate::recommend::{HttpPassBuilder, PassBuilder, RecommendPass};

/// Header carrying the shared secret.
pub(crate) const API_KEY_HEADER: &str = "x-api-key";

#[derive(Clone)]
struct AppState {
    pass: Arc<dyn RecommendPass>,
    secret: Arc<str>,
}

/// Build the application router.
pub(crate) fn router(pass: Arc<dyn RecommendPass>, secret: &str) -> Router {
    let state = AppState {
        pass,
        secret: Arc::from(secret),
    };
    Router::new()
        .route("/api/recommend", get(recommend).post(recommend))
        .route("/health", get(health))
        .with_state(state)
}

async fn recommend(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let presented = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    // The pass blocks on outbound HTTP, so keep it off the async workers.
    let outcome = tokio::task::spawn_blocking(move || {
        handle_recommend(
            state.pass.as_ref(),
            &state.secret,
            presented.as_deref(),
            Utc::now(),
        )
    })
    .await;
    match outcome {
        Ok(reply) => into_http(reply),
        Err(err) => {
            error!("recommendation task failed: {err}");
            into_http(ApiResponse::internal(err))
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

fn into_http(reply: ApiResponse) -> Response {
    let status =
        StatusCode::from_u16(reply.status.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(reply.body)).into_response()
}

pub(super) fn run_serve(args: ServeArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.pass.validate_sources()?;
    // Built before the runtime so the adapters' own runtimes are dropped
    // outside of it.
    let pass: Arc<dyn RecommendPass> = Arc::from(HttpPassBuilder.build(&config.pass)?);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let app = router(Arc::clone(&pass), &config.api_secret);
    let outcome = runtime.block_on(serve(config.bind, app));
    drop(runtime);
    drop(pass);
    outcome
}

async fn serve(addr: SocketAddr, app: Router) -> Result<(), CliError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| CliError::Serve { addr, source })?;
    info!("serving recommendations on http://{addr}/api/recommend");
    axum::serve(listener, app)
        .await
        .map_err(|source| CliError::Serve { addr, source })
}
