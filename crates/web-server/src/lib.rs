use axum::{
    Json,
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use configuration::Settings;
use database::DbRepository;
use provider::RecordStore;
use serde_json::json;
use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowHeaders, AllowOrigin, Any as CorsAny, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
///
/// The store handle is the only stateful collaborator; the service
/// itself is rebuilt per request from it, so no mutable state is ever
/// shared between concurrent requests.
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub settings: Settings,
}

/// The main function to configure and run the web server against the
/// production Postgres store.
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let db_pool = database::connect(&settings.database).await?;
    database::run_migrations(&db_pool).await?;
    let store: Arc<dyn RecordStore> = Arc::new(DbRepository::new(db_pool));

    serve(store, settings).await
}

/// Runs the web server over an arbitrary store implementation. This is
/// what the in-memory dev mode uses.
pub async fn serve(store: Arc<dyn RecordStore>, settings: Settings) -> anyhow::Result<()> {
    let addr = SocketAddr::new(settings.server.host.parse()?, settings.server.port);
    let app = build_router(store, settings);

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Builds the application router. Separated from `serve` so tests can
/// drive it in-process.
pub fn build_router(store: Arc<dyn RecordStore>, settings: Settings) -> Router {
    let debug = settings.app.debug;
    let body_limit = settings.server.body_limit_bytes;
    let state = Arc::new(AppState { store, settings });

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(CorsAny)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    // --- DEFINE THE APPLICATION ROUTES ---
    Router::new()
        .route("/", get(handlers::root))
        .route("/api/health", get(handlers::health))
        .route("/api/v1/analysis", post(handlers::analyze))
        .route("/api/v1/analysis/health", get(handlers::analysis_health))
        .route("/api/v1/score", post(handlers::compute_score))
        .route(
            "/api/v1/records",
            get(handlers::list_records).post(handlers::create_record),
        )
        // Kept outside /records: a static segment cannot share a path
        // node with the :record_id parameter.
        .route("/api/v1/aggregate", get(handlers::get_aggregate))
        .route("/api/v1/records/:record_id", get(handlers::get_record))
        .with_state(state)
        .layer(cors)
        // This middleware automatically logs information about every incoming request.
        .layer(TraceLayer::new_for_http())
        // The outermost safety net: anything that escaped the Outcome
        // contract entirely becomes a generic 500 here.
        .layer(CatchPanicLayer::custom(
            move |panic: Box<dyn Any + Send + 'static>| panic_response(debug, panic),
        ))
        .layer(DefaultBodyLimit::max(body_limit))
}

/// Converts an escaped defect into a generic 500 response.
///
/// The panic payload is included only in debug mode; production callers
/// get a redacted message with no internal type or panic text.
fn panic_response(debug: bool, panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned());

    tracing::error!(message = ?message, "handler panicked");

    let body = if debug {
        json!({
            "error": "Internal server error",
            "details": { "kind": "unexpected", "message": message },
        })
    } else {
        json!({ "error": "Internal server error" })
    };

    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install shutdown signal handler");
        return;
    }
    tracing::info!("shutdown signal received, draining in-flight requests");
}
