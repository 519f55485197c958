use super::config::HttpConfig;
use super::shutdown::shutdown_signal;
use crate::errors::handlers::{method_not_allowed, panic_response};
use crate::http::security::security_headers;
use axum::http::{HeaderValue, header};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Wraps the API routes with documentation, fallbacks and cross-cutting middleware.
///
/// This sets up:
/// - Swagger UI at `/swagger-ui`, OpenAPI document at `/api-docs/openapi.json`
/// - `apis` nested under `config.base_path`
/// - a 405 envelope for every unmatched path or method
/// - panic recovery answering a 500 envelope
/// - request tracing, security headers, the `Server` header, compression
/// - a global limit of `config.max_concurrent_requests` in-flight requests
///
/// Health endpoints are merged by the caller afterwards so they stay outside
/// the API prefix and its authentication.
///
/// # Errors
/// Returns `InvalidInput` if `config.server_header` is not a valid header value.
pub fn create_router<T>(apis: Router, config: &HttpConfig) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let server_header = HeaderValue::from_str(&config.server_header).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Invalid SERVER_HEADER value: {}", e),
        )
    })?;

    info!(
        base_path = %config.base_path,
        max_concurrent_requests = config.max_concurrent_requests,
        "Building HTTP router"
    );

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .nest(&config.base_path, apis)
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(method_not_allowed)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::SERVER,
            server_header,
        ))
        .layer(CompressionLayer::new())
        .layer(GlobalConcurrencyLimitLayer::new(
            config.max_concurrent_requests,
        ));

    Ok(router)
}

/// Serves `router` until SIGINT/SIGTERM, then runs `cleanup`.
///
/// In-flight requests are drained before `cleanup` starts. `cleanup` (closing
/// the database pool and the like) is abandoned after `shutdown_timeout`.
///
/// ```ignore
/// create_production_app(router, &config, Duration::from_secs(30), async move {
///     db.close().await.ok();
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => tracing::warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    serve_result
}
