//! HTTP server wiring for CodePaste (routes, middleware, and shared state).

/// HTTP error mapping for API handlers.
pub mod error;
/// HTTP handlers for register, paste, and get endpoints.
pub mod handlers;

pub use codepaste_core::{config, models, AppError, Config, PasteService, DEFAULT_PORT};

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};

/// Shared state passed to HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PasteService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Construct shared application state with a fresh, empty service.
    pub fn new(config: Config) -> Self {
        let service = PasteService::new(&config);
        Self::with_service(config, service)
    }

    /// Construct shared application state around a pre-built service.
    pub fn with_service(config: Config, service: PasteService) -> Self {
        Self {
            service: Arc::new(service),
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes and middleware.
///
/// # Arguments
/// - `state`: Shared application state.
/// - `allow_public_access`: Whether to allow cross-origin requests from any origin.
pub fn create_app(state: AppState, allow_public_access: bool) -> Router {
    let cors_port = state.config.port;
    create_app_with_cors_port(state, allow_public_access, cors_port)
}

/// Resolve the listener address from env var overrides and security policy.
///
/// # Returns
/// A socket address that enforces loopback when public access is disabled.
pub fn resolve_bind_address(config: &Config, allow_public_access: bool) -> SocketAddr {
    let default_bind = SocketAddr::from(([127, 0, 0, 1], config.port));
    let requested = match std::env::var("BIND") {
        Ok(value) => match value.trim().parse::<SocketAddr>() {
            Ok(addr) => addr,
            Err(err) => {
                tracing::warn!(
                    "Invalid BIND='{}': {}. Falling back to {}",
                    value,
                    err,
                    default_bind
                );
                default_bind
            }
        },
        Err(_) => default_bind,
    };

    if allow_public_access || requested.ip().is_loopback() {
        return requested;
    }

    tracing::warn!(
        "Non-loopback bind {} requested without ALLOW_PUBLIC_ACCESS; forcing 127.0.0.1",
        requested
    );
    SocketAddr::from(([127, 0, 0, 1], requested.port()))
}

fn cors_layer(allow_public_access: bool, cors_port: u16) -> CorsLayer {
    let methods = [Method::GET, Method::POST];
    if allow_public_access {
        return CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(methods)
            .allow_headers(tower_http::cors::Any);
    }

    let origins: Vec<HeaderValue> = [
        format!("http://localhost:{}", cors_port),
        format!("http://127.0.0.1:{}", cors_port),
    ]
    .into_iter()
    .filter_map(|origin| HeaderValue::from_str(&origin).ok())
    .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

fn create_app_with_cors_port(state: AppState, allow_public_access: bool, cors_port: u16) -> Router {
    Router::new()
        .route("/register", post(handlers::user::register_user))
        .route("/paste", post(handlers::paste::create_paste))
        .route("/upload", post(handlers::paste::create_paste))
        .route("/get", post(handlers::paste::get_paste))
        .route("/health", get(handlers::health::health))
        .with_state(state)
        .layer(
            tower::ServiceBuilder::new()
                // No content size limit is imposed on pastes.
                .layer(DefaultBodyLimit::disable())
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(allow_public_access, cors_port))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("DENY"),
                )),
        )
}

fn listener_cors_port(listener: &tokio::net::TcpListener, fallback_port: u16) -> u16 {
    listener
        .local_addr()
        .map(|addr| addr.port())
        .unwrap_or(fallback_port)
}

/// Run the Axum server with graceful shutdown support.
///
/// # Errors
/// Returns any I/O error produced by `axum::serve`.
pub async fn serve_router(
    listener: tokio::net::TcpListener,
    state: AppState,
    allow_public_access: bool,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let cors_port = listener_cors_port(&listener, state.config.port);
    let app = create_app_with_cors_port(state, allow_public_access, cors_port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}

#[cfg(test)]
mod tests {
    use super::{listener_cors_port, resolve_bind_address};
    use codepaste_core::env::EnvOverrides;
    use codepaste_core::{Config, DEFAULT_PORT};
    use std::net::SocketAddr;

    fn config_on_port(port: u16) -> Config {
        Config {
            port,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn listener_cors_port_uses_bound_listener_port() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener");
        let expected = listener.local_addr().expect("listener addr").port();
        let resolved = listener_cors_port(&listener, DEFAULT_PORT);
        assert_eq!(resolved, expected);
    }

    #[test]
    fn resolve_bind_address_enforces_loopback_when_public_access_disabled() {
        let _env = EnvOverrides::new().set("BIND", "0.0.0.0:4040");
        let resolved = resolve_bind_address(&config_on_port(4040), false);
        assert_eq!(resolved, SocketAddr::from(([127, 0, 0, 1], 4040)));
    }

    #[test]
    fn resolve_bind_address_honors_public_bind_when_allowed() {
        let _env = EnvOverrides::new().set("BIND", "0.0.0.0:4042");
        let resolved = resolve_bind_address(&config_on_port(4042), true);
        assert_eq!(resolved, SocketAddr::from(([0, 0, 0, 0], 4042)));
    }

    #[test]
    fn resolve_bind_address_allows_loopback_and_invalid_fallback() {
        let config = config_on_port(4041);
        {
            let _env = EnvOverrides::new().remove("BIND");
            let loopback = resolve_bind_address(&config, false);
            assert_eq!(loopback, SocketAddr::from(([127, 0, 0, 1], 4041)));
        }

        let _env = EnvOverrides::new().set("BIND", "bad:host");
        let fallback = resolve_bind_address(&config, false);
        assert_eq!(fallback, SocketAddr::from(([127, 0, 0, 1], 4041)));
    }
}
