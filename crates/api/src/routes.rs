use crate::handlers;
use crate::state::ProxyState;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Every path and method goes to the proxy handler; routing is by `Host`.
pub fn create_proxy_router(state: ProxyState) -> Router {
    Router::new()
        .fallback(handlers::proxy_request)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
