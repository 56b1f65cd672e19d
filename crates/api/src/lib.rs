//! Host-routed HTTP reverse proxy.
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use errors::ProxyError;
pub use routes::create_proxy_router;
pub use server::serve;
pub use state::ProxyState;
