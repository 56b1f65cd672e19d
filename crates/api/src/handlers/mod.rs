mod proxy;

pub use proxy::proxy_request;
