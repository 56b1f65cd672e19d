mod dns;
mod proxy;

pub use dns::start_dns_server;
pub use proxy::start_proxy_server;
