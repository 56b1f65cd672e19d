pub mod forwarder;
pub mod headers;

pub use forwarder::ReqwestForwarder;
