//! Adapters behind the application ports: SQLite project store, cached
//! domain registry, UDP name server and the outbound HTTP forwarder.
pub mod database;
pub mod dns;
pub mod proxy;
pub mod registry;
pub mod repositories;
