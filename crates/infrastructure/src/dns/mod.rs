pub mod handler;
pub mod server;

pub use handler::DnsPacketHandler;
pub use server::NameServer;
