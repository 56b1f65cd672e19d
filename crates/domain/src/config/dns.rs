use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// TTL, in seconds, on every A answer.
    #[serde(default = "default_answer_ttl")]
    pub answer_ttl: u32,

    /// When set, every registered domain is answered with this address
    /// (typically the reverse proxy) instead of its backend's IPv4 address.
    #[serde(default)]
    pub answer_address: Option<Ipv4Addr>,

    /// Largest reply sent over UDP; bigger replies are truncated (TC bit).
    #[serde(default = "default_max_udp_payload")]
    pub max_udp_payload: usize,

    #[serde(default = "default_recv_buffer_size")]
    pub recv_buffer_size: usize,

    #[serde(default = "default_socket_buffer_bytes")]
    pub socket_buffer_bytes: usize,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            answer_ttl: default_answer_ttl(),
            answer_address: None,
            max_udp_payload: default_max_udp_payload(),
            recv_buffer_size: default_recv_buffer_size(),
            socket_buffer_bytes: default_socket_buffer_bytes(),
        }
    }
}

fn default_answer_ttl() -> u32 {
    60
}

fn default_max_udp_payload() -> usize {
    512
}

fn default_recv_buffer_size() -> usize {
    4096
}

fn default_socket_buffer_bytes() -> usize {
    512 * 1024
}
