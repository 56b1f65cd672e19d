use super::handler::DnsPacketHandler;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use switchyard_domain::config::DnsConfig;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Authoritative UDP responder for project domains.
pub struct NameServer {
    socket: Arc<UdpSocket>,
    handler: Arc<DnsPacketHandler>,
    recv_buffer_size: usize,
}

impl NameServer {
    /// Binds the listening socket. Must be called inside a tokio runtime.
    pub fn bind(
        addr: SocketAddr,
        cfg: &DnsConfig,
        handler: DnsPacketHandler,
    ) -> io::Result<Self> {
        let socket = create_udp_socket(addr, cfg.socket_buffer_bytes)?;
        Ok(Self {
            socket: Arc::new(socket),
            handler: Arc::new(handler),
            recv_buffer_size: cfg.recv_buffer_size,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Receives until `shutdown` is cancelled. Each datagram is answered on
    /// its own task so a slow registry lookup never blocks the loop.
    pub async fn run(self, shutdown: CancellationToken) {
        let local = self.socket.local_addr().ok();
        info!(bind_address = ?local, "DNS server listening");

        let mut buf = vec![0u8; self.recv_buffer_size];
        loop {
            let (len, peer) = tokio::select! {
                _ = shutdown.cancelled() => break,
                result = self.socket.recv_from(&mut buf) => match result {
                    Ok(received) => received,
                    Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted) => continue,
                    Err(e) => {
                        warn!(error = %e, "UDP recv error");
                        continue;
                    }
                },
            };

            let packet: Arc<[u8]> = Arc::from(&buf[..len]);
            let socket = self.socket.clone();
            let handler = self.handler.clone();
            tokio::spawn(async move {
                let Some(response) = handler.handle(&packet, peer).await else {
                    return;
                };
                if let Err(e) = socket.send_to(&response, peer).await {
                    error!(client = %peer, error = %e, "UDP send error");
                }
            });
        }

        debug!(bind_address = ?local, "DNS server stopped");
    }
}

fn create_udp_socket(addr: SocketAddr, buffer_bytes: usize) -> io::Result<UdpSocket> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(buffer_bytes)?;
    socket.set_send_buffer_size(buffer_bytes)?;
    socket.bind(&addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    UdpSocket::from_std(std_socket)
}
