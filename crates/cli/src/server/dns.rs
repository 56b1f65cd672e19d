use std::net::SocketAddr;
use std::sync::Arc;
use switchyard_application::use_cases::HandleDnsQueryUseCase;
use switchyard_domain::config::DnsConfig;
use switchyard_infrastructure::dns::{DnsPacketHandler, NameServer};
use tokio_util::sync::CancellationToken;
use tracing::info;

pub async fn start_dns_server(
    bind_addr: SocketAddr,
    cfg: DnsConfig,
    use_case: Arc<HandleDnsQueryUseCase>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    info!(bind_address = %bind_addr, "Starting DNS server");

    let handler = DnsPacketHandler::new(use_case, cfg.max_udp_payload);
    let server = NameServer::bind(bind_addr, &cfg, handler)
        .map_err(|e| anyhow::anyhow!("failed to bind DNS socket {bind_addr}: {e}"))?;

    server.run(shutdown).await;
    Ok(())
}
