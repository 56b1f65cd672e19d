use std::net::SocketAddr;
use switchyard_proxy::{create_proxy_router, serve, ProxyState};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub async fn start_proxy_server(
    bind_addr: SocketAddr,
    state: ProxyState,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    info!(bind_address = %bind_addr, "Starting reverse proxy");

    let listener = TcpListener::bind(bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind proxy listener {bind_addr}: {e}"))?;

    serve(listener, create_proxy_router(state), shutdown).await?;
    Ok(())
}
