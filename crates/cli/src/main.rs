use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use switchyard_application::ports::RegistryRefreshPort;
use switchyard_domain::CliOverrides;
use switchyard_jobs::{JobRunner, RegistryRefreshJob};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "switchyard")]
#[command(version)]
#[command(about = "Switchyard - authoritative DNS and host-routed reverse proxy for project domains")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Reverse proxy port
    #[arg(short = 'p', long)]
    proxy_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Database path
    #[arg(long)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        proxy_port: cli.proxy_port,
        bind_address: cli.bind,
        database_path: cli.database,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    info!("Starting Switchyard v{}", env!("CARGO_PKG_VERSION"));

    let services = di::Services::new(&config).await?;

    // Warm the snapshot so the first queries don't pay for the load.
    match services.registry.refresh().await {
        Ok(outcome) => info!(records = outcome.records, "Registry loaded"),
        Err(e) => warn!(error = %e, "Initial registry load failed, will retry on demand"),
    }

    let shutdown = CancellationToken::new();

    JobRunner::new()
        .with_registry_refresh(
            RegistryRefreshJob::new(services.registry.clone())
                .with_interval(config.registry.refresh_interval()),
        )
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    let bind_ip: IpAddr = config.server.bind_address.parse()?;
    let dns_addr = SocketAddr::new(bind_ip, config.server.dns_port);
    let proxy_addr = SocketAddr::new(bind_ip, config.server.proxy_port);

    let mut daemons: JoinSet<(&'static str, anyhow::Result<()>)> = JoinSet::new();
    {
        let shutdown = shutdown.clone();
        let cfg = config.dns.clone();
        let use_case = services.handle_dns_query.clone();
        daemons.spawn(async move {
            ("dns", server::start_dns_server(dns_addr, cfg, use_case, shutdown).await)
        });
    }
    {
        let shutdown = shutdown.clone();
        let state = services.proxy_state.clone();
        daemons.spawn(async move {
            ("proxy", server::start_proxy_server(proxy_addr, state, shutdown).await)
        });
    }

    let ctrl_c_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            ctrl_c_token.cancel();
        }
    });

    while let Some(joined) = daemons.join_next().await {
        match joined {
            Ok((name, Ok(()))) => info!(daemon = name, "Daemon stopped"),
            Ok((name, Err(e))) => error!(daemon = name, error = %e, "Daemon failed"),
            Err(e) => error!(error = %e, "Daemon task panicked"),
        }
    }

    shutdown.cancel();
    info!("Server shutdown complete");
    Ok(())
}
