use arpdns_domain::reverse_lookup::fqdn;
use arpdns_domain::reverse_name::ip_to_reverse_domain;
use arpdns_domain::{CliOverrides, Config, RecordType, ReverseQuery};
use arpdns_jobs::{EthersReloadJob, JobRunner};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "arpdns")]
#[command(version)]
#[command(about = "arpdns - PTR answers from ARP, neighbor discovery and /etc/ethers")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Interface used for ARP and neighbor discovery
    #[arg(short = 'i', long)]
    interface: Option<String>,

    /// Ethers file path
    #[arg(long, value_name = "PATH")]
    ethers: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Resolve one address, print the PTR target and exit
    #[arg(long, value_name = "IP")]
    lookup: Option<IpAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        interface: cli.interface.clone(),
        ethers_path: cli.ethers.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config.logging);

    info!("Starting arpdns v{}", env!("CARGO_PKG_VERSION"));

    let services = di::Services::new(&config).map_err(|e| {
        error!(
            interface = %config.neighbor.interface,
            error = %e,
            "Cannot start neighbor resolution"
        );
        e
    })?;

    bootstrap::load_ethers(services.table.as_ref(), &config.ethers.path).await;

    if let Some(ip) = cli.lookup {
        return run_lookup(&services, ip).await;
    }

    let shutdown = CancellationToken::new();
    let mut runner = JobRunner::new().with_shutdown_token(shutdown.clone());
    if config.ethers.reload_interval_secs > 0 {
        runner = runner.with_ethers_reload(
            EthersReloadJob::new(services.table.clone())
                .with_interval(Duration::from_secs(config.ethers.reload_interval_secs)),
        );
    }
    runner.start().await;

    let dns_addr = bind_socket_addr(&config)?;
    let dns_handler = services.dns_handler();

    tokio::select! {
        result = server::start_dns_server(dns_addr, dns_handler) => {
            if let Err(e) = &result {
                error!(error = %e, "DNS server error");
            }
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    shutdown.cancel();
    info!("Server shutdown complete");
    Ok(())
}

fn bind_socket_addr(config: &Config) -> anyhow::Result<SocketAddr> {
    let ip: IpAddr = config.server.bind_address.parse().map_err(|e| {
        anyhow::anyhow!(
            "Invalid bind address '{}': {}",
            config.server.bind_address,
            e
        )
    })?;
    Ok(SocketAddr::new(ip, config.server.dns_port))
}

async fn run_lookup(services: &di::Services, ip: IpAddr) -> anyhow::Result<()> {
    let query = ReverseQuery::new(fqdn(&ip_to_reverse_domain(&ip)), RecordType::PTR);

    match services.use_case.answer(&query).await {
        Ok(answer) => {
            for target in &answer.targets {
                println!("{}", target);
            }
        }
        Err(e) => {
            info!(ip = %ip, reason = %e, "No answer");
            println!("no answer");
        }
    }
    Ok(())
}
