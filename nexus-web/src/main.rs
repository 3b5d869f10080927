// Nexus Agent - A desktop remote-control agent built with Rust
// Copyright (C) 2025 Nexus Agent Project Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use anyhow::{Context, Result};
use clap::Parser;
use nexus_core::{ActionExecutor, SystemEffects};
use nexus_web::{configuration::Configuration, host, routes, state::AppState};
use std::{path::PathBuf, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "nexus-agent")]
#[command(about = "Desktop agent that runs actions sent from the Nexus companion app", long_about = None)]
struct Args {
    /// Extra configuration file, applied over the standard locations
    #[arg(long, short, env = "NEXUS_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind (overrides configuration)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides configuration)
    #[arg(long, short)]
    port: Option<u16>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nexus_web=debug,nexus_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let mut config = Configuration::load_with(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let effects = SystemEffects::detect();
    info!("Starting Nexus Agent on {}", effects.platform());
    info!(
        "Unknown actions: {}, serialized dispatch: {}",
        config.dispatch.unknown_action, config.dispatch.serialize_actions
    );

    let host_name = host::host_name();
    let executor = ActionExecutor::new(Arc::new(effects));
    let state = AppState::new(executor, config.clone(), host_name.clone());

    let app = routes::create_router(state);

    let listener = TcpListener::bind(&config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr()))?;
    info!("Listening on {}", listener.local_addr()?);

    match host::local_ip() {
        Some(ip) => info!(
            "Enter {} in the companion app to control {}",
            host::connect_url(ip, config.server.port),
            host_name
        ),
        None => warn!("Could not determine the local network address"),
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Nexus Agent stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
