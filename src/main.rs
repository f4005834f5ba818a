use clap::{Parser, Subcommand};
use std::sync::Arc;

use breach_lookup::client::ProxyClient;
use breach_lookup::clipboard::SystemClipboard;
use breach_lookup::config::CONFIG;
use breach_lookup::upstream::UpstreamClient;
use breach_lookup::{api, session};

#[derive(Parser)]
#[command(name = "breach-lookup", about = "Search a breach-data service through a local proxy")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the query proxy.
    Serve {
        #[arg(long)]
        bind: Option<String>,
        #[arg(long)]
        upstream: Option<String>,
    },
    /// Open the interactive search view.
    Search {
        #[arg(long)]
        proxy: Option<String>,
        query: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber (handles both tracing and log crate)
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve { bind, upstream } => {
            let bind = bind.unwrap_or_else(|| CONFIG.bind_addr.clone());
            let upstream = upstream.unwrap_or_else(|| CONFIG.upstream_url.clone());
            api::serve(&bind, Arc::new(UpstreamClient::new(upstream))).await?;
        }
        Commands::Search { proxy, query } => {
            let proxy = proxy.unwrap_or_else(|| CONFIG.proxy_url.clone());
            session::run(ProxyClient::new(proxy), Box::new(SystemClipboard::detect()), query).await?;
        }
    }
    Ok(())
}
