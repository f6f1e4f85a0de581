use anyhow::Result;
use axum::Router;
use clap::Parser;
use jobcore::DEFAULT_RETENTION_DAYS;
use server::{build_app, ServerConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Job file produced by the importer
    #[arg(long, default_value = "./data/jobs.json")]
    jobs: String,
    /// Suggestion seed list, one entry per line (built-in list when omitted)
    #[arg(long)]
    seeds: Option<String>,
    /// Days the lastSearch cookie is kept
    #[arg(long, default_value_t = DEFAULT_RETENTION_DAYS)]
    retention_days: u32,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let config = ServerConfig {
        jobs_path: PathBuf::from(&args.jobs),
        seeds_path: args.seeds.map(PathBuf::from),
        retention_days: args.retention_days,
    };
    let app: Router = build_app(config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
