//! resend-mcp binary
//!
//! Serves the Resend tools over stdio. Logs go to stderr because stdout
//! carries the protocol.

use anyhow::Context;
use resend_mcp::server::McpServer;
use resend_mcp::tools::ToolRegistry;
use resend_mcp::ResendClient;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("resend_mcp=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    // fail before reading any request if the key is missing
    let client = ResendClient::from_env().context("failed to configure the Resend client")?;
    let limits = *client.rate_limiter().config();
    info!(
        base_url = client.http().base_url(),
        max_requests = limits.max_requests,
        window_ms = limits.window.as_millis() as u64,
        "resend-mcp ready on stdio"
    );

    let server = Arc::new(McpServer::new(ToolRegistry::new(Arc::new(client))));
    server
        .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
        .context("stdio server failed")?;

    Ok(())
}
