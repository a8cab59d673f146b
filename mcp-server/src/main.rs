//! invoice-desk MCP server
//!
//! Exposes the invoice backend to AI agents over stdio. Invoices are presented
//! grouped by sender domain, with collapsible groups, search and sorting.
//! Configuration comes from environment variables (see `Config::from_env`).

mod server;

use anyhow::Result;
use rmcp::ServiceExt;
use server::InvoiceDeskServer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is used for MCP protocol)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting invoice-desk MCP server");

    let server = InvoiceDeskServer::from_env()?;

    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let service = server.serve(transport).await?;

    service.waiting().await?;

    Ok(())
}
