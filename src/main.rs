//! BJU Tracker
//!
//! An MCP server for tracking food products and meal BJU totals.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use bju::config::{DataPaths, EmailConfig};
use bju::email::MailSender;
use bju::mcp::BjuService;
use bju::store::{Catalog, Ledger};
use bju::tools::status::StatusTracker;
use bju::{build_info, config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("bju=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner to stderr
    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    // Resolve and prepare the data directory
    let paths = DataPaths::from_env();
    eprintln!("Data directory: {}", paths.data_dir.display());
    std::fs::create_dir_all(&paths.data_dir)?;

    let catalog = Catalog::new(&paths.products_file);
    let ledger = Ledger::new(&paths.meals_file);

    // Seed the catalog on first run
    if catalog.bootstrap()? {
        eprintln!("Seeded {} with default products", config::PRODUCTS_FILE);
    }

    // Optional SMTP mailer
    let mailer = match EmailConfig::from_env() {
        Some(email_config) => {
            eprintln!("Email configured for host {}", email_config.smtp_host);
            Some(MailSender::new(&email_config)?)
        }
        None => {
            eprintln!("Email not configured (BJU_SMTP_HOST unset); summaries stay local");
            None
        }
    };

    // Create the service
    let status_tracker = StatusTracker::new(&paths);
    let service = BjuService::new(catalog, ledger, mailer, status_tracker);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
