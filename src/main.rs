use clap::Parser;
use dotenvy::dotenv;
use fingoal::{cli::{self, Cli}, errors::Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file, non-fatal since variables can be set externally
    if dotenv().is_ok() {
        info!("Loaded .env file.");
    }

    // 3. Parse arguments and run the command
    let cli = Cli::parse();
    let output = cli::app::run(cli)
        .await
        .inspect_err(|e| error!("Command failed: {e}"))?;

    print!("{output}");
    Ok(())
}
