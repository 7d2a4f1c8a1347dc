use std::path::PathBuf;

use clap::Parser;
use storage_adapters::SeedData;
use tracing_subscriber::EnvFilter;

/// Writes the demo marketplace dataset as JSON.
#[derive(Parser)]
#[command(name = "seed")]
#[command(version)]
struct Cli {
    /// Output file
    #[arg(short, long, default_value = "seed.json")]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let seed = SeedData::demo();
    seed.save(&cli.out).await?;

    tracing::info!(
        path = %cli.out.display(),
        users = seed.users.len(),
        ads = seed.ads.len(),
        "seed dataset written"
    );
    Ok(())
}
