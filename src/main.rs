// src/main.rs
use anyhow::Result;
use statusprobe::config;
use statusprobe::runner::ConformanceRunner;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("statusprobe=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    // Load configuration (optional file path as the first argument)
    let config_path = std::env::args().nth(1);
    let config = config::load_config(config_path).await?;
    info!("Target API: {}", config.api_base());

    let runner = ConformanceRunner::new(config)?;
    let results = runner.run().await;

    if !results.all_passed() {
        std::process::exit(1);
    }
    Ok(())
}
