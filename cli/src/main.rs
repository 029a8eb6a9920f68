use clap::Parser;
use pathfeed_cli::config::Config;
use pathfeed_cli::pipeline;
use pathfeed_cli::upload::UploadClient;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "pathfeed",
    version,
    about = "Scale a whole-slide image and upload it for classification",
    long_about = "Convert one whole-slide image to a scaled-down PNG, derive \
                  classification labels from its path and the local reference \
                  table, and upload everything to the recognition service.\n\n\
                  On an accepted upload both the PNG and the source slide are \
                  deleted; on any failure they are left in place."
)]
struct Cli {
    /// Path of the slide file to process
    #[arg(value_name = "SLIDE_PATH")]
    slide_path: String,

    /// API key for the app the image should be posted to
    #[arg(short = 'k', long = "key", value_name = "API_KEY")]
    key: Option<String>,

    /// Reference metadata table (CSV)
    #[arg(long = "reference", value_name = "PATH")]
    reference: Option<String>,

    /// Divisor applied to both slide dimensions
    #[arg(long = "scale-factor", value_name = "N")]
    scale_factor: Option<u32>,

    /// Enable debug-level logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Environment first, flags override
    let mut config = Config::from_env();
    if let Some(key) = cli.key {
        config.upload.api_key = key;
    }
    if let Some(path) = cli.reference {
        config.reference_path = path;
    }
    if let Some(factor) = cli.scale_factor {
        config.scale_factor = factor;
    }
    config.verbose |= cli.verbose;

    // Initialize tracing
    let default_filter = if config.verbose {
        "pathfeed_cli=debug"
    } else {
        "pathfeed_cli=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Loaded configuration: scale_factor={}, reference={}, endpoint={}",
        config.scale_factor, config.reference_path, config.upload.endpoint
    );
    if config.upload.api_key.is_empty() {
        warn!("No API key configured; the service will reject the upload");
    }

    let client = UploadClient::new(&config.upload)?;
    pipeline::run(&config, &client, &cli.slide_path).await?;

    info!("Done: {}", cli.slide_path);
    Ok(())
}
