use anyhow::Context;
use bfv_ocr::{OcrConfig, ServerNumberOcr};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "bfv-ocr")]
#[command(about = "Extract the server number from a Battlefield V screenshot")]
#[command(version)]
struct Args {
    /// Path to the screenshot
    image: PathBuf,

    /// Language identifier for the trained data
    #[arg(long, env = "BFV_OCR_LANGUAGE", default_value = "eng")]
    language: String,

    /// Emit the result as JSON
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = OcrConfig {
        language: args.language,
        ..OcrConfig::default()
    };

    let ocr = ServerNumberOcr::new(config).context("failed to initialize the OCR pipeline")?;
    let result = ocr
        .extract_from_path(&args.image)
        .with_context(|| format!("no server number extracted from {}", args.image.display()));

    // Sweep the pool before reporting either way.
    ocr.cleanup();
    let number = result?;

    if args.json {
        println!("{}", serde_json::json!({ "server_number": number }));
    } else {
        println!("{number}");
    }

    Ok(())
}
