//! Offline converter: stored LocationIQ response → canonical addresses as JSON.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use locationiq::parser::detect_family;
use locationiq::{normalize_response, ResponseFamily};

#[derive(Parser, Debug)]
#[command(name = "convert")]
#[command(about = "Normalize a stored LocationIQ response body")]
struct Args {
    /// Response body file; reads stdin when omitted
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// json-autocomplete, xml-search or xml-reverse; detected from the body when omitted
    #[arg(long)]
    family: Option<ResponseFamily>,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let body = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("Failed to read stdin")?;
            body
        }
    };

    let family = match args.family {
        Some(family) => family,
        None => detect_family(&body)?,
    };
    info!("Normalizing {} response ({} bytes)", family, body.len());

    let addresses = normalize_response(&body, family)?;
    let output = if args.pretty {
        serde_json::to_string_pretty(&addresses)?
    } else {
        serde_json::to_string(&addresses)?
    };
    println!("{}", output);

    Ok(())
}
