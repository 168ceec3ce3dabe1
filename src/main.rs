//! CLI entry point for the USPTO Open Data Portal client.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};
use uspto_odp::{ClientConfig, OdpClient};

mod cli;

use cli::{Args, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // Logs go to stderr so stdout carries only JSON
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let api_key = args
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or_else(|| {
            anyhow!("no API key provided; pass --api-key or set {}", uspto_odp::client::API_KEY_ENV)
        })?;
    let config = ClientConfig::new(api_key).with_base_url(args.base_url.as_str());
    let client = OdpClient::from_config(config).context("failed to create client")?;

    match args.command {
        Command::Wrapper { serial } => print_json(&client.get_patent_wrapper(&serial).await?),
        Command::Documents { serial } => print_json(&client.get_patent_documents(&serial).await?),
        Command::Continuity { serial } => {
            print_json(&client.get_patent_continuity(&serial).await?)
        }
        Command::ForeignPriority { serial } => {
            print_json(&client.get_foreign_priority(&serial).await?)
        }
        Command::Transactions { serial } => {
            print_json(&client.get_patent_transactions(&serial).await?)
        }
        Command::Assignments { serial } => {
            print_json(&client.get_patent_assignments(&serial).await?)
        }
        Command::Lookup { patent_number } => {
            let wrapper = client
                .get_app_metadata_from_patent_number(&patent_number)
                .await?;
            if wrapper.is_none() {
                info!(%patent_number, "no application found for patent number");
            }
            print_json(&wrapper)
        }
        Command::Download {
            serial,
            document_id,
            mime_type,
            output_dir,
            filename,
        } => {
            download(
                &client,
                &serial,
                &document_id,
                &mime_type,
                &output_dir,
                filename.as_deref(),
            )
            .await
        }
    }
}

async fn download(
    client: &OdpClient,
    serial: &str,
    document_id: &str,
    mime_type: &str,
    output_dir: &Path,
    filename: Option<&str>,
) -> Result<()> {
    let documents = client.get_patent_documents(serial).await?;
    let document = documents
        .items
        .iter()
        .find(|doc| doc.document_identifier == document_id)
        .ok_or_else(|| anyhow!("document {document_id} not found for application {serial}"))?;

    let path = client
        .download_document(document, output_dir, mime_type, filename)
        .await?;
    info!(path = %path.display(), "saved document");
    print_json(&path)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render JSON")?;
    println!("{rendered}");
    Ok(())
}
