//! Example downloading the URLs given on the command line in chunks.
//!
//! ```text
//! RUST_LOG=chunkfetch=debug cargo run --example batch_download -- <url>...
//! ```

use chunkfetch::download::Status;
use chunkfetch::downloader::DownloaderBuilder;
use color_eyre::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut urls: Vec<String> = std::env::args().skip(1).collect();
    if urls.is_empty() {
        urls = vec![
            "https://github.com/seanmonstar/reqwest/archive/refs/tags/v0.11.9.zip".into(),
            "https://github.com/tokio-rs/tokio/archive/refs/tags/tokio-1.45.1.zip".into(),
        ];
    }

    // Two parts per large file, at most five requests at once.
    let downloader = DownloaderBuilder::new()
        .directory(PathBuf::from("downloads"))
        .parts(2)
        .max_concurrency(5)
        .build();

    let report = downloader.download(&urls).await;

    for summary in report.summaries() {
        match summary.status() {
            Status::Success => println!("✓ {} ({} bytes)", summary.filename(), summary.size()),
            Status::Fail(msg) => println!("✗ {}: {}", summary.url(), msg),
            status => println!("- {}: {:?}", summary.url(), status),
        }
    }

    let paths = report.into_result()?;
    println!("\nDownload complete! Downloaded {} files.", paths.len());

    Ok(())
}
