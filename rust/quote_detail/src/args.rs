// src/args.rs

use clap::Parser;
use std::path::PathBuf;

/// Show quote details and a closing-price chart for a ticker.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Ticker symbol to open, e.g. AAPL.
    pub symbol: String,

    /// Quote service base URL. Overrides QUOTE_SERVICE_URL.
    #[arg(long)]
    pub base_url: Option<String>,

    /// JSON file with symbol descriptors. Overrides QUOTE_CATALOG_PATH.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Request timeout in seconds. Overrides QUOTE_REQUEST_TIMEOUT_SECS.
    #[arg(long)]
    pub timeout: Option<u64>,
}
