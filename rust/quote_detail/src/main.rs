// src/main.rs

mod args;

use clap::Parser;
use log::info;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use args::Args;
use quote_detail::{Config, HttpQuoteService, MemoryQuoteCache, Navigator, QuoteDetailView, QuoteError};

const BACK_COMMAND: &str = ":back";

// Closing the only screen ends the session
struct ExitNavigator(Arc<AtomicBool>);

impl Navigator for ExitNavigator {
    fn go_back(&mut self) {
        info!("Leaving quote details");
        self.0.store(true, Ordering::SeqCst);
    }
}

#[tokio::main]
async fn main() -> Result<(), QuoteError> {
    dotenvy::dotenv().ok();
    init_logger();
    let args = Args::parse();

    let config = build_config(&args)?;
    info!("Using quote service at {}", config.base_url);

    let catalog = Arc::new(config.load_catalog()?);
    let service = HttpQuoteService::new(&config)?;
    let closed = Arc::new(AtomicBool::new(false));

    let mut view = QuoteDetailView::new(
        &args.symbol,
        service,
        MemoryQuoteCache::shared(),
        catalog,
        Box::new(ExitNavigator(Arc::clone(&closed))),
    )?;

    view.mount().await;
    print!("{}", view.render());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line == BACK_COMMAND {
            view.go_back();
        } else {
            view.set_search_text(&line);
            if view.submit_search().await.is_some() {
                print!("{}", view.render());
            }
        }
        if closed.load(Ordering::SeqCst) {
            break;
        }
    }
    Ok(())
}

fn build_config(args: &Args) -> Result<Config, QuoteError> {
    Config::from_env()?.with_overrides(args.base_url.clone(), args.catalog.clone(), args.timeout)
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
