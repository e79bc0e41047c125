// src/lib.rs

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod render;
pub mod view;

pub use cache::{MemoryQuoteCache, QuoteCache};
pub use catalog::Catalog;
pub use config::Config;
pub use error::QuoteError;
pub use loader::{HttpQuoteService, QuoteService};
pub use models::{DailyBar, QuoteDetail, QuotePayload, TimeSeries};
pub use render::Screen;
pub use view::{Navigator, QuoteDetailView, Resolution};
