// src/view.rs

use log::{debug, error, info, warn};
use std::sync::Arc;

use crate::cache::QuoteCache;
use crate::catalog::Catalog;
use crate::error::QuoteError;
use crate::loader::QuoteService;
use crate::models::QuotePayload;
use crate::render::{detail_screen, Screen};

/// Navigation collaborator that owns the screen stack.
pub trait Navigator: Send {
    fn go_back(&mut self);
}

/// How a call to [`QuoteDetailView::resolve_symbol`] ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Served from the cache, no request issued.
    Cached(Arc<QuotePayload>),
    /// Fetched and cached, now on screen.
    Fetched(Arc<QuotePayload>),
    /// Fetched and cached, but the active symbol moved on before it arrived.
    Stale { symbol: String },
    /// The request failed; the screen keeps loading.
    Failed { symbol: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenState {
    pub symbol: String,
    pub resolved: Option<Arc<QuotePayload>>,
    pub search_text: String,
}

pub struct QuoteDetailView<S, C> {
    service: S,
    cache: C,
    catalog: Arc<Catalog>,
    navigator: Box<dyn Navigator>,
    state: ScreenState,
}

impl<S, C> QuoteDetailView<S, C>
where
    S: QuoteService,
    C: QuoteCache,
{
    pub fn new(
        initial_symbol: &str,
        service: S,
        cache: C,
        catalog: Arc<Catalog>,
        navigator: Box<dyn Navigator>,
    ) -> Result<Self, QuoteError> {
        if initial_symbol.is_empty() {
            return Err(QuoteError::EmptySymbol);
        }
        Ok(QuoteDetailView {
            service,
            cache,
            catalog,
            navigator,
            state: ScreenState {
                symbol: initial_symbol.to_string(),
                ..ScreenState::default()
            },
        })
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn symbol(&self) -> &str {
        &self.state.symbol
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// First resolution for the symbol the view was opened with.
    pub async fn mount(&mut self) -> Resolution {
        let symbol = self.state.symbol.clone();
        self.resolve_symbol(&symbol).await
    }

    /// Resolves `symbol` from the cache, or with a single request to the quote
    /// service. Failures are logged and leave the screen untouched.
    pub async fn resolve_symbol(&mut self, symbol: &str) -> Resolution {
        match self.cache.get(symbol) {
            Ok(Some(payload)) => {
                debug!("Cache hit for {symbol}");
                if symbol == self.state.symbol {
                    self.state.resolved = Some(Arc::clone(&payload));
                }
                return Resolution::Cached(payload);
            }
            Ok(None) => {}
            Err(e) => warn!("Quote cache unavailable, fetching {symbol}: {e}"),
        }

        info!("Fetching quote for {symbol}");
        let result = self.service.fetch(symbol).await;
        self.apply_response(symbol, result)
    }

    /// Records the outcome of a fetch issued for `symbol`.
    ///
    /// A successful payload always lands in the cache, but it only reaches the
    /// screen while `symbol` is still the active one. Callers that run fetches
    /// outside the view (and may finish after the symbol changed) hand their
    /// results in here; `resolve_symbol` itself never yields `Stale`.
    pub fn apply_response(&mut self, symbol: &str, result: Result<QuotePayload, QuoteError>) -> Resolution {
        let payload = match result {
            Ok(payload) => payload,
            Err(e) => {
                error!("Failed to fetch quote for {symbol}: {e}");
                return Resolution::Failed { symbol: symbol.to_string() };
            }
        };

        let entry = match self.cache.insert(symbol, payload.clone()) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Could not cache quote for {symbol}: {e}");
                Arc::new(payload)
            }
        };

        if symbol != self.state.symbol {
            warn!(
                "Discarding response for {symbol}, active symbol is now {}",
                self.state.symbol
            );
            return Resolution::Stale { symbol: symbol.to_string() };
        }

        self.state.resolved = Some(Arc::clone(&entry));
        Resolution::Fetched(entry)
    }

    /// Makes `symbol` the active one and drops whatever was on screen.
    /// Returns false when it already was active.
    pub fn set_active_symbol(&mut self, symbol: &str) -> bool {
        if symbol == self.state.symbol {
            return false;
        }
        self.state.symbol = symbol.to_string();
        self.state.resolved = None;
        true
    }

    pub fn set_search_text(&mut self, text: &str) {
        self.state.search_text = text.to_string();
    }

    /// Submits the search box. Non-empty text becomes the active symbol as
    /// typed and is resolved; empty text or the current symbol does nothing.
    pub async fn submit_search(&mut self) -> Option<Resolution> {
        if self.state.search_text.is_empty() {
            return None;
        }
        let symbol = self.state.search_text.clone();
        self.change_symbol(&symbol).await
    }

    /// Switches the active symbol and resolves it once. Nothing happens when
    /// `symbol` is already active.
    pub async fn change_symbol(&mut self, symbol: &str) -> Option<Resolution> {
        if !self.set_active_symbol(symbol) {
            return None;
        }
        Some(self.resolve_symbol(symbol).await)
    }

    pub fn go_back(&mut self) {
        self.navigator.go_back();
    }

    pub fn render(&self) -> Screen {
        match &self.state.resolved {
            None => Screen::Loading,
            Some(payload) => Screen::Detail(Box::new(detail_screen(
                &self.state.symbol,
                &self.state.search_text,
                payload,
                &self.catalog,
            ))),
        }
    }
}
