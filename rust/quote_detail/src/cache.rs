// src/cache.rs

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::QuoteError;
use crate::models::QuotePayload;

/// Store of fetched quote payloads keyed by the symbol they were requested with.
///
/// Entries are never replaced or evicted: the first payload inserted for a
/// symbol is the one every later lookup sees.
pub trait QuoteCache: Send + Sync {
    fn get(&self, symbol: &str) -> Result<Option<Arc<QuotePayload>>, QuoteError>;

    /// Stores `payload` unless `symbol` already has an entry, and returns the
    /// entry that ends up cached.
    fn insert(&self, symbol: &str, payload: QuotePayload) -> Result<Arc<QuotePayload>, QuoteError>;
}

/// In-memory cache that lives as long as its last handle.
#[derive(Debug, Default)]
pub struct MemoryQuoteCache {
    entries: RwLock<HashMap<String, Arc<QuotePayload>>>,
}

impl MemoryQuoteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn len(&self) -> Result<usize, QuoteError> {
        Ok(self.entries.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, QuoteError> {
        Ok(self.len()? == 0)
    }
}

impl QuoteCache for MemoryQuoteCache {
    fn get(&self, symbol: &str) -> Result<Option<Arc<QuotePayload>>, QuoteError> {
        Ok(self.entries.read()?.get(symbol).cloned())
    }

    fn insert(&self, symbol: &str, payload: QuotePayload) -> Result<Arc<QuotePayload>, QuoteError> {
        let mut entries = self.entries.write()?;
        let entry = entries
            .entry(symbol.to_string())
            .or_insert_with(|| Arc::new(payload));
        Ok(Arc::clone(entry))
    }
}

impl<C: QuoteCache + ?Sized> QuoteCache for Arc<C> {
    fn get(&self, symbol: &str) -> Result<Option<Arc<QuotePayload>>, QuoteError> {
        (**self).get(symbol)
    }

    fn insert(&self, symbol: &str, payload: QuotePayload) -> Result<Arc<QuotePayload>, QuoteError> {
        (**self).insert(symbol, payload)
    }
}
