// src/catalog.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use validator::Validate;

use crate::error::QuoteError;

const EMBEDDED_CATALOG: &str = include_str!("../assets/catalog.json");

pub const FALLBACK_DESCRIPTION: &str = "Description not available.";
pub const DEFAULT_INDUSTRY: &str = "Electronic computers";
pub const DEFAULT_SECTOR: &str = "Technology";

// Static text and artwork shown for a known ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SymbolDescriptor {
    #[validate(length(min = 1, max = 5))]
    pub symbol: String,
    #[validate(length(min = 1))]
    pub logo: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
}

/// Symbol -> descriptor lookup. Unknown symbols fall back to defaults instead
/// of failing.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    descriptors: HashMap<String, SymbolDescriptor>,
}

impl Catalog {
    /// Catalog compiled into the binary.
    pub fn embedded() -> Result<Self, QuoteError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    pub fn from_path(path: &Path) -> Result<Self, QuoteError> {
        let body = std::fs::read_to_string(path)?;
        Self::from_json(&body)
    }

    pub fn from_json(body: &str) -> Result<Self, QuoteError> {
        let entries: Vec<SymbolDescriptor> = serde_json::from_str(body)?;
        Self::from_descriptors(entries)
    }

    pub fn from_descriptors<I>(entries: I) -> Result<Self, QuoteError>
    where
        I: IntoIterator<Item = SymbolDescriptor>,
    {
        let mut descriptors = HashMap::new();
        for entry in entries {
            entry.validate()?;
            if descriptors.contains_key(&entry.symbol) {
                return Err(QuoteError::Config(format!("duplicate catalog symbol {}", entry.symbol)));
            }
            descriptors.insert(entry.symbol.clone(), entry);
        }
        Ok(Catalog { descriptors })
    }

    pub fn get(&self, symbol: &str) -> Option<&SymbolDescriptor> {
        self.descriptors.get(symbol)
    }

    pub fn logo(&self, symbol: &str) -> Option<&str> {
        self.get(symbol).map(|d| d.logo.as_str())
    }

    pub fn description(&self, symbol: &str) -> &str {
        self.get(symbol)
            .map(|d| d.description.as_str())
            .unwrap_or(FALLBACK_DESCRIPTION)
    }

    pub fn industry(&self, symbol: &str) -> &str {
        self.get(symbol)
            .and_then(|d| d.industry.as_deref())
            .unwrap_or(DEFAULT_INDUSTRY)
    }

    pub fn sector(&self, symbol: &str) -> &str {
        self.get(symbol)
            .and_then(|d| d.sector.as_deref())
            .unwrap_or(DEFAULT_SECTOR)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
